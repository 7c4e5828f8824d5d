//! Experience and leveling math.

use bm_core::Progress;

/// Experience granted for every correct answer before loot.
pub const BASE_EXP_PER_CORRECT: u32 = 10;

/// A character reached a new level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// The level reached.
    pub level: u32,
}

/// Add experience and level up as many times as it pays for.
///
/// Each level costs `level * 100`, deducted from the running total. On
/// return `experience < level * 100` always holds and the level never
/// decreases.
pub fn gain_experience(progress: &mut Progress, amount: u32) -> Vec<LevelUp> {
    progress.level = progress.level.max(1);
    progress.experience = progress.experience.saturating_add(amount);

    let mut level_ups = Vec::new();
    while progress.experience >= progress.threshold() {
        progress.experience -= progress.threshold();
        progress.level = progress.level.saturating_add(1);
        level_ups.push(LevelUp {
            level: progress.level,
        });
    }
    level_ups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(experience: u32, level: u32) -> Progress {
        Progress {
            experience,
            level,
            ..Progress::default()
        }
    }

    #[test]
    fn crossing_one_threshold() {
        let mut p = at(95, 1);
        let ups = gain_experience(&mut p, 10);
        assert_eq!(p.experience, 5);
        assert_eq!(p.level, 2);
        assert_eq!(ups, vec![LevelUp { level: 2 }]);
    }

    #[test]
    fn below_threshold_no_level_up() {
        let mut p = at(0, 1);
        assert!(gain_experience(&mut p, 99).is_empty());
        assert_eq!(p.experience, 99);
    }

    #[test]
    fn exact_threshold_levels_up() {
        let mut p = at(0, 2);
        let ups = gain_experience(&mut p, 200);
        assert_eq!(ups.len(), 1);
        assert_eq!(p.experience, 0);
        assert_eq!(p.level, 3);
    }

    #[test]
    fn multiple_levels_in_one_call() {
        // 100 + 200 + 300 = 600 to go from 1 to 4.
        let mut p = at(0, 1);
        let ups = gain_experience(&mut p, 650);
        assert_eq!(p.level, 4);
        assert_eq!(p.experience, 50);
        let levels: Vec<u32> = ups.iter().map(|u| u.level).collect();
        assert_eq!(levels, vec![2, 3, 4]);
    }

    #[test]
    fn top_level_never_wraps() {
        let mut p = at(0, u32::MAX);
        let ups = gain_experience(&mut p, u32::MAX);
        assert_eq!(p.level, u32::MAX);
        assert_eq!(p.experience, 0);
        assert_eq!(ups.len(), 1);
    }

    #[test]
    fn zero_level_repaired() {
        let mut p = at(0, 0);
        gain_experience(&mut p, 0);
        assert_eq!(p.level, 1);
    }

    proptest! {
        #[test]
        fn always_normalized(exp in 0u32..1000, level in 1u32..50, amount in 0u32..100_000) {
            let mut p = at(exp, level);
            let ups = gain_experience(&mut p, amount);
            prop_assert!(p.experience < p.level * 100);
            prop_assert!(p.level >= level);
            prop_assert_eq!(p.level - level, ups.len() as u32);
        }
    }
}
