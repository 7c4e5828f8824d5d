//! The progression engine: owner of the character table.
//!
//! Every mutation rewrites the whole table under [`CHARACTERS_KEY`]. A failed
//! write is logged and the in-memory table stays authoritative; the next
//! mutation writes the full table again.

use std::collections::BTreeMap;

use rand::rngs::StdRng;

use bm_core::store::{load_json, save_json};
use bm_core::{CHARACTERS_KEY, CharacterId, CharacterProfile, KeyValueStore, Progress};

use crate::error::{MechError, MechResult};
use crate::loot::{LootDraw, LootReward, roll_loot};
use crate::progression::{BASE_EXP_PER_CORRECT, LevelUp, gain_experience};

/// What a correct answer earned, for the caller to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootFeedback {
    /// Base experience granted for the answer.
    pub base_exp: u32,
    /// The loot that was drawn.
    pub draw: LootDraw,
    /// Levels reached while applying the rewards, in order.
    pub level_ups: Vec<LevelUp>,
    /// Player-facing lines describing the rewards.
    pub messages: Vec<String>,
}

impl LootFeedback {
    /// Total experience granted, base plus loot.
    pub fn total_experience(&self) -> u32 {
        self.base_exp + self.draw.experience()
    }
}

/// Owns every character's progression record.
#[derive(Debug)]
pub struct ProgressionEngine {
    characters: BTreeMap<CharacterId, Progress>,
    rng: StdRng,
}

impl ProgressionEngine {
    /// Create an engine with zero-valued records for the built-in roster.
    pub fn new(rng: StdRng) -> Self {
        let characters = CharacterProfile::roster()
            .into_iter()
            .map(|p| (p.id, Progress::default()))
            .collect();
        Self { characters, rng }
    }

    /// Create an engine and merge any stored records onto the defaults.
    ///
    /// Stored characters outside the roster are ignored. Malformed stored
    /// data leaves the defaults in place.
    pub fn load(store: &dyn KeyValueStore, rng: StdRng) -> Self {
        let mut engine = Self::new(rng);
        let stored: BTreeMap<CharacterId, Progress> =
            load_json(store, CHARACTERS_KEY).unwrap_or_default();
        for (id, mut progress) in stored {
            match engine.characters.get_mut(&id) {
                Some(slot) => {
                    gain_experience(&mut progress, 0);
                    *slot = progress;
                }
                None => tracing::debug!(character = %id, "ignoring stored unknown character"),
            }
        }
        engine
    }

    /// All progression records, keyed by character.
    pub fn characters(&self) -> &BTreeMap<CharacterId, Progress> {
        &self.characters
    }

    /// One character's progression record.
    pub fn progress(&self, id: &CharacterId) -> MechResult<&Progress> {
        self.characters
            .get(id)
            .ok_or_else(|| MechError::UnknownCharacter(id.clone()))
    }

    /// Add experience to a character, leveling up as needed, and persist.
    pub fn gain_experience(
        &mut self,
        id: &CharacterId,
        amount: u32,
        store: &mut dyn KeyValueStore,
    ) -> MechResult<Vec<LevelUp>> {
        let progress = self.progress_mut(id)?;
        let level_ups = gain_experience(progress, amount);
        self.persist(store);
        Ok(level_ups)
    }

    /// Grant the base award and a random loot draw for a correct answer.
    pub fn award_loot(
        &mut self,
        id: &CharacterId,
        store: &mut dyn KeyValueStore,
    ) -> MechResult<LootFeedback> {
        // Validate before consuming randomness.
        self.progress(id)?;
        let draw = roll_loot(&mut self.rng);
        self.apply_loot(id, draw, store)
    }

    /// Grant the base award and a specific loot draw.
    pub fn apply_loot(
        &mut self,
        id: &CharacterId,
        draw: LootDraw,
        store: &mut dyn KeyValueStore,
    ) -> MechResult<LootFeedback> {
        let name = CharacterProfile::display_name(id);
        let progress = self.progress_mut(id)?;

        let mut level_ups = gain_experience(progress, BASE_EXP_PER_CORRECT);
        let mut messages = vec![format!("Earned {BASE_EXP_PER_CORRECT} experience.")];

        if let LootReward::Item(kind) = draw.entry.reward {
            let count = progress.items.entry(kind).or_insert(0);
            *count = count.saturating_add(draw.quantity);
        }
        level_ups.extend(gain_experience(progress, draw.experience()));
        messages.push(draw.message());

        for up in &level_ups {
            messages.push(format!("🚀 {name} reached level {}!", up.level));
        }
        tracing::debug!(
            character = %id,
            reward = %draw.entry.reward,
            quantity = draw.quantity,
            level = progress.level,
            "loot awarded"
        );

        self.persist(store);
        Ok(LootFeedback {
            base_exp: BASE_EXP_PER_CORRECT,
            draw,
            level_ups,
            messages,
        })
    }

    fn progress_mut(&mut self, id: &CharacterId) -> MechResult<&mut Progress> {
        self.characters
            .get_mut(id)
            .ok_or_else(|| MechError::UnknownCharacter(id.clone()))
    }

    fn persist(&self, store: &mut dyn KeyValueStore) {
        if let Err(e) = save_json(store, CHARACTERS_KEY, &self.characters) {
            tracing::warn!(error = %e, "failed to persist character table");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bm_core::{ItemKind, MemoryStore};
    use rand::SeedableRng;

    use crate::loot::LOOT_TABLE;

    fn engine() -> ProgressionEngine {
        ProgressionEngine::new(StdRng::seed_from_u64(42))
    }

    fn steve() -> CharacterId {
        CharacterId::new("steve")
    }

    #[test]
    fn roster_starts_zeroed() {
        let e = engine();
        assert_eq!(e.characters().len(), 5);
        assert_eq!(e.progress(&steve()).unwrap(), &Progress::default());
    }

    #[test]
    fn gain_experience_persists_table() {
        let mut e = engine();
        let mut store = MemoryStore::new();
        let ups = e.gain_experience(&steve(), 120, &mut store).unwrap();
        assert_eq!(ups.len(), 1);
        assert_eq!(store.writes(), 1);

        let raw = store.get(CHARACTERS_KEY).unwrap().unwrap();
        let table: BTreeMap<CharacterId, Progress> = serde_json::from_str(&raw).unwrap();
        assert_eq!(table[&steve()].level, 2);
        assert_eq!(table[&steve()].experience, 20);
    }

    #[test]
    fn level_up_from_ninety_five() {
        let mut e = engine();
        let mut store = MemoryStore::new();
        e.gain_experience(&steve(), 95, &mut store).unwrap();
        let ups = e.gain_experience(&steve(), 10, &mut store).unwrap();
        let p = e.progress(&steve()).unwrap();
        assert_eq!((p.experience, p.level), (5, 2));
        assert_eq!(ups, vec![LevelUp { level: 2 }]);
    }

    #[test]
    fn diamond_draw_grants_sixty_experience() {
        let mut e = engine();
        let mut store = MemoryStore::new();
        let draw = LOOT_TABLE[0].roll(&mut StdRng::seed_from_u64(3));
        let fb = e.apply_loot(&steve(), draw, &mut store).unwrap();

        let p = e.progress(&steve()).unwrap();
        assert_eq!(p.item_count(ItemKind::Diamond), 1);
        assert_eq!(p.experience, 60);
        assert_eq!(fb.total_experience(), 60);
        assert_eq!(fb.messages[0], "Earned 10 experience.");
        assert!(fb.level_ups.is_empty());
    }

    #[test]
    fn experience_draw_adds_no_items() {
        let mut e = engine();
        let mut store = MemoryStore::new();
        let draw = LootDraw {
            entry: LOOT_TABLE[3],
            quantity: 40,
        };
        e.apply_loot(&steve(), draw, &mut store).unwrap();
        let p = e.progress(&steve()).unwrap();
        assert_eq!(p.experience, 50);
        for kind in ItemKind::ALL {
            assert_eq!(p.item_count(kind), 0);
        }
    }

    #[test]
    fn loot_level_up_is_announced() {
        let mut e = engine();
        let mut store = MemoryStore::new();
        e.gain_experience(&steve(), 80, &mut store).unwrap();
        let draw = LOOT_TABLE[0].roll(&mut StdRng::seed_from_u64(0));
        let fb = e.apply_loot(&steve(), draw, &mut store).unwrap();
        assert_eq!(fb.level_ups, vec![LevelUp { level: 2 }]);
        assert!(fb.messages.iter().any(|m| m == "🚀 Steve reached level 2!"));
        assert_eq!(e.progress(&steve()).unwrap().experience, 40);
    }

    #[test]
    fn award_loot_is_reproducible() {
        let mut a = engine();
        let mut b = engine();
        let mut store = MemoryStore::new();
        let fa = a.award_loot(&steve(), &mut store).unwrap();
        let fb = b.award_loot(&steve(), &mut store).unwrap();
        assert_eq!(fa, fb);
        assert!(fa.total_experience() >= 10);
    }

    #[test]
    fn unknown_character_rejected() {
        let mut e = engine();
        let mut store = MemoryStore::new();
        let err = e
            .award_loot(&CharacterId::new("herobrine"), &mut store)
            .unwrap_err();
        assert!(matches!(err, MechError::UnknownCharacter(_)));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn load_merges_known_characters() {
        let store = MemoryStore::with_value(
            CHARACTERS_KEY,
            r#"{"alex": {"experience": 30, "level": 3, "items": {"diamond": 2}},
                "herobrine": {"experience": 1}}"#,
        );
        let e = ProgressionEngine::load(&store, StdRng::seed_from_u64(1));
        let alex = e.progress(&CharacterId::new("alex")).unwrap();
        assert_eq!(alex.level, 3);
        assert_eq!(alex.item_count(ItemKind::Diamond), 2);
        assert!(e.progress(&CharacterId::new("herobrine")).is_err());
        assert_eq!(e.characters().len(), 5);
    }

    #[test]
    fn load_survives_oversized_levels() {
        let store = MemoryStore::with_value(
            CHARACTERS_KEY,
            r#"{"steve": {"experience": 0, "level": 50000000},
                "alex": {"experience": 4294967295, "level": 4294967295}}"#,
        );
        let mut e = ProgressionEngine::load(&store, StdRng::seed_from_u64(1));
        assert_eq!(e.progress(&steve()).unwrap().level, 50_000_000);
        let alex = e.progress(&CharacterId::new("alex")).unwrap();
        assert_eq!(alex.level, u32::MAX);
        assert!(alex.experience < alex.threshold());

        let mut sink = MemoryStore::new();
        e.award_loot(&steve(), &mut sink).unwrap();
        assert!(e.progress(&steve()).unwrap().level >= 50_000_000);
    }

    #[test]
    fn load_malformed_falls_back_to_defaults() {
        let store = MemoryStore::with_value(CHARACTERS_KEY, "[1, 2");
        let e = ProgressionEngine::load(&store, StdRng::seed_from_u64(1));
        assert_eq!(e.progress(&steve()).unwrap(), &Progress::default());
    }
}
