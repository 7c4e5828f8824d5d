//! The loot table rolled on every correct answer.
//!
//! One entry is drawn uniformly, then a quantity is drawn uniformly from the
//! entry's inclusive range. Item entries grant items plus a fixed bonus;
//! the experience entry grants the drawn quantity as experience.

use std::fmt;

use rand::Rng;
use rand::rngs::StdRng;

use bm_core::ItemKind;

/// What a loot entry grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootReward {
    /// Items of one kind; the drawn quantity goes into the inventory.
    Item(ItemKind),
    /// Pure experience; the drawn quantity is granted as experience.
    Experience,
}

impl fmt::Display for LootReward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(kind) => write!(f, "{kind}"),
            Self::Experience => write!(f, "exp"),
        }
    }
}

/// One row of the loot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LootEntry {
    /// What this entry grants.
    pub reward: LootReward,
    /// Smallest quantity (inclusive).
    pub min: u32,
    /// Largest quantity (inclusive).
    pub max: u32,
    /// Experience granted on top of an item reward.
    pub bonus_exp: u32,
    /// Flavor text shown to the player.
    pub message: &'static str,
}

/// The four possible rewards, drawn with equal weight.
pub const LOOT_TABLE: [LootEntry; 4] = [
    LootEntry {
        reward: LootReward::Item(ItemKind::Diamond),
        min: 1,
        max: 1,
        bonus_exp: 50,
        message: "Congratulations, you mined a shiny diamond!",
    },
    LootEntry {
        reward: LootReward::Item(ItemKind::Redstone),
        min: 2,
        max: 5,
        bonus_exp: 10,
        message: "You found some redstone dust!",
    },
    LootEntry {
        reward: LootReward::Item(ItemKind::Iron),
        min: 1,
        max: 3,
        bonus_exp: 15,
        message: "You got iron ingots, time to craft some tools!",
    },
    LootEntry {
        reward: LootReward::Experience,
        min: 20,
        max: 50,
        bonus_exp: 0,
        message: "That was quick, have some bonus experience!",
    },
];

/// The outcome of one loot roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LootDraw {
    /// The entry that was drawn.
    pub entry: LootEntry,
    /// The drawn quantity, within the entry's range.
    pub quantity: u32,
}

impl LootDraw {
    /// Experience this draw grants on top of the base award.
    pub fn experience(&self) -> u32 {
        match self.entry.reward {
            LootReward::Item(_) => self.entry.bonus_exp,
            LootReward::Experience => self.quantity,
        }
    }

    /// Player-facing description of the draw.
    pub fn message(&self) -> String {
        match self.entry.reward {
            LootReward::Item(_) => format!("🎁 {} (got {})", self.entry.message, self.quantity),
            LootReward::Experience => {
                format!("✨ {} (+{} EXP)", self.entry.message, self.quantity)
            }
        }
    }
}

impl LootEntry {
    /// Draw a quantity for this entry.
    pub fn roll(&self, rng: &mut StdRng) -> LootDraw {
        LootDraw {
            entry: *self,
            quantity: rng.random_range(self.min..=self.max),
        }
    }
}

/// Draw an entry uniformly from [`LOOT_TABLE`] and roll its quantity.
pub fn roll_loot(rng: &mut StdRng) -> LootDraw {
    let entry = &LOOT_TABLE[rng.random_range(0..LOOT_TABLE.len())];
    entry.roll(rng)
}
