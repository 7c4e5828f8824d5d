//! Game mechanics for Blockmath.
//!
//! Draws division questions from a topic rule, provides the fixed choice
//! set, rolls loot, and runs the experience/leveling engine that owns the
//! character progression table.

pub mod choices;
pub mod engine;
pub mod error;
pub mod generate;
pub mod loot;
pub mod progression;

pub use choices::{CHOICE_MAX, CHOICE_MIN, choices};
pub use engine::{LootFeedback, ProgressionEngine};
pub use error::{MechError, MechResult};
pub use generate::{generate, generate_many};
pub use loot::{LOOT_TABLE, LootDraw, LootEntry, LootReward, roll_loot};
pub use progression::{BASE_EXP_PER_CORRECT, LevelUp, gain_experience};
