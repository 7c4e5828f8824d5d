use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Experience needed per level: reaching level `n + 1` costs `n * BASE_EXP_TO_LEVEL`.
pub const BASE_EXP_TO_LEVEL: u32 = 100;

/// Identity key of a playable character (e.g. `"steve"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub String);

impl CharacterId {
    /// Create a character id from any string-like key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Collectible item kinds that loot can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A shiny diamond.
    Diamond,
    /// Redstone dust.
    Redstone,
    /// An iron ingot.
    Iron,
}

impl ItemKind {
    /// Every item kind, in display order.
    pub const ALL: [ItemKind; 3] = [ItemKind::Diamond, ItemKind::Redstone, ItemKind::Iron];
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diamond => write!(f, "diamond"),
            Self::Redstone => write!(f, "redstone"),
            Self::Iron => write!(f, "iron"),
        }
    }
}

/// A character's mutable progression record.
///
/// Missing fields fall back to the zero-valued defaults when deserializing,
/// so partially stored records merge onto a fresh character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Current level (always at least 1).
    pub level: u32,
    /// Item counts by kind.
    pub items: BTreeMap<ItemKind, u32>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            experience: 0,
            level: 1,
            items: ItemKind::ALL.iter().map(|kind| (*kind, 0)).collect(),
        }
    }
}

impl Progress {
    /// Experience required to leave the current level.
    pub fn threshold(&self) -> u32 {
        self.level.max(1).saturating_mul(BASE_EXP_TO_LEVEL)
    }

    /// How many of an item this character holds.
    pub fn item_count(&self, kind: ItemKind) -> u32 {
        self.items.get(&kind).copied().unwrap_or(0)
    }
}

/// A built-in playable character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterProfile {
    /// Identity key.
    pub id: CharacterId,
    /// Display name.
    pub name: &'static str,
    /// Avatar glyph shown next to the name.
    pub avatar: &'static str,
}

const ROSTER: &[(&str, &str, &str)] = &[
    ("steve", "Steve", "👤"),
    ("alex", "Alex", "👩‍🦰"),
    ("creeper", "Creeper", "💣"),
    ("skeleton", "Skeleton", "💀"),
    ("cat", "Cat", "🐱"),
];

impl CharacterProfile {
    /// All built-in characters, in selection order.
    pub fn roster() -> Vec<CharacterProfile> {
        ROSTER
            .iter()
            .map(|(key, name, avatar)| CharacterProfile {
                id: CharacterId::new(*key),
                name,
                avatar,
            })
            .collect()
    }

    /// Look up a character by key (case-insensitive).
    pub fn find(key: &str) -> CoreResult<CharacterProfile> {
        let lower = key.trim().to_lowercase();
        Self::roster()
            .into_iter()
            .find(|p| p.id.as_str() == lower)
            .ok_or_else(|| CoreError::UnknownCharacter(key.to_string()))
    }

    /// The roster name for `id`, or the raw id when it is not on the roster.
    pub fn display_name(id: &CharacterId) -> String {
        Self::find(id.as_str())
            .map(|p| p.name.to_string())
            .unwrap_or_else(|_| id.to_string())
    }
}
