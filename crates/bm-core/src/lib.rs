//! Core types for Blockmath: questions, topics, characters, and session history.
//!
//! This crate holds the data model shared by the mechanics engine and the
//! session state machine. It owns no randomness and no timers; persistence
//! goes through the [`KeyValueStore`] trait so any backend can be plugged in.

/// Answer attempts and completed-session results.
pub mod attempt;
/// Character identities, the built-in roster, and progression records.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Persisted history entries.
pub mod history;
/// Division questions.
pub mod question;
/// Key-value persistence seam and an in-memory implementation.
pub mod store;
/// Duration formatting for timers and history rows.
pub mod time;
/// Topics and their question-generation rules.
pub mod topic;

/// Re-export attempt types.
pub use attempt::{AnswerAttempt, SessionId, SessionResult};
/// Re-export character types.
pub use character::{CharacterId, CharacterProfile, ItemKind, Progress};
/// Re-export error types.
pub use error::{CoreError, CoreResult, StoreError};
/// Re-export history types.
pub use history::HistoryEntry;
/// Re-export the question type.
pub use question::Question;
/// Re-export store types.
pub use store::{CHARACTERS_KEY, HISTORY_KEY, KeyValueStore, MemoryStore};
/// Re-export time formatting.
pub use time::format_duration;
/// Re-export topic types.
pub use topic::{Topic, TopicRule};
