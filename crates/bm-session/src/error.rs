//! Error types for quiz sessions.

use thiserror::Error;

/// Result type for session operations.
pub type QuizResult<T> = Result<T, QuizError>;

/// Errors that can occur while driving a quiz session.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Starting requires both a character and a topic.
    #[error("select a character and a topic first")]
    NotReady,

    /// The action needs a selected character.
    #[error("no character selected")]
    NoCharacterSelected,

    /// Answers are only accepted while a question is open.
    #[error("no question is open")]
    NotInProgress,

    /// The current question was answered and the next one is pending.
    #[error("waiting for the next question")]
    AwaitingAdvance,

    /// The current question cannot be answered; restart the session.
    #[error("question {number} cannot be answered, restart the game")]
    QuestionBlocked {
        /// One-based question number.
        number: usize,
    },

    /// The value is not one of the offered choices.
    #[error("{0} is not one of the choices")]
    ChoiceOutOfRange(u32),

    /// The choice was already tried on this question.
    #[error("{0} was already tried")]
    ChoiceDisabled(u32),

    /// No history entry exists at this index.
    #[error("no history entry at index {index} ({len} entries)")]
    HistoryIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of stored entries.
        len: usize,
    },

    /// Core lookup error.
    #[error(transparent)]
    Core(#[from] bm_core::CoreError),

    /// Mechanics engine error.
    #[error(transparent)]
    Mechanics(#[from] bm_mechanics::MechError),
}
