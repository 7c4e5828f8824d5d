//! Error types for the mechanics engine.

use bm_core::CharacterId;

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The answer falls outside the choices a player can pick from.
    #[error("answer {answer} is outside the choice range {min}..={max}")]
    AnswerOutOfRange {
        /// The unanswerable value.
        answer: u32,
        /// Smallest offered choice.
        min: u32,
        /// Largest offered choice.
        max: u32,
    },

    /// The drawn divisor and quotient multiply past `u32::MAX`.
    #[error("{divisor} × {quotient} does not fit in a question")]
    DividendOverflow {
        /// The drawn divisor.
        divisor: u32,
        /// The drawn quotient.
        quotient: u32,
    },

    /// The character is not in the progression table.
    #[error("unknown character: {0}")]
    UnknownCharacter(CharacterId),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
