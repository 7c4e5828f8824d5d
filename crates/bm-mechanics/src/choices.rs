//! The multiple-choice option set.
//!
//! Every question offers the same ascending options regardless of its
//! answer. An answer the options cannot contain makes the question
//! unanswerable, which is reported instead of producing a broken set.

use crate::error::{MechError, MechResult};

/// Smallest offered choice.
pub const CHOICE_MIN: u32 = 1;
/// Largest offered choice.
pub const CHOICE_MAX: u32 = 20;

/// The options offered for a question with the given answer.
pub fn choices(correct_answer: u32) -> MechResult<Vec<u32>> {
    if !(CHOICE_MIN..=CHOICE_MAX).contains(&correct_answer) {
        return Err(MechError::AnswerOutOfRange {
            answer: correct_answer,
            min: CHOICE_MIN,
            max: CHOICE_MAX,
        });
    }
    Ok((CHOICE_MIN..=CHOICE_MAX).collect())
}
