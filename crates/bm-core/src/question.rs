use std::fmt;

use serde::{Deserialize, Serialize};

/// A division problem whose answer is always a whole number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// The number being divided.
    pub dividend: u32,
    /// The number to divide by.
    pub divisor: u32,
    /// The exact quotient.
    pub answer: u32,
}

impl Question {
    /// Build a question from a divisor and the quotient it should produce.
    ///
    /// # Panics
    ///
    /// If the dividend does not fit in a `u32`. Use [`Question::try_new`]
    /// for values that are not known to be small.
    pub fn new(divisor: u32, answer: u32) -> Self {
        Self {
            dividend: divisor * answer,
            divisor,
            answer,
        }
    }

    /// Like [`Question::new`], but `None` when the dividend overflows.
    pub fn try_new(divisor: u32, answer: u32) -> Option<Self> {
        Some(Self {
            dividend: divisor.checked_mul(answer)?,
            divisor,
            answer,
        })
    }

    /// Whether `dividend == divisor * answer` holds.
    pub fn is_consistent(&self) -> bool {
        self.divisor.checked_mul(self.answer) == Some(self.dividend)
    }

    /// The question as shown to the player, e.g. `21 ÷ 3 = ?`.
    pub fn prompt(&self) -> String {
        format!("{self} = ?")
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ÷ {}", self.dividend, self.divisor)
    }
}
