//! Division question generation.
//!
//! The quotient is drawn first, then the divisor; the dividend is their
//! product, so every question divides evenly.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::rngs::StdRng;

use bm_core::{Question, TopicRule};

use crate::error::{MechError, MechResult};

/// Draw one question from a topic rule.
pub fn generate(rule: &TopicRule, rng: &mut StdRng) -> MechResult<Question> {
    let quotient = draw(&rule.quotient, rng);
    let divisor = draw(&rule.divisor, rng);
    Question::try_new(divisor, quotient).ok_or(MechError::DividendOverflow { divisor, quotient })
}

// An inverted range collapses to its start instead of panicking.
fn draw(range: &RangeInclusive<u32>, rng: &mut StdRng) -> u32 {
    if range.is_empty() {
        *range.start()
    } else {
        rng.random_range(range.clone())
    }
}

/// Draw `n` independent questions. Duplicates are allowed.
pub fn generate_many(rule: &TopicRule, n: usize, rng: &mut StdRng) -> MechResult<Vec<Question>> {
    (0..n).map(|_| generate(rule, rng)).collect()
}
