use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::question::Question;

/// Unique identifier of one quiz session run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// One recorded answer to a question. Never modified once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerAttempt {
    /// The question that was answered.
    pub question: Question,
    /// The value the player chose.
    pub chosen: u32,
    /// Milliseconds since the question became current.
    pub elapsed_ms: u64,
    /// Whether the chosen value was the answer.
    pub correct: bool,
}

impl AnswerAttempt {
    /// Record an attempt, deriving correctness from the question.
    pub fn new(question: Question, chosen: u32, elapsed_ms: u64) -> Self {
        Self {
            question,
            chosen,
            elapsed_ms,
            correct: chosen == question.answer,
        }
    }
}

/// Summary of a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    /// Which session produced this result.
    pub session: SessionId,
    /// Resolved attempts, one per question, in question order.
    pub attempts: Vec<AnswerAttempt>,
    /// Number of correct attempts in `attempts`.
    pub correct: usize,
    /// Number of questions the session asked.
    pub questions: usize,
    /// Milliseconds from session start to finish.
    pub total_ms: u64,
}

impl SessionResult {
    /// Build a result, counting correct attempts from the log.
    pub fn new(
        session: SessionId,
        attempts: Vec<AnswerAttempt>,
        questions: usize,
        total_ms: u64,
    ) -> Self {
        let correct = attempts.iter().filter(|a| a.correct).count();
        Self {
            session,
            attempts,
            correct,
            questions,
            total_ms,
        }
    }

    /// Whether every question was answered correctly.
    pub fn is_perfect(&self) -> bool {
        self.correct == self.questions
    }

    /// Average seconds per correct answer (total time over at least one).
    pub fn average_seconds(&self) -> f64 {
        (self.total_ms as f64 / 1000.0) / self.correct.max(1) as f64
    }
}
