use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attempt::{AnswerAttempt, SessionId, SessionResult};
use crate::character::CharacterId;

fn default_questions() -> usize {
    10
}

/// One completed session, as kept in a character's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The session this entry summarizes.
    #[serde(default)]
    pub session: SessionId,
    /// Who played.
    pub character: CharacterId,
    /// Display name of the topic played.
    pub topic: String,
    /// Calendar date the session finished.
    pub date: NaiveDate,
    /// Total session time in milliseconds.
    pub total_ms: u64,
    /// Correctly answered questions.
    pub correct: usize,
    /// Questions asked in the session.
    #[serde(default = "default_questions")]
    pub questions: usize,
    /// Resolved attempts in question order.
    pub details: Vec<AnswerAttempt>,
    /// Whether the per-question details are expanded. Display state only.
    #[serde(default)]
    pub details_visible: bool,
}

impl HistoryEntry {
    /// Build a collapsed entry from a finished session.
    pub fn from_result(
        character: CharacterId,
        topic: impl Into<String>,
        date: NaiveDate,
        result: SessionResult,
    ) -> Self {
        Self {
            session: result.session,
            character,
            topic: topic.into(),
            date,
            total_ms: result.total_ms,
            correct: result.correct,
            questions: result.questions,
            details: result.attempts,
            details_visible: false,
        }
    }

    /// Score as `correct/questions`.
    pub fn score(&self) -> String {
        format!("{}/{}", self.correct, self.questions)
    }
}
