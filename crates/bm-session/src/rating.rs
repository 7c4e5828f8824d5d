//! End-of-session verdicts.

use std::fmt;

use bm_core::SessionResult;

/// How a finished session went, judged by score and average speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    /// Not every question was answered correctly.
    Failed,
    /// Under 10 seconds per answer.
    CommandBlock,
    /// Under 20 seconds per answer.
    GoodHaul,
    /// 20 seconds or more per answer.
    NetherSlow,
}

impl Rating {
    /// Rate a finished session.
    pub fn of(result: &SessionResult) -> Self {
        if !result.is_perfect() {
            return Self::Failed;
        }
        let avg = result.average_seconds();
        if avg < 10.0 {
            Self::CommandBlock
        } else if avg < 20.0 {
            Self::GoodHaul
        } else {
            Self::NetherSlow
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed => write!(
                f,
                "☠️ Challenge failed! The creeper exploded! Focus harder next time!"
            ),
            Self::CommandBlock => write!(f, "🔥 You're basically a command block! That was fast!"),
            Self::GoodHaul => write!(f, "⛏️ A good haul this time! Keep it up!"),
            Self::NetherSlow => write!(
                f,
                "🐢 Slow as walking through the Nether... focus and you'll be faster next time!"
            ),
        }
    }
}
