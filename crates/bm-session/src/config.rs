//! Configuration for a game.

/// Configuration for a [`crate::Game`].
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible questions and loot. Random when `None`.
    pub seed: Option<u64>,
    /// Questions per session.
    pub question_count: usize,
    /// Pause between a correct answer and the next question, in ms.
    pub advance_delay_ms: u64,
    /// Refresh interval of the total-session clock display, in ms.
    pub total_tick_ms: u64,
    /// Refresh interval of the per-question clock display, in ms.
    pub question_tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            question_count: 10,
            advance_delay_ms: 2000,
            total_tick_ms: 1000,
            question_tick_ms: 100,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of questions per session (at least 1).
    pub fn with_question_count(mut self, count: usize) -> Self {
        self.question_count = count.max(1);
        self
    }

    /// Set the pause before advancing after a correct answer.
    pub fn with_advance_delay(mut self, delay_ms: u64) -> Self {
        self.advance_delay_ms = delay_ms;
        self
    }
}
