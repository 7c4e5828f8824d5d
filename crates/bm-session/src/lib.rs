//! Quiz sessions for Blockmath.
//!
//! Drives ten-question division sessions: presents each question with its
//! choices, retries wrong answers, awards loot through the progression
//! engine, keeps the session and question clocks, and files finished
//! sessions into the persisted history. Display goes through a
//! [`RenderSink`]; time comes from a [`Clock`]; delayed and periodic work
//! runs on an explicit [`Scheduler`] the caller pumps with [`Game::tick`].

pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod quiz;
pub mod rating;
pub mod render;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GameConfig;
pub use error::{QuizError, QuizResult};
pub use game::Game;
pub use history::HistoryStore;
pub use quiz::{QuizContext, QuizSession, SessionState, SubmitOutcome};
pub use rating::Rating;
pub use render::{RecordingSink, RenderCommand, RenderSink};
pub use scheduler::{Scheduler, TaskId, TimerTask};
