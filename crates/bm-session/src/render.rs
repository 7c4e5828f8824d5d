//! Display commands and the sink that receives them.
//!
//! The session never touches a screen. It describes what should be shown
//! as [`RenderCommand`]s; a frontend implements [`RenderSink`] to draw them.

use bm_core::{
    CharacterProfile, HistoryEntry, ItemKind, Progress, Question, SessionResult, format_duration,
};

use crate::rating::Rating;

/// Tone of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Informational.
    Neutral,
    /// The answer was right.
    Correct,
    /// The answer was wrong, or the question cannot be played.
    Wrong,
}

/// A feedback message under the question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Tone of the message.
    pub kind: FeedbackKind,
    /// Message lines, in display order.
    pub lines: Vec<String>,
}

impl Feedback {
    /// A single-line message.
    pub fn new(kind: FeedbackKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            lines: vec![text.into()],
        }
    }

    /// The lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Where an option stands on the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceState {
    /// Not tried yet.
    Untried,
    /// Tried and wrong; stays disabled for this question.
    Wrong,
    /// The accepted answer.
    Correct,
}

/// One option button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceView {
    /// The value the option submits.
    pub value: u32,
    /// Whether the option can be picked right now.
    pub enabled: bool,
    /// Outcome so far.
    pub state: ChoiceState,
}

/// The current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// One-based question number.
    pub number: usize,
    /// Questions in the session.
    pub total: usize,
    /// Text such as `21 ÷ 3 = ?`.
    pub prompt: String,
}

/// Both running clocks, formatted as `m:ss`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerView {
    /// Time since the session started.
    pub total: String,
    /// Time since the current question appeared.
    pub question: String,
}

/// A character's level, experience, and items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    /// Display name.
    pub name: String,
    /// Avatar glyph.
    pub avatar: String,
    /// Current level.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Experience the next level costs.
    pub next_level_at: u32,
    /// Item counts in display order.
    pub items: Vec<(ItemKind, u32)>,
}

impl StatsView {
    /// Describe a character's progress.
    pub fn new(profile: &CharacterProfile, progress: &Progress) -> Self {
        Self {
            name: profile.name.to_string(),
            avatar: profile.avatar.to_string(),
            level: progress.level,
            experience: progress.experience,
            next_level_at: progress.threshold(),
            items: ItemKind::ALL
                .iter()
                .map(|kind| (*kind, progress.item_count(*kind)))
                .collect(),
        }
    }
}

/// One answered question in a results or history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    /// One-based question number.
    pub number: usize,
    /// The division, e.g. `21 ÷ 3`.
    pub question: String,
    /// The correct answer.
    pub answer: u32,
    /// Time spent, `m:ss`.
    pub time: String,
}

impl DetailRow {
    fn rows<'a>(attempts: impl Iterator<Item = (&'a Question, u64)>) -> Vec<DetailRow> {
        attempts
            .enumerate()
            .map(|(i, (q, ms))| DetailRow {
                number: i + 1,
                question: q.to_string(),
                answer: q.answer,
                time: format_duration(ms),
            })
            .collect()
    }
}

/// The end-of-session screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    /// Who played.
    pub character: String,
    /// Topic display name.
    pub topic: String,
    /// Total time, `m:ss`.
    pub total_time: String,
    /// Score as `correct/questions`.
    pub score: String,
    /// Verdict on the session.
    pub rating: Rating,
    /// Resolved attempts.
    pub rows: Vec<DetailRow>,
}

impl ResultsView {
    /// Describe a finished session.
    pub fn new(character: &str, topic: &str, result: &SessionResult) -> Self {
        Self {
            character: character.to_string(),
            topic: topic.to_string(),
            total_time: format_duration(result.total_ms),
            score: format!("{}/{}", result.correct, result.questions),
            rating: Rating::of(result),
            rows: DetailRow::rows(result.attempts.iter().map(|a| (&a.question, a.elapsed_ms))),
        }
    }
}

/// One history entry as a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    /// Position in the stored history, for toggling.
    pub index: usize,
    /// Date played.
    pub date: String,
    /// Topic display name.
    pub topic: String,
    /// Score as `correct/questions`.
    pub score: String,
    /// Total time, `m:ss`.
    pub time: String,
    /// Whether the details are expanded.
    pub details_visible: bool,
    /// Per-question details.
    pub details: Vec<DetailRow>,
}

/// A character's history, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryView {
    /// Whose history this is.
    pub character: String,
    /// Entries, most recent first.
    pub rows: Vec<HistoryRow>,
}

impl HistoryView {
    /// Shown when a character has no entries.
    pub const EMPTY_MESSAGE: &'static str = "No records yet, go explore!";

    /// Build rows from `(stored index, entry)` pairs.
    pub fn new(character: &str, entries: &[(usize, &HistoryEntry)]) -> Self {
        let rows = entries
            .iter()
            .map(|(index, e)| HistoryRow {
                index: *index,
                date: e.date.to_string(),
                topic: e.topic.clone(),
                score: e.score(),
                time: format_duration(e.total_ms),
                details_visible: e.details_visible,
                details: DetailRow::rows(e.details.iter().map(|a| (&a.question, a.elapsed_ms))),
            })
            .collect();
        Self {
            character: character.to_string(),
            rows,
        }
    }
}

/// Something to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Show a new current question.
    Question(QuestionView),
    /// Show the option buttons.
    Choices(Vec<ChoiceView>),
    /// Show a feedback message.
    Feedback(Feedback),
    /// Refresh the clocks.
    Timers(TimerView),
    /// Show a character's stats.
    Stats(StatsView),
    /// Show the end-of-session screen.
    Results(ResultsView),
    /// Show a character's history.
    History(HistoryView),
}

/// Receives display commands.
pub trait RenderSink {
    /// Display one command.
    fn render(&mut self, command: RenderCommand);
}

/// A sink that keeps every command it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    commands: Vec<RenderCommand>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything rendered so far.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// The most recent feedback message.
    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::Feedback(f) => Some(f),
            _ => None,
        })
    }

    /// The most recent option set.
    pub fn last_choices(&self) -> Option<&[ChoiceView]> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::Choices(c) => Some(c.as_slice()),
            _ => None,
        })
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }
}
