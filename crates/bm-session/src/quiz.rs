//! The quiz session state machine.
//!
//! `Idle -> InProgress(0) -> ... -> InProgress(n - 1) -> Finished`. A wrong
//! answer keeps the session on the same question and disables that choice;
//! a correct answer is recorded, rewarded, and followed by a scheduled
//! advance. A question whose answer cannot be offered blocks the session
//! until the next start.

use rand::rngs::StdRng;

use bm_core::{
    AnswerAttempt, CharacterId, CharacterProfile, KeyValueStore, Question, SessionId,
    SessionResult, Topic, format_duration,
};
use bm_mechanics::{LootFeedback, ProgressionEngine, choices, generate_many};

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::error::{QuizError, QuizResult};
use crate::history::HistoryStore;
use crate::render::{
    ChoiceState, ChoiceView, Feedback, FeedbackKind, QuestionView, RenderCommand, RenderSink,
    ResultsView, StatsView, TimerView,
};
use crate::scheduler::{Scheduler, TaskId, TimerTask};

const READY_TEXT: &str = "Ready?";
const CORRECT_TEXT: &str = "✅ Correct! Handing out rewards...";
const WRONG_TEXT: &str = "❌ Wrong! Try again.";
const BLOCKED_TEXT: &str = "Failed to load the question, please restart.";

/// Everything a session touches besides its own state.
pub struct QuizContext<'a> {
    /// Owner of the character table.
    pub progression: &'a mut ProgressionEngine,
    /// Owner of the session history.
    pub history: &'a mut HistoryStore,
    /// Persistence for both tables.
    pub store: &'a mut dyn KeyValueStore,
    /// Where display commands go.
    pub render: &'a mut dyn RenderSink,
    /// Time source.
    pub clock: &'a dyn Clock,
    /// Random source for question generation.
    pub rng: &'a mut StdRng,
}

impl QuizContext<'_> {
    fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    fn show(&mut self, command: RenderCommand) {
        self.render.render(command);
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started.
    Idle,
    /// The question at `index` is current.
    InProgress {
        /// Zero-based index of the current question.
        index: usize,
    },
    /// The question at `index` cannot be answered; only a new start recovers.
    Blocked {
        /// Zero-based index of the unanswerable question.
        index: usize,
    },
    /// Every question was answered and the result filed.
    Finished,
}

/// What a submitted answer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The answer was right; the next question is scheduled.
    Correct {
        /// The recorded attempt.
        attempt: AnswerAttempt,
        /// Rewards granted.
        loot: LootFeedback,
    },
    /// The answer was wrong; the same question stays open.
    Wrong {
        /// The rejected value, now disabled.
        chosen: u32,
    },
}

/// One quiz run at a time: its questions, attempts, and timers.
#[derive(Debug)]
pub struct QuizSession {
    config: GameConfig,
    id: SessionId,
    state: SessionState,
    character: Option<CharacterId>,
    topic: Option<Topic>,
    questions: Vec<Question>,
    resolved: Vec<AnswerAttempt>,
    options: Vec<u32>,
    wrong: Vec<u32>,
    awaiting_advance: bool,
    started_at: u64,
    question_started_at: u64,
    finished_at: Option<u64>,
    timers: Scheduler,
    question_timer: Option<TaskId>,
    result: Option<SessionResult>,
}

impl QuizSession {
    /// Create an idle session.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.clone(),
            id: SessionId::new(),
            state: SessionState::Idle,
            character: None,
            topic: None,
            questions: Vec::new(),
            resolved: Vec::new(),
            options: Vec::new(),
            wrong: Vec::new(),
            awaiting_advance: false,
            started_at: 0,
            question_started_at: 0,
            finished_at: None,
            timers: Scheduler::new(),
            question_timer: None,
            result: None,
        }
    }

    /// Start a session with freshly drawn questions.
    ///
    /// Requires both a character and a topic; otherwise nothing changes.
    /// Any running session is superseded, including its pending timers.
    pub fn start(
        &mut self,
        character: Option<&CharacterId>,
        topic: Option<&Topic>,
        ctx: &mut QuizContext<'_>,
    ) -> QuizResult<()> {
        let (Some(character), Some(topic)) = (character, topic) else {
            return Err(QuizError::NotReady);
        };
        // Reject bad input before consuming randomness.
        topic.rule.validate()?;
        ctx.progression.progress(character)?;
        let questions = generate_many(&topic.rule, self.config.question_count, ctx.rng)?;
        self.start_with_questions(character, topic, questions, ctx)
    }

    /// Start a session with a prepared question list.
    pub fn start_with_questions(
        &mut self,
        character: &CharacterId,
        topic: &Topic,
        questions: Vec<Question>,
        ctx: &mut QuizContext<'_>,
    ) -> QuizResult<()> {
        if questions.is_empty() {
            return Err(QuizError::NotReady);
        }
        ctx.progression.progress(character)?;

        self.timers.clear();
        self.question_timer = None;
        self.id = SessionId::new();
        self.character = Some(character.clone());
        self.topic = Some(topic.clone());
        self.questions = questions;
        self.resolved.clear();
        self.result = None;
        self.finished_at = None;

        let now = ctx.now();
        self.started_at = now;
        self.timers
            .every(now, self.config.total_tick_ms, TimerTask::TotalClock);

        tracing::debug!(
            session = %self.id,
            character = %character,
            topic = %topic.key,
            questions = self.questions.len(),
            "session started"
        );
        self.present(0, ctx);
        Ok(())
    }

    /// Answer the current question.
    pub fn submit(&mut self, value: u32, ctx: &mut QuizContext<'_>) -> QuizResult<SubmitOutcome> {
        let index = match self.state {
            SessionState::InProgress { index } => index,
            SessionState::Blocked { index } => {
                return Err(QuizError::QuestionBlocked { number: index + 1 });
            }
            SessionState::Idle | SessionState::Finished => return Err(QuizError::NotInProgress),
        };
        if self.awaiting_advance {
            return Err(QuizError::AwaitingAdvance);
        }
        if !self.options.contains(&value) {
            return Err(QuizError::ChoiceOutOfRange(value));
        }
        if self.wrong.contains(&value) {
            return Err(QuizError::ChoiceDisabled(value));
        }

        let question = self.questions[index];
        if value != question.answer {
            self.wrong.push(value);
            tracing::debug!(session = %self.id, index, value, "wrong answer");
            ctx.show(RenderCommand::Choices(self.choices()));
            ctx.show(RenderCommand::Feedback(Feedback::new(
                FeedbackKind::Wrong,
                WRONG_TEXT,
            )));
            return Ok(SubmitOutcome::Wrong { chosen: value });
        }

        let Some(character) = self.character.clone() else {
            return Err(QuizError::NotInProgress);
        };
        let loot = ctx.progression.award_loot(&character, ctx.store)?;

        let now = ctx.now();
        let attempt = AnswerAttempt::new(
            question,
            value,
            now.saturating_sub(self.question_started_at),
        );
        self.resolved.push(attempt.clone());
        self.awaiting_advance = true;
        if let Some(id) = self.question_timer.take() {
            self.timers.cancel(id);
        }
        self.timers.once(
            now,
            self.config.advance_delay_ms,
            TimerTask::Advance {
                session: self.id,
                next_index: index + 1,
            },
        );
        tracing::debug!(
            session = %self.id,
            index,
            elapsed_ms = attempt.elapsed_ms,
            "correct answer"
        );

        let mut lines = vec![CORRECT_TEXT.to_string()];
        lines.extend(loot.messages.iter().cloned());
        ctx.show(RenderCommand::Choices(self.choices()));
        ctx.show(RenderCommand::Feedback(Feedback {
            kind: FeedbackKind::Correct,
            lines,
        }));
        render_stats(&character, ctx.progression, ctx.render);

        Ok(SubmitOutcome::Correct { attempt, loot })
    }

    /// Run every timer due now: clock refreshes and pending advances.
    pub fn tick(&mut self, ctx: &mut QuizContext<'_>) {
        for task in self.timers.take_due(ctx.now()) {
            match task {
                TimerTask::Advance {
                    session,
                    next_index,
                } => self.advance(session, next_index, ctx),
                TimerTask::TotalClock | TimerTask::QuestionClock => {
                    if matches!(self.state, SessionState::InProgress { .. }) {
                        let view = self.timer_view(ctx.now());
                        ctx.show(RenderCommand::Timers(view));
                    }
                }
            }
        }
    }

    /// Drop the session and its timers, returning to idle.
    pub fn reset(&mut self) {
        self.timers.clear();
        self.question_timer = None;
        self.state = SessionState::Idle;
        self.character = None;
        self.topic = None;
        self.questions.clear();
        self.resolved.clear();
        self.options.clear();
        self.wrong.clear();
        self.awaiting_advance = false;
        self.finished_at = None;
        self.result = None;
    }

    /// Identity of the current (or last) session.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Who is playing.
    pub fn character(&self) -> Option<&CharacterId> {
        self.character.as_ref()
    }

    /// What is being played.
    pub fn topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }

    /// All questions of the session.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The open (or blocked) question.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::InProgress { index } | SessionState::Blocked { index } => {
                self.questions.get(index)
            }
            SessionState::Idle | SessionState::Finished => None,
        }
    }

    /// The options for the current question with their states.
    pub fn choices(&self) -> Vec<ChoiceView> {
        let answer = self.current_question().map(|q| q.answer);
        self.options
            .iter()
            .map(|&value| {
                let state = if self.wrong.contains(&value) {
                    ChoiceState::Wrong
                } else if self.awaiting_advance && Some(value) == answer {
                    ChoiceState::Correct
                } else {
                    ChoiceState::Untried
                };
                ChoiceView {
                    value,
                    enabled: !self.awaiting_advance && state == ChoiceState::Untried,
                    state,
                }
            })
            .collect()
    }

    /// Attempts that resolved a question, in order.
    pub fn resolved(&self) -> &[AnswerAttempt] {
        &self.resolved
    }

    /// Whether a correct answer is waiting for the next question.
    pub fn is_awaiting_advance(&self) -> bool {
        self.awaiting_advance
    }

    /// The filed result, once finished.
    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Milliseconds since the session started (frozen once finished).
    pub fn total_elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.state {
            SessionState::Idle => 0,
            _ => self
                .finished_at
                .unwrap_or(now_ms)
                .saturating_sub(self.started_at),
        }
    }

    /// Milliseconds since the current question appeared.
    pub fn question_elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.state {
            SessionState::InProgress { .. } => now_ms.saturating_sub(self.question_started_at),
            _ => 0,
        }
    }

    /// Pending timers of this session.
    pub fn timers(&self) -> &Scheduler {
        &self.timers
    }

    fn present(&mut self, index: usize, ctx: &mut QuizContext<'_>) {
        let now = ctx.now();
        self.question_started_at = now;
        self.wrong.clear();
        self.awaiting_advance = false;
        if let Some(id) = self.question_timer.take() {
            self.timers.cancel(id);
        }

        let question = self.questions[index];
        ctx.show(RenderCommand::Question(QuestionView {
            number: index + 1,
            total: self.questions.len(),
            prompt: question.prompt(),
        }));

        match choices(question.answer) {
            Ok(options) => self.options = options,
            Err(e) => {
                tracing::error!(
                    session = %self.id,
                    index,
                    question = %question,
                    error = %e,
                    "question cannot be answered"
                );
                self.options.clear();
                self.timers.clear();
                self.state = SessionState::Blocked { index };
                ctx.show(RenderCommand::Choices(Vec::new()));
                ctx.show(RenderCommand::Feedback(Feedback::new(
                    FeedbackKind::Wrong,
                    BLOCKED_TEXT,
                )));
                return;
            }
        }

        self.state = SessionState::InProgress { index };
        self.question_timer = Some(self.timers.every(
            now,
            self.config.question_tick_ms,
            TimerTask::QuestionClock,
        ));
        ctx.show(RenderCommand::Choices(self.choices()));
        ctx.show(RenderCommand::Feedback(Feedback::new(
            FeedbackKind::Neutral,
            READY_TEXT,
        )));
        ctx.show(RenderCommand::Timers(self.timer_view(now)));
    }

    fn advance(&mut self, session: SessionId, next_index: usize, ctx: &mut QuizContext<'_>) {
        let current = matches!(
            self.state,
            SessionState::InProgress { index } if index + 1 == next_index
        );
        if session != self.id || !current || !self.awaiting_advance {
            tracing::debug!(%session, next_index, "ignoring stale advance");
            return;
        }
        if next_index >= self.questions.len() {
            self.finish(ctx);
        } else {
            self.present(next_index, ctx);
        }
    }

    fn finish(&mut self, ctx: &mut QuizContext<'_>) {
        let now = ctx.now();
        self.timers.clear();
        self.question_timer = None;
        self.awaiting_advance = false;

        let (Some(character), Some(topic)) = (self.character.clone(), self.topic.clone()) else {
            return;
        };
        let result = SessionResult::new(
            self.id,
            self.resolved.clone(),
            self.questions.len(),
            now.saturating_sub(self.started_at),
        );
        ctx.history.append(
            &character,
            &topic.name,
            ctx.clock.today(),
            result.clone(),
            ctx.store,
        );
        self.state = SessionState::Finished;
        self.finished_at = Some(now);
        self.options.clear();

        tracing::debug!(
            session = %self.id,
            correct = result.correct,
            total_ms = result.total_ms,
            "session finished"
        );
        ctx.show(RenderCommand::Results(ResultsView::new(
            &CharacterProfile::display_name(&character),
            &topic.name,
            &result,
        )));
        self.result = Some(result);
    }

    fn timer_view(&self, now: u64) -> TimerView {
        TimerView {
            total: format_duration(self.total_elapsed_ms(now)),
            question: format_duration(self.question_elapsed_ms(now)),
        }
    }
}

/// Send a character's stats to the sink, if the character is known.
pub(crate) fn render_stats(
    character: &CharacterId,
    progression: &ProgressionEngine,
    render: &mut dyn RenderSink,
) {
    if let (Ok(profile), Ok(progress)) = (
        CharacterProfile::find(character.as_str()),
        progression.progress(character),
    ) {
        render.render(RenderCommand::Stats(StatsView::new(&profile, progress)));
    }
}
