//! The game facade: selections, the running session, and persisted tables.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bm_core::{CharacterId, CharacterProfile, KeyValueStore, Topic};
use bm_mechanics::ProgressionEngine;

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::error::{QuizError, QuizResult};
use crate::history::HistoryStore;
use crate::quiz::{QuizContext, QuizSession, SubmitOutcome, render_stats};
use crate::render::{HistoryView, RenderCommand, RenderSink};

/// A player's view of the game.
///
/// Owns the store, the sink, and the clock it was built with. Loading
/// happens once in [`Game::new`]; every later mutation is written through.
pub struct Game<S, R, C> {
    config: GameConfig,
    store: S,
    render: R,
    clock: C,
    rng: StdRng,
    progression: ProgressionEngine,
    history: HistoryStore,
    session: QuizSession,
    character: Option<CharacterId>,
    topic: Option<Topic>,
}

impl<S: KeyValueStore, R: RenderSink, C: Clock> Game<S, R, C> {
    /// Load both tables from `store` and start idle.
    pub fn new(config: GameConfig, store: S, render: R, clock: C) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut master = StdRng::seed_from_u64(seed);
        let questions = StdRng::seed_from_u64(master.random::<u64>());
        let loot = StdRng::seed_from_u64(master.random::<u64>());

        let progression = ProgressionEngine::load(&store, loot);
        let history = HistoryStore::load(&store);
        tracing::debug!(seed, history = history.len(), "game loaded");

        Self {
            session: QuizSession::new(&config),
            config,
            store,
            render,
            clock,
            rng: questions,
            progression,
            history,
            character: None,
            topic: None,
        }
    }

    /// Select who plays and show their stats.
    pub fn select_character(&mut self, key: &str) -> QuizResult<CharacterProfile> {
        let profile = CharacterProfile::find(key)?;
        self.progression.progress(&profile.id)?;
        render_stats(&profile.id, &self.progression, &mut self.render);
        tracing::debug!(character = %profile.id, "character selected");
        self.character = Some(profile.id.clone());
        Ok(profile)
    }

    /// Select a built-in topic by key.
    pub fn select_topic(&mut self, key: &str) -> QuizResult<Topic> {
        let topic = Topic::find(key)?;
        self.choose_topic(topic.clone())?;
        Ok(topic)
    }

    /// Select any topic, built-in or not. Rules that cannot produce valid
    /// questions are rejected and the previous selection is kept.
    pub fn choose_topic(&mut self, topic: Topic) -> QuizResult<()> {
        topic.rule.validate()?;
        tracing::debug!(topic = %topic.key, "topic selected");
        self.topic = Some(topic);
        Ok(())
    }

    /// Whether a session can start.
    pub fn is_ready(&self) -> bool {
        self.character.is_some() && self.topic.is_some()
    }

    /// Whether there is a character whose history can be shown.
    pub fn can_view_history(&self) -> bool {
        self.character.is_some()
    }

    /// The selected character.
    pub fn selected_character(&self) -> Option<&CharacterId> {
        self.character.as_ref()
    }

    /// The selected topic.
    pub fn selected_topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }

    /// Start a session for the current selections, superseding any other.
    pub fn start(&mut self) -> QuizResult<()> {
        let character = self.character.clone();
        let topic = self.topic.clone();
        let (session, mut ctx) = self.parts();
        session.start(character.as_ref(), topic.as_ref(), &mut ctx)
    }

    /// Answer the current question.
    pub fn submit(&mut self, value: u32) -> QuizResult<SubmitOutcome> {
        let (session, mut ctx) = self.parts();
        session.submit(value, &mut ctx)
    }

    /// Run every timer that is due.
    pub fn tick(&mut self) {
        let (session, mut ctx) = self.parts();
        session.tick(&mut ctx);
    }

    /// Abandon the session and clear both selections.
    pub fn restart(&mut self) {
        self.session.reset();
        self.character = None;
        self.topic = None;
        tracing::debug!("game restarted");
    }

    /// Milliseconds until the next pending timer, if any.
    pub fn millis_until_next_timer(&self) -> Option<u64> {
        self.session
            .timers()
            .next_due()
            .map(|due| due.saturating_sub(self.clock.now_ms()))
    }

    /// Show the selected character's history, most recent first.
    pub fn show_history(&mut self) -> QuizResult<()> {
        let character = self
            .character
            .clone()
            .ok_or(QuizError::NoCharacterSelected)?;
        let name = CharacterProfile::display_name(&character);
        let view = HistoryView::new(&name, &self.history.list_for(&character));
        self.render.render(RenderCommand::History(view));
        Ok(())
    }

    /// Flip the details flag of a stored history entry. Returns the new flag.
    pub fn toggle_history_entry(&mut self, index: usize) -> QuizResult<bool> {
        let visible = self.history.toggle_details(index, &mut self.store)?;
        if self.character.is_some() {
            self.show_history()?;
        }
        Ok(visible)
    }

    /// Configuration in use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current (or last) session.
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// The character table.
    pub fn progression(&self) -> &ProgressionEngine {
        &self.progression
    }

    /// The session history.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The render sink.
    pub fn render(&self) -> &R {
        &self.render
    }

    /// The render sink, mutably.
    pub fn render_mut(&mut self) -> &mut R {
        &mut self.render
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn parts(&mut self) -> (&mut QuizSession, QuizContext<'_>) {
        (
            &mut self.session,
            QuizContext {
                progression: &mut self.progression,
                history: &mut self.history,
                store: &mut self.store,
                render: &mut self.render,
                clock: &self.clock,
                rng: &mut self.rng,
            },
        )
    }
}
