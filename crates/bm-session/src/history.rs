//! The persisted history of finished sessions.
//!
//! One list holds every character's entries in the order they were played.
//! Each append or toggle rewrites the whole list under [`HISTORY_KEY`].

use chrono::NaiveDate;

use bm_core::store::{load_json, save_json};
use bm_core::{CharacterId, HISTORY_KEY, HistoryEntry, KeyValueStore, SessionResult};

use crate::error::{QuizError, QuizResult};

/// Append-only history of finished sessions.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stored history, or start empty if it is missing or malformed.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            entries: load_json(store, HISTORY_KEY).unwrap_or_default(),
        }
    }

    /// File a finished session and persist. Returns the entry's index.
    pub fn append(
        &mut self,
        character: &CharacterId,
        topic_name: &str,
        date: NaiveDate,
        result: SessionResult,
        store: &mut dyn KeyValueStore,
    ) -> usize {
        self.entries.push(HistoryEntry::from_result(
            character.clone(),
            topic_name,
            date,
            result,
        ));
        self.persist(store);
        self.entries.len() - 1
    }

    /// Flip one entry's details flag and persist. Returns the new flag.
    pub fn toggle_details(
        &mut self,
        index: usize,
        store: &mut dyn KeyValueStore,
    ) -> QuizResult<bool> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(QuizError::HistoryIndexOutOfRange { index, len })?;
        entry.details_visible = !entry.details_visible;
        let visible = entry.details_visible;
        self.persist(store);
        Ok(visible)
    }

    /// A character's entries, most recent first, with their stored indices.
    pub fn list_for(&self, character: &CharacterId) -> Vec<(usize, &HistoryEntry)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, e)| &e.character == character)
            .collect()
    }

    /// Every entry in play order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self, store: &mut dyn KeyValueStore) {
        if let Err(e) = save_json(store, HISTORY_KEY, &self.entries) {
            tracing::warn!(error = %e, "failed to persist history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bm_core::{AnswerAttempt, MemoryStore, Question, SessionId};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 14).unwrap()
    }

    fn result(n: u32) -> SessionResult {
        let attempts = (1..=n)
            .map(|i| AnswerAttempt::new(Question::new(2, i), i, 1000 * i as u64))
            .collect();
        SessionResult::new(SessionId::new(), attempts, n as usize, 30_000)
    }

    fn filled(store: &mut MemoryStore) -> HistoryStore {
        let mut h = HistoryStore::new();
        h.append(&CharacterId::new("steve"), "Basics", date(), result(2), store);
        h.append(&CharacterId::new("alex"), "Basics", date(), result(3), store);
        h.append(&CharacterId::new("steve"), "Portal", date(), result(4), store);
        h
    }

    #[test]
    fn append_persists_every_time() {
        let mut store = MemoryStore::new();
        let h = filled(&mut store);
        assert_eq!(h.len(), 3);
        assert_eq!(store.writes(), 3);
        assert!(h.entries().iter().all(|e| !e.details_visible));
    }

    #[test]
    fn list_for_is_most_recent_first() {
        let mut store = MemoryStore::new();
        let h = filled(&mut store);
        let steve = h.list_for(&CharacterId::new("steve"));
        let indices: Vec<usize> = steve.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![2, 0]);
        assert_eq!(steve[0].1.topic, "Portal");
        // Stored order is untouched.
        assert_eq!(h.entries()[0].topic, "Basics");
    }

    #[test]
    fn list_for_unknown_is_empty() {
        let mut store = MemoryStore::new();
        let h = filled(&mut store);
        assert!(h.list_for(&CharacterId::new("cat")).is_empty());
    }

    #[test]
    fn toggle_flips_only_one_entry() {
        let mut store = MemoryStore::new();
        let mut h = filled(&mut store);
        assert!(h.toggle_details(1, &mut store).unwrap());
        let flags: Vec<bool> = h.entries().iter().map(|e| e.details_visible).collect();
        assert_eq!(flags, vec![false, true, false]);
        assert!(!h.toggle_details(1, &mut store).unwrap());
        assert_eq!(store.writes(), 5);
    }

    #[test]
    fn toggle_out_of_range_changes_nothing() {
        let mut store = MemoryStore::new();
        let mut h = filled(&mut store);
        let err = h.toggle_details(3, &mut store).unwrap_err();
        assert!(matches!(
            err,
            QuizError::HistoryIndexOutOfRange { index: 3, len: 3 }
        ));
        assert_eq!(store.writes(), 3);
    }

    #[test]
    fn persisted_history_round_trips() {
        let mut store = MemoryStore::new();
        let mut h = filled(&mut store);
        h.toggle_details(2, &mut store).unwrap();

        let loaded = HistoryStore::load(&store);
        assert_eq!(loaded.entries(), h.entries());
        assert!(loaded.entries()[2].details_visible);
        assert_eq!(loaded.entries()[2].details.len(), 4);
    }

    #[test]
    fn malformed_history_loads_empty() {
        let store = MemoryStore::with_value(HISTORY_KEY, r#"{"oops": true}"#);
        assert!(HistoryStore::load(&store).is_empty());
    }
}
