//! Linear, branch-truncating undo/redo log of text revisions.
//!
//! The log always holds at least one revision and the cursor always points
//! inside it. Every mutation persists the whole state through the injected
//! storage capability; persistence failures degrade, they never propagate.

pub mod storage;

pub use storage::{FileStorage, HistoryStorage, MemoryStorage};

use crate::tone::ToneSelection;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum number of retained revisions. Appends beyond this drop the oldest
/// entries from the front.
pub const MAX_HISTORY: usize = 50;

/// One immutable snapshot of the edited text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
    /// Millisecond timestamp rendered as a string. Monotonic-ish, opaque.
    pub id: String,
    pub text: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<ToneSelection>,
}

impl Revision {
    fn now(text: String, tone: Option<ToneSelection>) -> Self {
        let created_at = Utc::now().timestamp_millis();
        Self {
            id: created_at.to_string(),
            text,
            created_at,
            tone,
        }
    }
}

/// The persisted record: the full revision log plus the cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryState {
    pub revisions: Vec<Revision>,
    pub cursor: usize,
}

impl HistoryState {
    /// A state is usable when it has at least one revision and the cursor
    /// points inside the log.
    pub fn is_valid(&self) -> bool {
        !self.revisions.is_empty() && self.cursor < self.revisions.len()
    }
}

/// The undo/redo log with its storage capability.
///
/// Callers are expected to suppress appends whose text equals the current
/// text verbatim; the store does not enforce that contract.
pub struct RevisionHistory {
    state: HistoryState,
    storage: Box<dyn HistoryStorage>,
}

impl RevisionHistory {
    /// Rehydrate from storage, falling back to a fresh single-revision state
    /// seeded with `initial_text` when nothing usable is stored.
    pub fn load_or_seed(storage: Box<dyn HistoryStorage>, initial_text: &str) -> Self {
        let state = storage
            .load()
            .filter(HistoryState::is_valid)
            .unwrap_or_else(|| HistoryState {
                revisions: vec![Revision::now(initial_text.to_string(), None)],
                cursor: 0,
            });
        Self { state, storage }
    }

    /// Append a revision, discarding any redo branch beyond the cursor first.
    pub fn add_revision(&mut self, text: &str, tone: Option<ToneSelection>) {
        self.state.revisions.truncate(self.state.cursor + 1);
        self.state
            .revisions
            .push(Revision::now(text.to_string(), tone));

        if self.state.revisions.len() > MAX_HISTORY {
            let dropped = self.state.revisions.len() - MAX_HISTORY;
            self.state.revisions.drain(..dropped);
        }
        self.state.cursor = self.state.revisions.len() - 1;
        self.persist();
    }

    /// Move the cursor one step back. No-op at the oldest revision.
    pub fn undo(&mut self) -> bool {
        if self.state.cursor > 0 {
            self.state.cursor -= 1;
            self.persist();
            true
        } else {
            false
        }
    }

    /// Move the cursor one step forward. No-op at the newest revision.
    pub fn redo(&mut self) -> bool {
        if self.state.cursor < self.state.revisions.len() - 1 {
            self.state.cursor += 1;
            self.persist();
            true
        } else {
            false
        }
    }

    /// Replace the entire log with a single revision of `text`.
    pub fn reset(&mut self, text: &str) {
        self.state = HistoryState {
            revisions: vec![Revision::now(text.to_string(), None)],
            cursor: 0,
        };
        self.persist();
    }

    pub fn current_text(&self) -> &str {
        &self.state.revisions[self.state.cursor].text
    }

    pub fn current_revision(&self) -> &Revision {
        &self.state.revisions[self.state.cursor]
    }

    pub fn revisions(&self) -> impl Iterator<Item = &Revision> {
        self.state.revisions.iter()
    }

    pub fn can_undo(&self) -> bool {
        self.state.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.state.cursor < self.state.revisions.len() - 1
    }

    pub fn len(&self) -> usize {
        self.state.revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        false // invariant: at least one revision
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    fn persist(&self) {
        self.storage.save(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::{Detail, Formality};

    fn fresh() -> RevisionHistory {
        RevisionHistory::load_or_seed(Box::new(MemoryStorage::new()), "start")
    }

    #[test]
    fn seeds_with_a_single_revision() {
        let history = fresh();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current_text(), "start");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn cursor_tracks_tail_after_every_append() {
        let mut history = fresh();
        for i in 0..10 {
            history.add_revision(&format!("rev {i}"), None);
            assert_eq!(history.cursor(), history.len() - 1);
        }
    }

    #[test]
    fn undo_then_redo_restores_prior_text() {
        let mut history = fresh();
        history.add_revision("second", None);
        let before = history.current_text().to_string();
        assert!(history.undo());
        assert_eq!(history.current_text(), "start");
        assert!(history.redo());
        assert_eq!(history.current_text(), before);
    }

    #[test]
    fn undo_at_start_and_redo_at_end_are_noops() {
        let mut history = fresh();
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn append_mid_history_truncates_redo_branch() {
        let mut history = fresh(); // [A]
        history.add_revision("B", None);
        history.add_revision("C", None); // [A,B,C]
        history.undo();
        history.undo(); // cursor on A
        history.add_revision("D", None);
        assert_eq!(history.len(), 2); // [A,D]
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current_text(), "D");
        assert!(!history.can_redo());
        history.undo();
        assert_eq!(history.current_text(), "start");
    }

    #[test]
    fn history_never_exceeds_cap_and_drops_from_front() {
        let mut history = fresh();
        for i in 0..(MAX_HISTORY + 20) {
            history.add_revision(&format!("rev {i}"), None);
        }
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.cursor(), MAX_HISTORY - 1);
        assert_eq!(history.current_text(), format!("rev {}", MAX_HISTORY + 19));
        // Oldest surviving entry is the one 49 steps back.
        while history.undo() {}
        assert_eq!(history.current_text(), format!("rev {}", 20));
    }

    #[test]
    fn reset_collapses_to_single_revision() {
        let mut history = fresh();
        history.add_revision("B", None);
        history.add_revision("C", None);
        history.reset("clean");
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current_text(), "clean");
        assert!(!history.can_undo());
    }

    #[test]
    fn tone_metadata_rides_along() {
        let mut history = fresh();
        let tone = ToneSelection::new(Formality::Formal, Detail::Detailed);
        history.add_revision("rewritten", Some(tone));
        assert_eq!(history.current_revision().tone, Some(tone));
        history.undo();
        assert_eq!(history.current_revision().tone, None);
    }

    #[test]
    fn every_mutation_persists() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        let mut history = RevisionHistory::load_or_seed(Box::new(storage), "start");
        history.add_revision("B", None);
        assert_eq!(handle.snapshot().unwrap().revisions.len(), 2);
        history.undo();
        assert_eq!(handle.snapshot().unwrap().cursor, 0);
        history.redo();
        assert_eq!(handle.snapshot().unwrap().cursor, 1);
        history.reset("Z");
        let persisted = handle.snapshot().unwrap();
        assert_eq!(persisted.revisions.len(), 1);
        assert_eq!(persisted.revisions[0].text, "Z");
    }

    #[test]
    fn rehydrates_persisted_state() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        {
            let mut history = RevisionHistory::load_or_seed(Box::new(storage), "start");
            history.add_revision("B", None);
            history.undo();
        }
        let history = RevisionHistory::load_or_seed(Box::new(handle), "ignored");
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current_text(), "start");
        assert!(history.can_redo());
    }

    #[test]
    fn invalid_stored_state_falls_back_to_seed() {
        let storage = MemoryStorage::new();
        storage.save(&HistoryState {
            revisions: vec![],
            cursor: 0,
        });
        let history = RevisionHistory::load_or_seed(Box::new(storage), "seeded");
        assert_eq!(history.current_text(), "seeded");

        let storage = MemoryStorage::new();
        storage.save(&HistoryState {
            revisions: vec![Revision::now("a".into(), None)],
            cursor: 7,
        });
        let history = RevisionHistory::load_or_seed(Box::new(storage), "seeded");
        assert_eq!(history.current_text(), "seeded");
    }
}
