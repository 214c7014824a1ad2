//! Storage capability for the revision history.
//!
//! Mirrors the shape of a browser's local storage: one serialized record
//! under one fixed location. Loading tolerates absence and corruption by
//! returning `None`; saving logs and swallows failures so a full disk never
//! breaks editing.

use super::HistoryState;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub trait HistoryStorage: Send {
    /// Load the persisted state, or `None` when missing or unreadable.
    fn load(&self) -> Option<HistoryState>;

    /// Persist the state. Failures are logged, never propagated.
    fn save(&self, state: &HistoryState);
}

/// JSON-file-backed storage, the local key-value store of the CLI.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HistoryStorage for FileStorage {
    fn load(&self) -> Option<HistoryState> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<HistoryState>(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to parse saved history: {e}");
                None
            }
        }
    }

    fn save(&self, state: &HistoryState) {
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string(state)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            fs::write(&self.path, json)
        })();
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), "failed to save history: {e}");
        }
    }
}

/// In-memory storage for tests and `--ephemeral` runs.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<HistoryState>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// What was last saved, for assertions.
    pub fn snapshot(&self) -> Option<HistoryState> {
        self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Option<HistoryState> {
        self.snapshot()
    }

    fn save(&self, state: &HistoryState) {
        *self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(state.clone());
    }
}
