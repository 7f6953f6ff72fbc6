//! High-score persistence collaborator
//!
//! The engine itself only emits [`PlacementEvent`]s; this module turns them
//! into persisted `(score, timestamp, mode)` records keyed by an opaque id.
//! [`ScoreTracker`] creates one record at session start and updates it after
//! every commit, so a crash still leaves the latest score on disk.
//!
//! [`PlacementEvent`]: crate::core::session::PlacementEvent

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Mode;

/// Opaque persisted-entry key
pub type HighScoreId = u64;

/// One persisted score record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: f64,
    /// Unix timestamp in milliseconds
    pub date_ms: u64,
    pub mode: Mode,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("unknown high score id: {0}")]
    UnknownId(HighScoreId),
}

/// Storage surface the engine's surroundings depend on: create, update,
/// and list-sorted-with-limit, all keyed by [`HighScoreId`].
pub trait HighScoreStore {
    fn create(&mut self, entry: HighScore) -> Result<HighScoreId, StoreError>;
    fn update(&mut self, id: HighScoreId, entry: HighScore) -> Result<(), StoreError>;
    /// Best scores first, at most `limit` entries
    fn list_top(&self, limit: usize) -> Result<Vec<(HighScoreId, HighScore)>, StoreError>;
}

/// In-memory store (tests, ephemeral sessions)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    next_id: HighScoreId,
    entries: BTreeMap<HighScoreId, HighScore>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sorted_top(&self, limit: usize) -> Vec<(HighScoreId, HighScore)> {
        let mut all: Vec<(HighScoreId, HighScore)> =
            self.entries.iter().map(|(&id, &e)| (id, e)).collect();
        all.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));
        all.truncate(limit);
        all
    }
}

impl HighScoreStore for MemoryStore {
    fn create(&mut self, entry: HighScore) -> Result<HighScoreId, StoreError> {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, entry);
        Ok(id)
    }

    fn update(&mut self, id: HighScoreId, entry: HighScore) -> Result<(), StoreError> {
        match self.entries.get_mut(&id) {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => Err(StoreError::UnknownId(id)),
        }
    }

    fn list_top(&self, limit: usize) -> Result<Vec<(HighScoreId, HighScore)>, StoreError> {
        Ok(self.sorted_top(limit))
    }
}

/// JSON-file-backed store. Loads eagerly on open, rewrites the whole file
/// on every mutation (the table is a handful of entries).
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open (or create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries: BTreeMap<HighScoreId, HighScore> = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        let next_id = entries.keys().next_back().map_or(0, |&max| max + 1);
        debug!("opened high score store {:?} with {} entries", path, entries.len());
        Ok(Self {
            path,
            inner: MemoryStore { next_id, entries },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.inner.entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl HighScoreStore for JsonFileStore {
    fn create(&mut self, entry: HighScore) -> Result<HighScoreId, StoreError> {
        let id = self.inner.create(entry)?;
        self.persist()?;
        info!("high score entry {id} created ({:.1}, {})", entry.score, entry.mode.as_str());
        Ok(id)
    }

    fn update(&mut self, id: HighScoreId, entry: HighScore) -> Result<(), StoreError> {
        self.inner.update(id, entry)?;
        self.persist()?;
        Ok(())
    }

    fn list_top(&self, limit: usize) -> Result<Vec<(HighScoreId, HighScore)>, StoreError> {
        self.inner.list_top(limit)
    }
}

/// Session-to-store glue: creates one record on the first commit of a
/// session and updates it on every subsequent one.
#[derive(Debug)]
pub struct ScoreTracker<S: HighScoreStore> {
    store: S,
    mode: Mode,
    current: Option<HighScoreId>,
}

impl<S: HighScoreStore> ScoreTracker<S> {
    pub fn new(store: S, mode: Mode) -> Self {
        Self {
            store,
            mode,
            current: None,
        }
    }

    /// Record the session's running score (called after each commit)
    pub fn record(&mut self, score: f64, date_ms: u64) -> Result<HighScoreId, StoreError> {
        let entry = HighScore {
            score,
            date_ms,
            mode: self.mode,
        };
        match self.current {
            Some(id) => {
                self.store.update(id, entry)?;
                Ok(id)
            }
            None => {
                let id = self.store.create(entry)?;
                self.current = Some(id);
                Ok(id)
            }
        }
    }

    /// Detach from the current record; the next `record` starts a new one
    pub fn finish_session(&mut self) {
        self.current = None;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
