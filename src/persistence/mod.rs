//! Save/load boundary for the leaderboard
//!
//! The core only needs [`ScoreStore`]. Backends:
//! - [`JsonFileStore`]: a JSON array in a local file (native)
//! - [`MemoryStore`]: in-process, for tests and demo runs
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::PersistError;
use crate::highscores::HighScoreEntry;

/// Where high scores are read from and written to
pub trait ScoreStore {
    /// Read saved entries. A store with no prior data returns an empty list.
    fn load(&self) -> Result<Vec<HighScoreEntry>, PersistError>;

    /// Replace the saved entries
    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), PersistError>;
}

/// High scores stored as a JSON array of `{ "name", "score" }` records
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Default file name, relative to the working directory
    pub const DEFAULT_PATH: &'static str = "highscores.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, PersistError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), PersistError> {
        let json = serde_json::to_string(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store
///
/// Clones share the same backing list, so a test can keep a handle and
/// inspect what the game saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: Vec<HighScoreEntry>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with entries
    pub fn with_entries(entries: Vec<HighScoreEntry>) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().entries = entries;
        store
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }

    /// Currently saved entries
    pub fn saved(&self) -> Vec<HighScoreEntry> {
        self.inner.borrow().entries.clone()
    }

    /// Make subsequent saves fail (simulates unwritable storage)
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.borrow_mut().fail_saves = fail;
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, PersistError> {
        Ok(self.inner.borrow().entries.clone())
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), PersistError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_saves {
            return Err(PersistError::Unavailable("memory store is read-only".into()));
        }
        inner.entries = entries.to_vec();
        inner.saves += 1;
        Ok(())
    }
}

/// Browser LocalStorage backend
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "ledge_runner_highscores";

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistError::Unavailable("LocalStorage not available".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Vec<HighScoreEntry>, PersistError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Ok(serde_json::from_str(&json)?),
            Ok(None) => Ok(Vec::new()),
            Err(_) => Err(PersistError::Unavailable("LocalStorage read failed".into())),
        }
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(entries)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| PersistError::Unavailable("LocalStorage write failed".into()))
    }
}

/// The platform's usual store: LocalStorage in the browser, a JSON file
/// in the working directory elsewhere
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn ScoreStore> {
    Box::new(LocalStorageStore)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn ScoreStore> {
    log::info!("High scores file: {}", JsonFileStore::DEFAULT_PATH);
    Box::new(JsonFileStore::default())
}
