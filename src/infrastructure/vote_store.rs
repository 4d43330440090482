// src/infrastructure/vote_store.rs
use crate::application::VoteStore;
use crate::constants::VOTE_RECORD_KEY;
use crate::domain::{DomainError, VoteRecord};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

/// Vote record kept as `{"votedQuestions": {...}}` in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileVoteStore {
    path: PathBuf,
}

impl JsonFileVoteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn store_error(context: &str, path: &Path, err: impl std::fmt::Display) -> DomainError {
    DomainError::StoreError(format!("{context} {}: {err}", path.display()))
}

impl VoteStore for JsonFileVoteStore {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&mut self) -> Result<VoteRecord, DomainError> {
        if !self.path.exists() {
            debug!("No vote file yet, starting empty");
            return Ok(VoteRecord::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| store_error("Failed to read", &self.path, e))?;
        if content.trim().is_empty() {
            return Ok(VoteRecord::new());
        }

        let mut document: Map<String, Value> = serde_json::from_str(&content)
            .map_err(|e| store_error("Failed to parse", &self.path, e))?;
        match document.remove(VOTE_RECORD_KEY) {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| store_error("Invalid vote record in", &self.path, e)),
            None => Ok(VoteRecord::new()),
        }
    }

    #[instrument(level = "debug", skip(self, record), fields(path = %self.path.display(), votes = record.len()))]
    fn save(&mut self, record: &VoteRecord) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| store_error("Failed to create directory for", &self.path, e))?;
        }

        let value = serde_json::to_value(record)
            .map_err(|e| store_error("Failed to encode", &self.path, e))?;
        let mut document = Map::new();
        document.insert(VOTE_RECORD_KEY.to_string(), value);
        let json = serde_json::to_string_pretty(&Value::Object(document))
            .map_err(|e| store_error("Failed to encode", &self.path, e))?;

        // Write-then-rename so a crash never leaves a truncated file
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| store_error("Failed to write", &tmp_path, e))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| store_error("Failed to replace", &self.path, e))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    record: VoteRecord,
    saves: usize,
    fail_saves: bool,
    saves_left: Option<usize>,
}

/// Process-local [`VoteStore`]. Clones share state, so a test can keep a
/// handle after handing the store to a tracker.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVoteStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: VoteRecord) -> Self {
        let store = Self::new();
        store.lock().record = record;
        store
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A poisoned lock only means a test panicked mid-save
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> VoteRecord {
        self.lock().record.clone()
    }

    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// Accept `count` more saves, then reject every later one.
    pub fn fail_saves_after(&self, count: usize) {
        self.lock().saves_left = Some(count);
    }
}

impl VoteStore for InMemoryVoteStore {
    fn load(&mut self) -> Result<VoteRecord, DomainError> {
        Ok(self.lock().record.clone())
    }

    fn save(&mut self, record: &VoteRecord) -> Result<(), DomainError> {
        let mut state = self.lock();
        let exhausted = match state.saves_left.as_mut() {
            Some(0) => true,
            Some(left) => {
                *left -= 1;
                false
            }
            None => false,
        };
        if state.fail_saves || exhausted {
            return Err(DomainError::StoreError("in-memory store rejects saves".to_string()));
        }
        state.record = record.clone();
        state.saves += 1;
        Ok(())
    }
}
