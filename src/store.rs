//! Persisted key-value store: the port every stateful component reads and
//! writes through, plus the JSON-file adapter used in production.
//!
//! Values are strings; structured values are serialized to JSON before
//! storage via [`StoreExt`]. A value that is absent or fails to parse is
//! treated as no prior state, never as an error.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Keys the workflow writes. Deleting all of them is a full reset.
pub mod keys {
    pub const STATUS: &str = "status";
    pub const TRANSCRIPT: &str = "transcript";
    pub const SUMMARY: &str = "summary";
    pub const QUIZZES: &str = "quizzes";
    pub const USER_ANSWERS: &str = "userAnswers";
    pub const SHOW_RESULTS: &str = "showResults";

    pub const ALL: [&str; 6] = [
        STATUS,
        TRANSCRIPT,
        SUMMARY,
        QUIZZES,
        USER_ANSWERS,
        SHOW_RESULTS,
    ];
}

/// Synchronous string key-value store scoped to one install.
///
/// `set` and `delete` are fire-and-forget; adapters swallow write failures.
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn delete(&self, key: &str);
}

/// Typed JSON accessors over a [`Store`].
pub trait StoreExt: Store {
    /// Read and parse a JSON value. Absent or unparseable values yield the
    /// type's default.
    fn get_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.get(key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(raw) = serde_json::to_string(value) {
            self.set(key, &raw);
        }
    }
}

impl<S: Store + ?Sized> StoreExt for S {}

/// File-backed store: one JSON object per install, rewritten on every
/// mutation. A missing or corrupt file starts the store empty.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self {
            path,
            entries: RefCell::new(entries),
        }
    }

    fn flush(&self) {
        let entries = self.entries.borrow();
        if let Ok(raw) = serde_json::to_string_pretty(&*entries) {
            // Write failures are not surfaced; the in-memory copy stays
            // authoritative for the rest of this process.
            let _ = std::fs::write(&self.path, raw);
        }
    }
}

impl Store for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn delete(&self, key: &str) {
        if self.entries.borrow_mut().remove(key).is_some() {
            self.flush();
        }
    }
}

/// In-memory store for tests: same contract, no file.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn delete(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
