//! Persistent pseudonym map storage
//!
//! The pseudonym map ties `"<prefix>|<original>"` keys to generated
//! pseudonyms so the same value anonymizes identically across runs. It is
//! loaded as a whole, mutated in memory, and written back as a whole.
//!
//! Loading is best-effort: a missing or unreadable document yields an empty
//! map. Saving is the one failure that propagates.
//!
//! No locking is done. Two processes flushing the same file race and the last
//! writer wins; callers that run concurrently must serialize access or use
//! separate stores.

use crate::domain::{CheckerError, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Build the map key for a prefix and original value
pub fn pseudonym_key(prefix: &str, value: &str) -> String {
    format!("{prefix}|{value}")
}

/// Append-only key to pseudonym table with a dirty flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PseudonymMap {
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl PseudonymMap {
    /// Create an empty, clean map
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap entries loaded from storage; the result is clean
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries,
            dirty: false,
        }
    }

    /// Stored pseudonym for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Return the stored pseudonym, generating and recording one if absent
    ///
    /// Existing entries are never revised.
    pub fn get_or_insert_with<F>(&mut self, key: String, generate: F) -> &str
    where
        F: FnOnce() -> String,
    {
        let dirty = &mut self.dirty;
        self.entries.entry(key).or_insert_with(|| {
            *dirty = true;
            generate()
        })
    }

    /// Number of stored mappings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no mappings
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if mappings were added since load
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// All mappings in key order
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// Storage backend for the pseudonym map
pub trait PseudonymStore: Send + Sync {
    /// Load the persisted map; never fails, falls back to an empty map
    fn load(&self) -> PseudonymMap;

    /// Replace the persisted map with `map`
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Persistence`] if the map cannot be written.
    fn save(&self, map: &PseudonymMap) -> Result<()>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

/// JSON document store: `{ "<prefix>|<value>": "<pseudonym>", ... }`
///
/// # Examples
///
/// ```no_run
/// use privacy_checker::anonymization::store::{JsonFileStore, PseudonymStore};
///
/// let store = JsonFileStore::new("output/anonymization_map.json");
/// let map = store.load();
/// println!("{} known pseudonyms", map.len());
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl PseudonymStore for JsonFileStore {
    fn load(&self) -> PseudonymMap {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No pseudonym map found, starting empty");
            return PseudonymMap::new();
        }

        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read pseudonym map, starting empty"
                );
                return PseudonymMap::new();
            }
        };

        match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
            Ok(entries) => {
                tracing::debug!(
                    path = %self.path.display(),
                    entries = entries.len(),
                    "Loaded pseudonym map"
                );
                PseudonymMap::from_entries(entries)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Pseudonym map is not valid JSON, starting empty"
                );
                PseudonymMap::new()
            }
        }
    }

    fn save(&self, map: &PseudonymMap) -> Result<()> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(dir).map_err(|e| {
            CheckerError::Persistence(format!(
                "Failed to create pseudonym map directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        // Write next to the target so the final rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            CheckerError::Persistence(format!(
                "Failed to create temporary file in {}: {}",
                dir.display(),
                e
            ))
        })?;

        serde_json::to_writer_pretty(&mut tmp, map.entries()).map_err(|e| {
            CheckerError::Persistence(format!("Failed to serialize pseudonym map: {e}"))
        })?;
        tmp.write_all(b"\n")
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| {
                CheckerError::Persistence(format!("Failed to write pseudonym map: {e}"))
            })?;

        tmp.persist(&self.path).map_err(|e| {
            CheckerError::Persistence(format!(
                "Failed to replace pseudonym map {}: {}",
                self.path.display(),
                e.error
            ))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            entries = map.len(),
            "Pseudonym map saved"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process store for isolated runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored mappings
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PseudonymStore for MemoryStore {
    fn load(&self) -> PseudonymMap {
        PseudonymMap::from_entries(self.snapshot())
    }

    fn save(&self, map: &PseudonymMap) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *entries = map.entries().clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// One invocation's use of a store
///
/// The map is loaded on first access and written back by [`finish`] only when
/// persistence is enabled and new mappings were added. Dropping a session
/// without calling [`finish`] writes nothing. With persistence disabled the
/// session works on a fresh in-memory map and never touches the store.
///
/// [`finish`]: PseudonymSession::finish
pub struct PseudonymSession<'s> {
    store: &'s dyn PseudonymStore,
    persist: bool,
    map: Option<PseudonymMap>,
}

impl<'s> PseudonymSession<'s> {
    /// Open a session; nothing is read until the map is first needed
    pub fn new(store: &'s dyn PseudonymStore, persist: bool) -> Self {
        Self {
            store,
            persist,
            map: None,
        }
    }

    /// The session's map, loading it on first use
    pub fn map_mut(&mut self) -> &mut PseudonymMap {
        let store = self.store;
        let persist = self.persist;
        self.map.get_or_insert_with(|| {
            if persist {
                store.load()
            } else {
                PseudonymMap::new()
            }
        })
    }

    /// Returns true if the map was loaded during this session
    pub fn is_loaded(&self) -> bool {
        self.map.is_some()
    }

    /// Close the session, flushing the map if it changed
    ///
    /// Returns whether the store was written.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Persistence`] if the flush fails.
    pub fn finish(self) -> Result<bool> {
        match self.map {
            Some(mut map) if self.persist && map.is_dirty() => {
                self.store.save(&map)?;
                map.mark_clean();
                tracing::info!(
                    store = %self.store.describe(),
                    entries = map.len(),
                    "Pseudonym map flushed"
                );
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
