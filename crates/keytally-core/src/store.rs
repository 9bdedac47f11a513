//! Store: the in-memory tally of key presses and its JSON mirror on disk.
//!
//! The store is the single source of truth during a session; the file is a
//! lagging copy refreshed by [`TallyStore::flush`]. One mutex guards the whole
//! map, and a flush holds it for the entire write, so increments and flushes
//! are totally ordered and two flushes never interleave.

use crate::error::StoreError;
use crate::types::KeyId;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The full `KeyId → count` mapping. Sorted, so the file diffs cleanly.
pub type Tally = BTreeMap<KeyId, u64>;

/// Mode given to a tally file flushed where none existed.
#[cfg(unix)]
const DEFAULT_FILE_MODE: u32 = 0o644;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// An immutable point-in-time copy of the tally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    counts: Tally,
}

impl Snapshot {
    pub fn new(counts: Tally) -> Self {
        Self { counts }
    }

    /// Count for `id`, or 0 if the key was never pressed.
    pub fn get(&self, id: &str) -> u64 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, n| acc.saturating_add(*n))
    }

    /// Largest single count, 0 for an empty snapshot.
    pub fn max(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Entries in ascending `KeyId` order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyId, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    pub fn as_map(&self) -> &Tally {
        &self.counts
    }

    pub fn into_counts(self) -> Tally {
        self.counts
    }
}

impl FromIterator<(KeyId, u64)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (KeyId, u64)>>(iter: I) -> Self {
        Self { counts: iter.into_iter().collect() }
    }
}

// ---------------------------------------------------------------------------
// Load / flush reports
// ---------------------------------------------------------------------------

/// What [`TallyStore::load`] found on disk. Every variant other than
/// `Loaded` leaves the store empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { keys: usize },
    Missing,
    Corrupt { reason: String },
    Unreadable { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOutcome::Loaded { keys } => write!(f, "loaded {keys} keys"),
            LoadOutcome::Missing => write!(f, "no existing data"),
            LoadOutcome::Corrupt { reason } => write!(f, "existing data is corrupt ({reason})"),
            LoadOutcome::Unreadable { reason } => write!(f, "existing data is unreadable ({reason})"),
        }
    }
}

/// Summary of a successful [`TallyStore::flush`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushReport {
    pub keys: usize,
    pub total: u64,
    pub bytes: usize,
}

// ---------------------------------------------------------------------------
// TallyStore
// ---------------------------------------------------------------------------

/// Thread-safe key press tally.
///
/// Share it as `Arc<TallyStore>` between the intake loop, the persistence
/// scheduler and the session; there is no global instance.
#[derive(Debug, Default)]
pub struct TallyStore {
    counts: Mutex<Tally>,
}

impl TallyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: Tally) -> Self {
        Self { counts: Mutex::new(counts) }
    }

    // The map holds plain integers and every mutation is a single insert or
    // add, so a panic while the lock was held cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, Tally> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add one press of `id`, creating the entry at 1. Returns the new count.
    pub fn increment(&self, id: &KeyId) -> u64 {
        let mut counts = self.lock();
        match counts.get_mut(id.as_str()) {
            Some(n) => {
                *n = n.saturating_add(1);
                *n
            }
            None => {
                counts.insert(id.clone(), 1);
                1
            }
        }
    }

    /// Copy the current tally.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.lock().clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.lock().values().fold(0u64, |acc, n| acc.saturating_add(*n))
    }

    /// Replace the in-memory tally with the contents of `path`.
    ///
    /// A missing, unreadable, or malformed file is not an error: the store is
    /// cleared and the returned [`LoadOutcome`] says why.
    pub fn load(&self, path: &Path) -> LoadOutcome {
        let (counts, outcome) = match std::fs::read(path) {
            Ok(bytes) => match serde_json::from_slice::<Tally>(&bytes) {
                Ok(counts) => {
                    let keys = counts.len();
                    (counts, LoadOutcome::Loaded { keys })
                }
                Err(e) => (Tally::new(), LoadOutcome::Corrupt { reason: e.to_string() }),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (Tally::new(), LoadOutcome::Missing),
            Err(e) => (Tally::new(), LoadOutcome::Unreadable { reason: e.to_string() }),
        };

        match &outcome {
            LoadOutcome::Loaded { keys } => {
                tracing::info!(path = %path.display(), keys, "tally loaded")
            }
            LoadOutcome::Missing => {
                tracing::info!(path = %path.display(), "no tally file, starting empty")
            }
            LoadOutcome::Corrupt { reason } | LoadOutcome::Unreadable { reason } => {
                tracing::warn!(path = %path.display(), %reason, "ignoring tally file, starting empty")
            }
        }

        *self.lock() = counts;
        outcome
    }

    /// Write the whole tally to `path`, replacing any previous contents.
    ///
    /// The JSON is written to a temporary file in the same directory, synced,
    /// and renamed over `path`, so readers see either the old file or the new
    /// one. The store lock is held throughout.
    pub fn flush(&self, path: &Path) -> Result<FlushReport, StoreError> {
        let counts = self.lock();

        let mut bytes = serde_json::to_vec_pretty(&*counts)?;
        bytes.push(b'\n');

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".keytally-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| StoreError::io("create temp file in", dir, e))?;

        if let Some(perms) = target_permissions(path) {
            if let Err(e) = tmp.as_file().set_permissions(perms) {
                tracing::debug!(path = %tmp.path().display(), error = %e, "could not set tally file permissions");
            }
        }

        tmp.write_all(&bytes)
            .map_err(|e| StoreError::io("write", tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io("sync", tmp.path(), e))?;
        tmp.persist(path)
            .map_err(|e| StoreError::io("replace", path, e.error))?;

        let report = FlushReport {
            keys: counts.len(),
            total: counts.values().fold(0u64, |acc, n| acc.saturating_add(*n)),
            bytes: bytes.len(),
        };
        drop(counts);

        tracing::debug!(path = %path.display(), keys = report.keys, total = report.total, "tally flushed");
        Ok(report)
    }
}

/// Mode for a flushed file: whatever the replaced file had, else 0644 on
/// unix. Temp files start owner-only.
fn target_permissions(path: &Path) -> Option<std::fs::Permissions> {
    match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(DEFAULT_FILE_MODE))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<std::fs::Permissions> {
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
