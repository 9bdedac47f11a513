//! Test builders: snapshots and throwaway tally files.
//!
//! These panic on invalid input rather than returning `Result`.

use keytally_core::{KeyId, Snapshot, Tally, TallyStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SnapshotBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Snapshot`] fixtures.
///
/// ```rust
/// let snap = SnapshotBuilder::new().key("a", 5).key("Key.space", 40).build();
/// ```
#[derive(Default)]
pub struct SnapshotBuilder {
    counts: Tally,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, id: &str, count: u64) -> Self {
        self.counts.insert(KeyId::new(id), count);
        self
    }

    pub fn keys(mut self, pairs: &[(&str, u64)]) -> Self {
        for (id, count) in pairs {
            self.counts.insert(KeyId::new(*id), *count);
        }
        self
    }

    pub fn build(self) -> Snapshot {
        Snapshot::new(self.counts)
    }

    pub fn into_store(self) -> TallyStore {
        TallyStore::from_counts(self.counts)
    }
}

// ---------------------------------------------------------------------------
// TallyFile
// ---------------------------------------------------------------------------

/// A tally file path inside its own temporary directory.
///
/// The directory is removed when this is dropped.
pub struct TallyFile {
    dir: tempfile::TempDir,
    path: PathBuf,
}

impl TallyFile {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("key_counts.json");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write `pairs` as a well-formed tally file.
    pub fn with_counts(self, pairs: &[(&str, u64)]) -> Self {
        let map: BTreeMap<&str, u64> = pairs.iter().copied().collect();
        let json = serde_json::to_string_pretty(&map).expect("serialize counts");
        self.with_raw(&json)
    }

    /// Write arbitrary bytes, for corrupt-file cases.
    pub fn with_raw(self, contents: &str) -> Self {
        std::fs::write(&self.path, contents).expect("write tally file");
        self
    }

    /// Parse the file as it is on disk right now.
    pub fn read(&self) -> BTreeMap<String, u64> {
        let bytes = std::fs::read(&self.path).expect("read tally file");
        serde_json::from_slice(&bytes).expect("tally file is valid JSON")
    }

    /// Everything in the directory other than the tally file itself.
    pub fn strays(&self) -> Vec<String> {
        std::fs::read_dir(self.dir.path())
            .expect("list temp dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name != "key_counts.json")
            .collect()
    }
}

impl Default for TallyFile {
    fn default() -> Self {
        Self::new()
    }
}
