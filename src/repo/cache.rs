//! repo::cache
//!
//! Process-wide registry of open repository handles.
//!
//! # Invariants
//!
//! - At most one live handle exists per canonical repository root
//! - Keys are canonicalized and case-folded (host filesystems for this
//!   consumer compare paths case-insensitively)
//! - Lookups are safe under concurrent invocation from multiple caller
//!   threads
//!
//! # Concurrency
//!
//! [`RepoCache::get_or_open`] uses double-checked insertion: the map lock is
//! not held across the (potentially slow) repository open. When two callers
//! race to open the same root, the first insertion wins and the loser's
//! handle is dropped before being returned to anyone.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use crate::git::{Git, GitError};

/// A shared, per-repository-serialized handle to an open repository.
///
/// The mutex serializes queries against one repository; distinct handles
/// are used concurrently without contention.
pub type RepositoryHandle = Arc<Mutex<Git>>;

/// Registry mapping canonical repository roots to shared handles.
pub struct RepoCache {
    entries: Mutex<HashMap<String, RepositoryHandle>>,
}

impl RepoCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Get the process-wide cache instance.
    pub fn global() -> &'static RepoCache {
        static CACHE: OnceLock<RepoCache> = OnceLock::new();
        CACHE.get_or_init(RepoCache::new)
    }

    /// Compute the cache key for a root path.
    ///
    /// Canonicalizes when possible (resolving `.`/`..` and symlinks) and
    /// case-folds, so differently-spelled paths to one repository share an
    /// entry.
    fn key(root: &Path) -> String {
        let canonical = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        canonical.to_string_lossy().to_lowercase()
    }

    /// Return the handle for `root`, opening the repository on first use.
    ///
    /// Opening performs filesystem and object-database I/O and can be slow
    /// for large repositories; it runs outside the map lock so unrelated
    /// lookups are not blocked behind it.
    ///
    /// # Errors
    ///
    /// Propagates the open failure from [`Git::open`]; nothing is inserted
    /// on failure.
    pub fn get_or_open(&self, root: &Path) -> Result<RepositoryHandle, GitError> {
        let key = Self::key(root);

        {
            let entries = self.lock_entries();
            if let Some(handle) = entries.get(&key) {
                return Ok(Arc::clone(handle));
            }
        }

        // Slow path: open outside the lock, insert first-writer-wins.
        let opened: RepositoryHandle = Arc::new(Mutex::new(Git::open(root)?));

        let mut entries = self.lock_entries();
        let handle = entries.entry(key).or_insert(opened);
        Ok(Arc::clone(handle))
    }

    /// Remove the entry for `root` if present; no-op otherwise.
    ///
    /// The underlying repository is disposed once the last outstanding
    /// clone of the handle drops. This is the recovery path for stale or
    /// broken handles (repository deleted or moved): invalidate, then
    /// resolve again.
    pub fn invalidate(&self, root: &Path) {
        let key = Self::key(root);
        self.lock_entries().remove(&key);
    }

    /// Number of cached handles.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lock the entry map, recovering from a poisoned lock.
    ///
    /// The map holds no invariants beyond key uniqueness, so continuing
    /// after a panicking caller is safe.
    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, RepositoryHandle>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for RepoCache {
    fn default() -> Self {
        Self::new()
    }
}
