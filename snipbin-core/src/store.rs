//! Snippet persistence.
//!
//! Handlers never touch storage directly; they go through the
//! [`SnippetStore`] interface so the backing store stays an explicit
//! collaborator rather than process-wide state.

use std::sync::RwLock;

use indexmap::IndexMap;

use crate::id::SnippetId;
use crate::snippet::Snippet;

/// Repository interface for snippet records.
///
/// Each call is a single atomic operation against the backing store;
/// concurrency discipline beyond that is the store's concern.
pub trait SnippetStore: Send + Sync {
    /// Persists a freshly created snippet.
    fn create(&self, snippet: Snippet);

    /// Returns a copy of the snippet with this ID, if it exists.
    fn get(&self, id: SnippetId) -> Option<Snippet>;

    /// Returns every persisted snippet. Order is the store's insertion
    /// order; callers must not rely on it as a contract.
    fn list(&self) -> Vec<Snippet>;

    /// Replaces the record stored under `id`. Returns `false` if no such
    /// record exists (nothing is inserted in that case).
    fn update(&self, id: SnippetId, snippet: Snippet) -> bool;

    /// Removes the record stored under `id`. Returns `false` if it was
    /// already gone.
    fn delete(&self, id: SnippetId) -> bool;
}

/// Thread-safe in-memory snippet store, listing in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<IndexMap<SnippetId, Snippet>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnippetStore for MemoryStore {
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned (a previous thread
    /// panicked while holding the write lock).
    fn create(&self, snippet: Snippet) {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut entries = self.entries.write().expect("snippet store write lock poisoned");
        entries.insert(snippet.id, snippet);
    }

    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    fn get(&self, id: SnippetId) -> Option<Snippet> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let entries = self.entries.read().expect("snippet store read lock poisoned");
        entries.get(&id).cloned()
    }

    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    fn list(&self) -> Vec<Snippet> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let entries = self.entries.read().expect("snippet store read lock poisoned");
        entries.values().cloned().collect()
    }

    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    fn update(&self, id: SnippetId, snippet: Snippet) -> bool {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut entries = self.entries.write().expect("snippet store write lock poisoned");
        match entries.get_mut(&id) {
            Some(slot) => {
                *slot = snippet;
                true
            }
            None => false,
        }
    }

    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    fn delete(&self, id: SnippetId) -> bool {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut entries = self.entries.write().expect("snippet store write lock poisoned");
        entries.shift_remove(&id).is_some()
    }
}
