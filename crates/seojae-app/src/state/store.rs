//! # Store State
//!
//! Wraps the `Storage` handle for injection into provider operations.
//!
//! ## Thread Safety
//! `Storage` contains a `SqlitePool`, which is inherently thread-safe;
//! no extra locking is needed here.

use seojae_store::Storage;

/// Wrapper around `Storage` for dependency injection.
///
/// ## Why a Wrapper?
/// Keeps the provider signatures uniform (every dependency is a `*State`
/// type) and gives persistence a single seam to swap in tests.
#[derive(Debug, Clone)]
pub struct StoreState {
    storage: Storage,
}

impl StoreState {
    /// Creates a new StoreState wrapping the storage handle.
    pub fn new(storage: Storage) -> Self {
        StoreState { storage }
    }

    /// Returns a reference to the inner Storage.
    pub fn inner(&self) -> &Storage {
        &self.storage
    }
}
