//! # Catalog State
//!
//! Owns the catalog container plus the current browse filter (selected
//! category and search query), which is screen-driven state that the
//! filtered list view combines on read.

use std::sync::{Arc, Mutex};

use seojae_core::catalog::CategoryFilter;
use seojae_core::Catalog;

/// The browse filter the list/search screens drive.
#[derive(Debug, Clone, Default)]
pub struct Browse {
    /// Selected category chip ("all" sentinel by default).
    pub selected: CategoryFilter,

    /// Current search query (empty means no text filter).
    pub query: String,
}

struct CatalogInner {
    catalog: Catalog,
    browse: Browse,
}

/// Application-owned catalog state.
///
/// Catalog and browse filter live under one lock because the filtered
/// view reads both atomically.
#[derive(Clone)]
pub struct CatalogState {
    inner: Arc<Mutex<CatalogInner>>,
}

impl CatalogState {
    /// Creates catalog state from an initial (seeded) catalog.
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            inner: Arc::new(Mutex::new(CatalogInner {
                catalog,
                browse: Browse::default(),
            })),
        }
    }

    /// Executes a function with read access to the catalog and the browse
    /// filter.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let titles = catalog_state.with(|catalog, browse| {
    ///     catalog.search(&browse.query, browse.selected).len()
    /// });
    /// ```
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog, &Browse) -> R,
    {
        let inner = self.inner.lock().expect("Catalog mutex poisoned");
        f(&inner.catalog, &inner.browse)
    }

    /// Executes a function with write access to the catalog and the browse
    /// filter.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog, &mut Browse) -> R,
    {
        let mut inner = self.inner.lock().expect("Catalog mutex poisoned");
        let CatalogInner { catalog, browse } = &mut *inner;
        f(catalog, browse)
    }
}
