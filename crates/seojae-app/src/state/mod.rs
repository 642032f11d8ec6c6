//! # State Module
//!
//! Application-owned state objects, created once at startup and threaded
//! to the UI layer by dependency injection.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything, each store
//! gets its own state type:
//!
//! 1. **Separation of concerns**: each type has a single responsibility
//! 2. **Clear operation signatures**: providers declare exactly which
//!    state they touch
//! 3. **Easier testing**: build only the states a test needs
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                               │
//! │                                                                     │
//! │  App::start(config)                                                 │
//! │     ├── StoreState    (Storage handle; pool is thread-safe)         │
//! │     ├── CatalogState  (Arc<Mutex<Catalog + browse filter>>)         │
//! │     ├── CartState     (Arc<Mutex<Cart>>)                            │
//! │     └── SessionState  (Arc<Mutex<Session>>)                         │
//! │                                                                     │
//! │  THREAD SAFETY:                                                     │
//! │  The UI event model is effectively single-threaded; the mutexes     │
//! │  make the layer safe to share regardless, and every critical        │
//! │  section is a handful of in-memory operations.                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod session;
mod store;

pub use cart::CartState;
pub use catalog::{Browse, CatalogState};
pub use session::SessionState;
pub use store::StoreState;
