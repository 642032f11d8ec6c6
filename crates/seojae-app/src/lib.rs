//! # Seojae Application Layer
//!
//! Wires the state layer together and exposes the operation surface a UI
//! shell embeds.
//!
//! ## Module Organization
//! ```text
//! seojae_app/
//! ├── lib.rs          ◄─── You are here (App lifecycle)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Storage handle wrapper
//! │   ├── catalog.rs  ◄─── Catalog + browse filter state
//! │   ├── cart.rs     ◄─── Cart state
//! │   └── session.rs  ◄─── Session state
//! ├── api/
//! │   ├── catalog.rs  ◄─── Browse views, admin CRUD
//! │   ├── cart.rs     ◄─── Cart operations
//! │   ├── session.rs  ◄─── Login/register/logout/profile
//! │   ├── review.rs   ◄─── Per-book reviews
//! │   └── purchase.rs ◄─── Checkout + history
//! ├── seed.rs         ◄─── Built-in sample catalog
//! └── error.rs        ◄─── Provider error type
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                           │
//! │                                                                     │
//! │  1. Shell calls init_tracing() ───────────────────────────────────► │
//! │     • tracing-subscriber with env filter                            │
//! │     • Default INFO, override with RUST_LOG                          │
//! │                                                                     │
//! │  2. App::start(AppConfig) ────────────────────────────────────────► │
//! │     • Open the key-value store (WAL SQLite, migration)              │
//! │     • Load `user` and `cart` ONCE; failures fall back to empty      │
//! │     • Seed the in-memory catalog                                    │
//! │                                                                     │
//! │  3. Shell threads the state objects to its screens ───────────────► │
//! │     • app.catalog(), app.cart(), app.session(), app.store()         │
//! │     • Screens invoke api::* operations with exactly those states    │
//! │                                                                     │
//! │  4. App::shutdown() on exit ──────────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod error;
pub mod seed;
pub mod state;

use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use seojae_core::cart::CartLine;
use seojae_core::{Cart, Catalog, Session, User};
use seojae_store::{keys, Storage, StoreConfig};

pub use error::{ApiError, ErrorCode};
use state::{CartState, CatalogState, SessionState, StoreState};

// =============================================================================
// Configuration
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Durable store settings.
    pub store: StoreConfig,
}

impl AppConfig {
    /// Configuration for a database at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AppConfig {
            store: StoreConfig::new(path),
        }
    }

    /// In-memory configuration (tests, previews).
    pub fn in_memory() -> Self {
        AppConfig {
            store: StoreConfig::in_memory(),
        }
    }
}

/// Determines the database file path for this platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/kr.seojae.seojae/seojae.db`
/// - **Windows**: `%APPDATA%\seojae\seojae\data\seojae.db`
/// - **Linux**: `~/.local/share/seojae/seojae.db`
///
/// ## Development Override
/// Set the `SEOJAE_DB_PATH` environment variable to use a custom path.
pub fn default_database_path() -> Result<PathBuf, ApiError> {
    if let Ok(path) = std::env::var("SEOJAE_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    // The application component alone names the Linux data dir, so it has
    // to be distinctive, not a generic "app".
    let proj_dirs = directories::ProjectDirs::from("kr", "seojae", "seojae")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .map_err(|e| ApiError::internal(format!("Could not create data directory: {}", e)))?;

    Ok(data_dir.join("seojae.db"))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show debug messages
/// - `RUST_LOG=seojae=trace` - trace for seojae crates only
/// - Default: INFO
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,seojae=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// =============================================================================
// App
// =============================================================================

/// The application: one instance owns every state object.
///
/// Created at shell startup, dropped (after [`App::shutdown`]) at exit.
/// The state accessors hand out the objects the provider operations take;
/// all of them are cheaply cloneable if the shell prefers owned handles.
pub struct App {
    store: StoreState,
    catalog: CatalogState,
    cart: CartState,
    session: SessionState,
}

impl App {
    /// Starts the state layer.
    ///
    /// ## What This Does
    /// 1. Opens the key-value store (creating file and schema on first run)
    /// 2. Loads the persisted session and cart, once; a failed or corrupt
    ///    read logs an error and falls back to empty, the app still starts
    /// 3. Seeds the in-memory catalog
    pub async fn start(config: AppConfig) -> Result<App, ApiError> {
        info!("Starting Seojae state layer");

        let storage = Storage::new(config.store).await?;

        let user = match storage.get::<User>(keys::USER).await {
            Ok(user) => user,
            Err(err) => {
                error!(error = %err, "Failed to load persisted user; starting anonymous");
                None
            }
        };

        let lines = match storage.get::<Vec<CartLine>>(keys::CART).await {
            Ok(lines) => lines.unwrap_or_default(),
            Err(err) => {
                error!(error = %err, "Failed to load persisted cart; starting empty");
                Vec::new()
            }
        };

        let catalog = Catalog::with_books(seed::sample_books());
        info!(
            books = catalog.len(),
            restored_user = user.is_some(),
            restored_cart_lines = lines.len(),
            "State initialized"
        );

        Ok(App {
            store: StoreState::new(storage),
            catalog: CatalogState::new(catalog),
            cart: CartState::new(Cart::from_lines(lines)),
            session: SessionState::new(Session::from_user(user)),
        })
    }

    /// The storage state object.
    pub fn store(&self) -> &StoreState {
        &self.store
    }

    /// The catalog state object.
    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    /// The cart state object.
    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    /// The session state object.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Shuts the state layer down, closing the store pool.
    pub async fn shutdown(&self) {
        info!("Shutting down Seojae state layer");
        self.store.inner().close().await;
    }
}
