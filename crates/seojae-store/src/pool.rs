//! # Storage Pool Management
//!
//! Connection pool creation and the key-value operation surface.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Storage Lifecycle                              │
//! │                                                                     │
//! │  App startup                                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreConfig::new(path) ← pool settings                             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Storage::new(config).await ← create pool + run migration           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  get/put/remove/keys_with_prefix over the `kv` table                │
//! │                                                                     │
//! │  Reads happen once at startup; every mutation writes the full       │
//! │  collection back under its key.                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! WAL (Write-Ahead Logging) is enabled so the startup reads and the
//! fire-and-forget writes never block each other, and crash recovery is
//! cheap.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::migrations;

// =============================================================================
// Configuration
// =============================================================================

/// Storage configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/seojae.db").max_connections(2);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 4 (plenty for a single-user app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a new configuration with the given database path. The file
    /// is created on first open if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory configuration (for tests).
    ///
    /// ## Note
    /// An in-memory SQLite database exists per connection, so the pool is
    /// pinned to exactly one connection.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Handle to the key-value store.
///
/// Cloning is cheap (the pool is internally reference-counted), and the
/// handle is `Send + Sync`, so it can be shared across the provider layer
/// without extra locking.
#[derive(Debug, Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Opens the store.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite (WAL journal, NORMAL synchronous)
    /// 3. Creates the connection pool
    /// 4. Runs the migration (if enabled)
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening key-value store"
        );

        // In-memory databases have no journal file; WAL only applies to
        // the on-disk case.
        let connect_options = if config.database_path.as_os_str() == ":memory:" {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
        } else {
            let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());
            SqliteConnectOptions::from_str(&connect_url)
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
                // Readers don't block writers and vice versa
                .journal_mode(SqliteJournalMode::Wal)
                // Safe from corruption; may lose the last transaction on crash
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        };

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "Store pool created");

        let storage = Storage { pool };

        if config.run_migrations {
            migrations::run_migrations(&storage.pool).await?;
        }

        Ok(storage)
    }

    /// Returns a reference to the connection pool, for queries the
    /// key-value surface doesn't cover.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // -------------------------------------------------------------------------
    // Raw byte operations
    // -------------------------------------------------------------------------

    /// Reads the raw bytes stored under a key.
    pub async fn get_raw(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        debug!(key = %key, "kv get");

        let value: Option<Vec<u8>> =
            sqlx::query_scalar("SELECT value FROM kv WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Writes raw bytes under a key, replacing any previous value.
    pub async fn put_raw(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        debug!(key = %key, bytes = value.len(), "kv put");

        sqlx::query(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a key. Absent keys are a no-op.
    pub async fn remove(&self, key: &str) -> StoreResult<()> {
        debug!(key = %key, "kv remove");

        sqlx::query("DELETE FROM kv WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists all keys starting with the given prefix, sorted.
    ///
    /// LIKE wildcards inside the prefix are escaped, so a literal `_` in a
    /// key name (every `reviews_*` key has one) matches only itself.
    pub async fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let pattern = format!("{}%", escape_like(prefix));

        let keys: Vec<String> =
            sqlx::query_scalar("SELECT key FROM kv WHERE key LIKE ?1 ESCAPE '\\' ORDER BY key")
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?;

        Ok(keys)
    }

    // -------------------------------------------------------------------------
    // Typed JSON operations
    // -------------------------------------------------------------------------

    /// Reads and JSON-decodes the value stored under a key.
    ///
    /// ## Returns
    /// - `Ok(Some(value))` - key present and decodable
    /// - `Ok(None)` - key absent
    /// - `Err(StoreError::Decode { .. })` - key present but unreadable
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(bytes) = self.get_raw(key).await? else {
            return Ok(None);
        };

        let value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    /// JSON-encodes and writes a value under a key.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.put_raw(key, &bytes).await
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Closes the connection pool. Call on application shutdown.
    pub async fn close(&self) {
        info!("Closing store pool");
        self.pool.close().await;
    }

    /// Checks if the store is responsive.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// Escapes LIKE wildcards (`%`, `_`) and the escape character itself.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    async fn memory_store() -> Storage {
        Storage::new(StoreConfig::in_memory())
            .await
            .expect("in-memory store should open")
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Line {
        book_id: String,
        quantity: i64,
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("reviews_"), "reviews\\_");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[tokio::test]
    async fn test_open_and_health_check() {
        let store = memory_store().await;
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = StoreConfig::new("/tmp/test.db")
            .max_connections(8)
            .min_connections(2);

        assert_eq!(config.max_connections, 8);
        assert_eq!(config.min_connections, 2);
    }

    #[tokio::test]
    async fn test_raw_round_trip_and_overwrite() {
        let store = memory_store().await;

        assert!(store.get_raw("user").await.unwrap().is_none());

        store.put_raw("user", b"first").await.unwrap();
        assert_eq!(store.get_raw("user").await.unwrap().unwrap(), b"first");

        // Writing again replaces, never appends
        store.put_raw("user", b"second").await.unwrap();
        assert_eq!(store.get_raw("user").await.unwrap().unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_remove_is_noop_when_absent() {
        let store = memory_store().await;

        store.remove("nope").await.unwrap();

        store.put_raw("cart", b"[]").await.unwrap();
        store.remove("cart").await.unwrap();
        assert!(store.get_raw("cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_typed_round_trip_preserves_order() {
        let store = memory_store().await;
        let lines = vec![
            Line { book_id: "b".to_string(), quantity: 2 },
            Line { book_id: "a".to_string(), quantity: 1 },
            Line { book_id: "c".to_string(), quantity: 7 },
        ];

        store.put("cart", &lines).await.unwrap();
        let restored: Vec<Line> = store.get("cart").await.unwrap().unwrap();

        assert_eq!(restored, lines);
    }

    #[tokio::test]
    async fn test_get_decode_failure_names_key() {
        let store = memory_store().await;
        store.put_raw("cart", b"not json").await.unwrap();

        let err = store.get::<Vec<Line>>("cart").await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { ref key, .. } if key == "cart"));
    }

    #[tokio::test]
    async fn test_prefix_scan_escapes_underscore() {
        let store = memory_store().await;
        store.put_raw("reviews_b1", b"[]").await.unwrap();
        store.put_raw("reviews_b2", b"[]").await.unwrap();
        // `_` in the prefix must not act as a single-char wildcard
        store.put_raw("reviewsXb3", b"[]").await.unwrap();
        store.put_raw("purchases_u1", b"[]").await.unwrap();

        let keys = store.keys_with_prefix("reviews_").await.unwrap();
        assert_eq!(keys, vec!["reviews_b1".to_string(), "reviews_b2".to_string()]);
    }
}
