//! # seojae-store: Key-Value Persistence for Seojae
//!
//! Durable storage for the state layer: string keys, JSON-encoded values,
//! backed by a local SQLite file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Seojae Data Flow                             │
//! │                                                                     │
//! │  Provider operation (add_to_cart, submit_review, ...)               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  seojae-store (THIS CRATE)                  │   │
//! │  │                                                             │   │
//! │  │   ┌────────────┐    ┌────────────┐    ┌──────────────┐     │   │
//! │  │   │  Storage   │    │    keys    │    │  Migrations  │     │   │
//! │  │   │ (pool.rs)  │    │ (keys.rs)  │    │  (embedded)  │     │   │
//! │  │   │            │    │            │    │              │     │   │
//! │  │   │ SqlitePool │◄───│ user, cart │    │ 001_key_     │     │   │
//! │  │   │ get/put    │    │ reviews_*  │    │ value.sql    │     │   │
//! │  │   └────────────┘    └────────────┘    └──────────────┘     │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite file: <app data dir>/seojae.db (single `kv` table)          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Durable Contract
//!
//! | Key                    | Value                                     |
//! |------------------------|-------------------------------------------|
//! | `user`                 | current session user record, or absent    |
//! | `cart`                 | ordered array of cart lines               |
//! | `reviews_<bookId>`     | ordered array of reviews for that book    |
//! | `purchases_<userId>`   | ordered array of purchased line snapshots |
//!
//! These key formats are the only thing external tooling needs to know to
//! interoperate with stored data.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seojae_store::{keys, Storage, StoreConfig};
//!
//! let store = Storage::new(StoreConfig::new("path/to/seojae.db")).await?;
//! store.put(keys::CART, &lines).await?;
//! let lines: Option<Vec<CartLine>> = store.get(keys::CART).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod keys;
pub mod migrations;
pub mod pool;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Storage, StoreConfig};
