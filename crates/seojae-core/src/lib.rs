//! # seojae-core: Pure Domain Logic for the Seojae Bookstore
//!
//! This crate is the **heart** of Seojae. It contains the three state
//! containers and every domain rule as pure logic with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Seojae Architecture                          │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                     UI Shell (out of tree)                  │   │
//! │  │    Home ──► Book List ──► Detail ──► Cart ──► My Page       │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │ provider calls                     │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                  seojae-app (providers)                     │   │
//! │  │    list_books, add_to_cart, login, submit_review, checkout  │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ seojae-core (THIS CRATE) ★                  │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐          │   │
//! │  │   │ catalog │ │  cart   │ │ session │ │  money  │          │   │
//! │  │   │ Catalog │ │  Cart   │ │ Session │ │  Money  │          │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘          │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE STATE            │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │              seojae-store (key-value persistence)           │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Book, User, Review, CartLine, Purchase)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Catalog container and its derived views
//! - [`cart`] - Cart container and derived totals
//! - [`session`] - Session container (mock identity)
//! - [`validation`] - Screen-level input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Containers own their collection**: every mutation goes through the
//!    container's methods, never through the raw `Vec`
//! 2. **No I/O**: persistence and logging live in the outer crates
//! 3. **Integer Money**: prices are whole KRW (i64), never floats
//! 4. **Absent, not error**: lookups of missing identifiers resolve to
//!    `None`/no-op; only input validation produces typed errors

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use seojae_core::Cart` instead of
// `use seojae_core::cart::Cart`.

pub use cart::Cart;
pub use catalog::{BookDraft, Catalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::{ProfileUpdate, Session};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The one email address that maps to the admin role.
///
/// ## Why a constant?
/// Identity here is an explicit mock: any login succeeds, and the role is
/// decided purely by comparing against this address. Real credential
/// issuance is a separate design effort and is intentionally absent.
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Minimum accepted password length, enforced at registration only.
///
/// The only password rule that exists. There is no hashing and no
/// verification, and sign-in never reads the password; this mirrors what
/// the registration form enforces.
pub const MIN_PASSWORD_LEN: usize = 6;

/// How many books the "new arrivals" shelf shows by default.
pub const NEW_ARRIVALS_LIMIT: usize = 5;

/// How many books the "popular" shelf shows by default.
pub const POPULAR_LIMIT: usize = 5;

/// Valid review rating range (inclusive).
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
