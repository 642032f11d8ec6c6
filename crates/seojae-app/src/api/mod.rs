//! # Provider Operations
//!
//! The operation surface the UI shell invokes.
//!
//! ## Operation Organization
//! ```text
//! api/
//! ├── mod.rs      ◄─── You are here (exports + shared guards)
//! ├── catalog.rs  ◄─── Browse views, admin CRUD
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── session.rs  ◄─── Login/register/logout/profile
//! ├── review.rs   ◄─── Per-book reviews
//! └── purchase.rs ◄─── Checkout + order history
//! ```
//!
//! ## How Operations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Provider Call Flow                               │
//! │                                                                     │
//! │  UI Shell                                                           │
//! │  ────────                                                           │
//! │  const view = await bridge.addToCart({ bookId, quantity: 1 });      │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  Rust Provider                                                      │
//! │  ─────────────                                                      │
//! │  async fn add_to_cart(                                              │
//! │      store: &StoreState,     ◄── injected state, exactly what       │
//! │      catalog: &CatalogState,     the operation needs                │
//! │      cart: &CartState,                                              │
//! │      book_id: &str,                                                 │
//! │      quantity: Option<i64>,                                         │
//! │  ) -> Result<CartView, ApiError>                                    │
//! │         │                                                           │
//! │         ▼  (DTO serialization)                                      │
//! │  UI receives the updated cart view                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each operation declares only the state it needs. Mutating operations
//! update the in-memory container first, then write the full collection
//! back to storage.

pub mod cart;
pub mod catalog;
pub mod purchase;
pub mod review;
pub mod session;

use seojae_core::{CoreError, User};

use crate::error::ApiError;
use crate::state::SessionState;

/// Returns the signed-in user, or an auth error for anonymous callers.
pub(crate) fn require_user(session: &SessionState) -> Result<User, ApiError> {
    session
        .with_session(|s| s.current().cloned())
        .ok_or_else(|| ApiError::from(CoreError::AuthenticationRequired))
}

/// Returns the signed-in admin, or an auth/role error.
pub(crate) fn require_admin(session: &SessionState) -> Result<User, ApiError> {
    let user = require_user(session)?;
    if !user.is_admin() {
        return Err(CoreError::AdminRequired.into());
    }
    Ok(user)
}
