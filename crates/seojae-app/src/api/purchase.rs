//! # Purchase Operations
//!
//! Checkout and the per-user order history.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Checkout                                         │
//! │                                                                     │
//! │  Tap "purchase" (signed in, cart non-empty)                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Snapshot every cart line with the purchase timestamp               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Append the batch to purchases_<userId>   ── write fails? ──┐       │
//! │       │                                                     ▼       │
//! │       ▼                                          error surfaces,    │
//! │  Clear the cart, persist the empty `cart` key    cart left intact   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use seojae_core::cart::Purchase;
use seojae_core::{CoreError, Money};
use seojae_store::keys;

use super::cart::persist_cart;
use super::require_user;
use crate::error::ApiError;
use crate::state::{CartState, SessionState, StoreState};

// =============================================================================
// DTOs
// =============================================================================

/// One purchased line for the UI shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDto {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub price: Money,
    pub quantity: i64,
    pub line_total: Money,
    pub purchased_at: DateTime<Utc>,
}

impl From<&Purchase> for PurchaseDto {
    fn from(p: &Purchase) -> Self {
        PurchaseDto {
            book_id: p.book_id.clone(),
            title: p.title.clone(),
            author: p.author.clone(),
            image: p.image.clone(),
            price: p.price,
            quantity: p.quantity,
            line_total: p.line_total(),
            purchased_at: p.purchased_at,
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Confirms the purchase of everything in the cart.
///
/// ## Behavior
/// - Requires a signed-in user and a non-empty cart
/// - Appends one purchase record per cart line (existing history is never
///   overwritten; an unreadable history aborts before any write)
/// - Clears the cart only after the history write succeeds
pub async fn checkout(
    store: &StoreState,
    session: &SessionState,
    cart: &CartState,
) -> Result<Vec<PurchaseDto>, ApiError> {
    let user = require_user(session)?;

    let lines = cart.with_cart(|c| c.lines().to_vec());
    if lines.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }
    debug!(user_id = %user.id, lines = lines.len(), "checkout");

    let key = keys::purchases(&user.id);
    let mut history: Vec<Purchase> = store.inner().get(&key).await?.unwrap_or_default();

    let purchased_at = Utc::now();
    let batch: Vec<Purchase> = lines
        .iter()
        .map(|line| Purchase::from_line(line, purchased_at))
        .collect();
    history.extend(batch.iter().cloned());

    // Surface a failed write; the cart must survive a failed purchase.
    store.inner().put(&key, &history).await?;

    cart.with_cart_mut(|c| c.clear());
    persist_cart(store, &[]).await;

    info!(user_id = %user.id, lines = batch.len(), "Purchase completed");
    Ok(batch.iter().map(PurchaseDto::from).collect())
}

/// The signed-in user's order history, oldest first.
///
/// Tolerant read: a missing or unreadable history renders as empty.
pub async fn purchase_history(
    store: &StoreState,
    session: &SessionState,
) -> Result<Vec<PurchaseDto>, ApiError> {
    let user = require_user(session)?;

    let key = keys::purchases(&user.id);
    let history = match store.inner().get::<Vec<Purchase>>(&key).await {
        Ok(Some(history)) => history,
        Ok(None) => Vec::new(),
        Err(err) => {
            error!(key = %key, error = %err, "Failed to load purchase history");
            Vec::new()
        }
    };
    Ok(history.iter().map(PurchaseDto::from).collect())
}
