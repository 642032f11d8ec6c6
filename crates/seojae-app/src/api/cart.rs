//! # Cart Operations
//!
//! Cart manipulation for the storefront.
//!
//! ## Persistence Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              Mutate Then Durably Persist                            │
//! │                                                                     │
//! │  1. Mutate the in-memory cart (always succeeds)                     │
//! │  2. Write the full line array to the `cart` key                     │
//! │  3. If the write fails: log at WARN and continue                    │
//! │                                                                     │
//! │  The in-memory cart stays the source of truth for the running       │
//! │  session; a restart after a failed write shows the last durable     │
//! │  state. This is a deliberate choice, not a swallowed error.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use seojae_core::cart::CartLine;
use seojae_core::validation::validate_quantity;
use seojae_core::{Cart, CoreError, Money};
use seojae_store::keys;

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, StoreState};

// =============================================================================
// DTOs
// =============================================================================

/// One cart line for the UI shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub price: Money,
    pub quantity: i64,
    pub line_total: Money,
    pub added_at: DateTime<Utc>,
}

impl From<&CartLine> for CartLineDto {
    fn from(line: &CartLine) -> Self {
        CartLineDto {
            book_id: line.book_id.clone(),
            title: line.title.clone(),
            author: line.author.clone(),
            image: line.image.clone(),
            price: line.price,
            quantity: line.quantity,
            line_total: line.line_total(),
            added_at: line.added_at,
        }
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total_price: cart.total_price(),
        }
    }
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineDto>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            lines: cart.lines().iter().map(CartLineDto::from).collect(),
            totals: CartTotals::from(cart),
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

/// The current cart contents.
pub fn get_cart(cart: &CartState) -> CartView {
    debug!("get_cart");
    cart.with_cart(|c| CartView::from(c))
}

/// Adds a book to the cart.
///
/// ## Behavior
/// - Book already in cart: quantity increases
/// - Otherwise: a new line is appended with the price frozen at add time
///
/// ## Arguments
/// * `book_id` - catalog identifier to add
/// * `quantity` - units to add (default: 1)
pub async fn add_to_cart(
    store: &StoreState,
    catalog: &CatalogState,
    cart: &CartState,
    book_id: &str,
    quantity: Option<i64>,
) -> Result<CartView, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(book_id = %book_id, quantity = %quantity, "add_to_cart");

    validate_quantity(quantity)?;

    let book = catalog
        .with(|c, _| c.get(book_id).cloned())
        .ok_or_else(|| ApiError::from(CoreError::BookNotFound(book_id.to_string())))?;

    let (view, lines) = cart.with_cart_mut(|c| {
        c.add(&book, quantity);
        (CartView::from(&*c), c.lines().to_vec())
    });

    persist_cart(store, &lines).await;
    Ok(view)
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity <= 0: removes the line
/// - Book not in cart: no-op
pub async fn set_cart_quantity(
    store: &StoreState,
    cart: &CartState,
    book_id: &str,
    quantity: i64,
) -> CartView {
    debug!(book_id = %book_id, quantity = %quantity, "set_cart_quantity");

    let (view, lines) = cart.with_cart_mut(|c| {
        c.set_quantity(book_id, quantity);
        (CartView::from(&*c), c.lines().to_vec())
    });

    persist_cart(store, &lines).await;
    view
}

/// Removes a line. Absent lines are a no-op.
pub async fn remove_from_cart(store: &StoreState, cart: &CartState, book_id: &str) -> CartView {
    debug!(book_id = %book_id, "remove_from_cart");

    let (view, lines) = cart.with_cart_mut(|c| {
        c.remove(book_id);
        (CartView::from(&*c), c.lines().to_vec())
    });

    persist_cart(store, &lines).await;
    view
}

/// Clears the cart.
pub async fn clear_cart(store: &StoreState, cart: &CartState) -> CartView {
    debug!("clear_cart");

    let view = cart.with_cart_mut(|c| {
        c.clear();
        CartView::from(&*c)
    });

    persist_cart(store, &[]).await;
    view
}

/// Writes the full line array to the `cart` key, logging on failure.
///
/// Log-and-continue is the documented policy for this key: the in-memory
/// cart stays authoritative for the running session.
pub(crate) async fn persist_cart(store: &StoreState, lines: &[CartLine]) {
    if let Err(err) = store.inner().put(keys::CART, &lines).await {
        warn!(error = %err, "Failed to persist cart; in-memory state kept");
    }
}
