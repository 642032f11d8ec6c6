//! # Cart Container
//!
//! The shopping cart and the snapshots derived from it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                            │
//! │                                                                     │
//! │  UI Action               Provider Call          Container Change    │
//! │  ─────────               ─────────────          ────────────────    │
//! │                                                                     │
//! │  Tap "Add to cart" ────► add_to_cart() ──────► upsert line          │
//! │                                                                     │
//! │  Change quantity ──────► set_cart_quantity() ► qty = n (≤0 removes) │
//! │                                                                     │
//! │  Tap remove ───────────► remove_from_cart() ─► retain others        │
//! │                                                                     │
//! │  Tap clear ────────────► clear_cart() ───────► lines.clear()        │
//! │                                                                     │
//! │  Tap purchase ─────────► checkout() ─────────► snapshot + clear     │
//! │                                                                     │
//! │  Every mutation is followed by a persist of the full line array.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `book_id` (adding the same book increments the
//!   existing line's quantity)
//! - Every line's quantity is >= 1 (setting a quantity <= 0 removes the
//!   line; so does removing explicitly)
//! - Totals are derived on read, never stored
//!
//! Container operations are infallible: a missing line is a no-op, never
//! an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Book;

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart.
///
/// ## Design Notes
/// - `book_id`: reference back to the catalog entry
/// - title/author/image/price: frozen copies taken when the line was
///   created, so the cart renders consistently even if the catalog entry
///   is edited (or deleted) afterwards
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Book ID (UUID).
    pub book_id: String,

    /// Title at time of adding (frozen).
    pub title: String,

    /// Author at time of adding (frozen).
    pub author: String,

    /// Cover image reference at time of adding (frozen).
    pub image: String,

    /// Price at time of adding (frozen). The price is locked in when the
    /// line is created.
    pub price: Money,

    /// Quantity in the cart. Always >= 1.
    pub quantity: i64,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a cart line from a catalog entry and quantity.
    pub fn from_book(book: &Book, quantity: i64) -> Self {
        CartLine {
            book_id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            image: book.image.clone(),
            price: book.price,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Line total (`price × quantity`).
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered collection of lines, one per book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Restores a cart from previously persisted lines, preserving order.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Cart { lines }
    }

    /// Adds a book to the cart or increments the quantity when a line for
    /// it already exists.
    ///
    /// A non-positive quantity is ignored so the quantity invariant holds
    /// no matter what the caller passes.
    pub fn add(&mut self, book: &Book, quantity: i64) {
        if quantity < 1 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.book_id == book.id) {
            line.quantity += quantity;
            return;
        }
        self.lines.push(CartLine::from_book(book, quantity));
    }

    /// Removes the line for the given book. No-op when absent.
    pub fn remove(&mut self, book_id: &str) {
        self.lines.retain(|l| l.book_id != book_id);
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - Quantity <= 0: removes the line
    /// - Book not in cart: no-op
    pub fn set_quantity(&mut self, book_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(book_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.book_id == book_id) {
            line.quantity = quantity;
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Total price across all lines (`Σ price × quantity`).
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A purchased line: a cart line snapshot with the purchase timestamp
/// appended. These accumulate per user as the order history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Purchase {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub price: Money,
    pub quantity: i64,

    /// When the purchase was confirmed.
    #[ts(as = "String")]
    pub purchased_at: DateTime<Utc>,
}

impl Purchase {
    /// Freezes a cart line into a purchase record.
    pub fn from_line(line: &CartLine, purchased_at: DateTime<Utc>) -> Self {
        Purchase {
            book_id: line.book_id.clone(),
            title: line.title.clone(),
            author: line.author.clone(),
            image: line.image.clone(),
            price: line.price,
            quantity: line.quantity,
            purchased_at,
        }
    }

    /// Line total (`price × quantity`).
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::NaiveDate;

    fn test_book(id: &str, price: i64) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Book {}", id),
            author: "작가".to_string(),
            publisher: "출판사".to_string(),
            price: Money::from_won(price),
            stock: 10,
            category: Category::Novel,
            description: String::new(),
            isbn: "9788900000000".to_string(),
            publish_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            image: "cover.png".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_creates_line() {
        let mut cart = Cart::new();
        cart.add(&test_book("1", 25_000), 2);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_price().won(), 50_000);
    }

    #[test]
    fn test_add_same_book_increments_quantity() {
        let mut cart = Cart::new();
        let book = test_book("1", 25_000);

        cart.add(&book, 1);
        cart.add(&book, 2);

        // Still one line, quantities merged
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_add_ignores_non_positive_quantity() {
        let mut cart = Cart::new();
        cart.add(&test_book("1", 25_000), 0);
        cart.add(&test_book("1", 25_000), -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let book = test_book("1", 25_000);
        cart.add(&book, 2);

        cart.set_quantity(&book.id, 0);
        assert!(cart.is_empty());

        cart.add(&book, 2);
        cart.set_quantity(&book.id, -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_book("1", 25_000), 1);

        cart.set_quantity("nope", 7);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_book("1", 25_000), 1);

        cart.remove("nope");
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(&test_book("1", 25_000), 2);
        cart.add(&test_book("2", 13_500), 1);

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total_price().won(), 63_500);
    }

    #[test]
    fn test_quantity_invariant_over_random_sequence() {
        let a = test_book("a", 1_000);
        let b = test_book("b", 2_000);

        let mut cart = Cart::new();
        cart.add(&a, 3);
        cart.add(&b, 1);
        cart.set_quantity(&a.id, 1);
        cart.add(&a, 2);
        cart.remove(&b.id);
        cart.add(&b, 4);
        cart.set_quantity(&b.id, 2);

        // At most one line per book, every quantity >= 1
        let mut ids: Vec<&str> = cart.lines().iter().map(|l| l.book_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), cart.line_count());
        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut book = test_book("1", 25_000);
        let mut cart = Cart::new();
        cart.add(&book, 1);

        // Catalog price changes after the line was created
        book.price = Money::from_won(99_000);
        assert_eq!(cart.total_price().won(), 25_000);
    }

    #[test]
    fn test_purchase_snapshot() {
        let mut cart = Cart::new();
        cart.add(&test_book("1", 25_000), 2);

        let at = Utc::now();
        let purchase = Purchase::from_line(&cart.lines()[0], at);

        assert_eq!(purchase.book_id, "1");
        assert_eq!(purchase.quantity, 2);
        assert_eq!(purchase.line_total().won(), 50_000);
        assert_eq!(purchase.purchased_at, at);
    }

    #[test]
    fn test_serde_round_trip_preserves_order() {
        let mut cart = Cart::new();
        cart.add(&test_book("b", 2_000), 1);
        cart.add(&test_book("a", 1_000), 2);

        let json = serde_json::to_string(cart.lines()).unwrap();
        let lines: Vec<CartLine> = serde_json::from_str(&json).unwrap();
        let restored = Cart::from_lines(lines);

        assert_eq!(restored.line_count(), 2);
        assert_eq!(restored.lines()[0].book_id, "b");
        assert_eq!(restored.lines()[1].book_id, "a");
        assert_eq!(restored.total_price(), cart.total_price());
    }
}
