//! # Domain Types
//!
//! Core domain records used throughout Seojae.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Records                              │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │      Book       │   │      User       │   │     Review      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │   │
//! │  │  title/author   │   │  email          │   │  user_id        │   │
//! │  │  price (Money)  │   │  name           │   │  book_id        │   │
//! │  │  category       │   │  role           │   │  rating 1..=5   │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘   │
//! │                                                                     │
//! │  CartLine and Purchase are frozen snapshots and live in [`cart`].   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All records are plain serde structs. No cross-record referential
//! integrity is enforced beyond lookup-by-identifier; a dangling book
//! reference in a review simply fails the lookup.
//!
//! [`cart`]: crate::cart

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Shelf category a book belongs to.
///
/// A small fixed set; the storefront also offers an "all" sentinel on top
/// of these, see [`CategoryFilter`](crate::catalog::CategoryFilter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Novel,
    Essay,
    SelfHelp,
    Business,
    Science,
    Tech,
}

impl Category {
    /// All categories, in shelf order.
    pub const ALL: [Category; 6] = [
        Category::Novel,
        Category::Essay,
        Category::SelfHelp,
        Category::Business,
        Category::Science,
        Category::Tech,
    ];

    /// Korean display label shown on the category chips.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Novel => "소설",
            Category::Essay => "에세이",
            Category::SelfHelp => "자기계발",
            Category::Business => "경제경영",
            Category::Science => "과학",
            Category::Tech => "IT",
        }
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book available in the catalog.
///
/// Created and edited only through the admin operations; from the browsing
/// side the record is immutable.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Book {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Publisher name.
    pub publisher: String,

    /// Price in whole won.
    pub price: Money,

    /// Units remaining in stock.
    pub stock: i64,

    /// Shelf category.
    pub category: Category,

    /// Descriptive text for the detail screen.
    pub description: String,

    /// ISBN-13 string, kept as catalog metadata (not validated).
    pub isbn: String,

    /// Date of publication.
    #[ts(as = "String")]
    pub publish_date: NaiveDate,

    /// Cover image reference (URL or asset name).
    pub image: String,

    /// When the book was added to the catalog. Drives the "new arrivals"
    /// view, which is about catalog recency rather than publish date.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Checks whether any units remain.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// User & Role
// =============================================================================

/// Role attached to a session user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// The current session's user record.
///
/// Synthesized at login/registration (identity is an explicit mock),
/// mutated by profile update, cleared at logout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Email address as entered at login/registration.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Role discriminator.
    pub role: Role,
}

impl User {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Review
// =============================================================================

/// A review left on a book.
///
/// The user's display name is frozen at submission time so the review list
/// renders without a user lookup (and survives later profile renames).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Review {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning user.
    pub user_id: String,

    /// Display name at submission time (frozen).
    pub user_name: String,

    /// Target book.
    pub book_id: String,

    /// Star rating, 1 to 5.
    pub rating: u8,

    /// Free-text body.
    pub text: String,

    /// When the review was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Novel.label(), "소설");
        assert_eq!(Category::Tech.label(), "IT");
        assert_eq!(Category::ALL.len(), 6);
    }

    #[test]
    fn test_category_serde_shape() {
        let json = serde_json::to_string(&Category::SelfHelp).unwrap();
        assert_eq!(json, "\"self_help\"");
    }

    #[test]
    fn test_role_default() {
        assert_eq!(Role::default(), Role::User);
    }
}
