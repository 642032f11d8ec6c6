//! # Validation Module
//!
//! Screen-level input validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: UI forms                                                  │
//! │  ├── Required-field hints, keyboard types                           │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Provider operations (Rust)                                │
//! │  └── THIS MODULE: the same rules, enforced for real                 │
//! │                                                                     │
//! │  The containers below this accept whatever they are handed; all    │
//! │  input checking happens before the state is touched.                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::catalog::BookDraft;
use crate::error::ValidationError;
use crate::{MAX_RATING, MIN_PASSWORD_LEN, MIN_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identity Validators
// =============================================================================

/// Validates an email address shape.
///
/// ## Rules
/// Syntactic only: one `@` with a non-empty local part and a non-empty
/// domain. Nothing here attempts RFC-grade parsing; identity is a mock and
/// the email doubles as the display-name source.
///
/// ## Example
/// ```rust
/// use seojae_core::validation::validate_email;
///
/// assert!(validate_email("hana@example.com").is_ok());
/// assert!(validate_email("no-at-sign").is_err());
/// assert!(validate_email("@example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next();

    match domain {
        Some(domain) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        }),
    }
}

/// Validates a password against the only rule that exists: minimum length.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates a display name (registration and profile edit).
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 50,
        });
    }

    Ok(())
}

// =============================================================================
// Review Validators
// =============================================================================

/// Validates a star rating (1 to 5).
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING as i64,
            max: MAX_RATING as i64,
        });
    }

    Ok(())
}

/// Validates review body text: required, bounded.
pub fn validate_review_text(text: &str) -> ValidationResult<()> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "review text".to_string(),
        });
    }

    if text.chars().count() > 2000 {
        return Err(ValidationError::TooLong {
            field: "review text".to_string(),
            max: 2000,
        });
    }

    Ok(())
}

// =============================================================================
// Cart & Search Validators
// =============================================================================

/// Validates a quantity value for cart operations that add units.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns the whole selected category)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Admin Form Validators
// =============================================================================

/// Validates an admin book draft: the rules the create/edit form applies.
///
/// ## Rules
/// - title, author, publisher required (bounded at 200)
/// - price non-negative, stock non-negative
pub fn validate_book_draft(draft: &BookDraft) -> ValidationResult<()> {
    for (field, value) in [
        ("title", &draft.title),
        ("author", &draft.author),
        ("publisher", &draft.publisher),
    ] {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
        if value.chars().count() > 200 {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: 200,
            });
        }
    }

    if draft.price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if draft.stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Category;
    use chrono::NaiveDate;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("hana@example.com").is_ok());
        assert!(validate_email("a@b").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("plain").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("hana@").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("123456").is_ok());

        assert!(validate_password("").is_err());
        assert!(validate_password("12345").is_err());
    }

    #[test]
    fn test_validate_rating() {
        for rating in 1..=5u8 {
            assert!(validate_rating(rating).is_ok());
        }
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_review_text() {
        assert!(validate_review_text("재밌게 읽었습니다.").is_ok());
        assert!(validate_review_text("   ").is_err());
        assert!(validate_review_text(&"가".repeat(2001)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  아몬드  ").unwrap(), "아몬드");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_book_draft() {
        let good = BookDraft {
            title: "채식주의자".to_string(),
            author: "한강".to_string(),
            publisher: "창비".to_string(),
            price: Money::from_won(15_000),
            stock: 5,
            category: Category::Novel,
            description: String::new(),
            isbn: "9788936434595".to_string(),
            publish_date: NaiveDate::from_ymd_opt(2007, 10, 30).unwrap(),
            image: "cover.png".to_string(),
        };
        assert!(validate_book_draft(&good).is_ok());

        let mut missing_title = good.clone();
        missing_title.title = "  ".to_string();
        assert!(validate_book_draft(&missing_title).is_err());

        let mut negative_price = good.clone();
        negative_price.price = Money::from_won(-1);
        assert!(validate_book_draft(&negative_price).is_err());

        let mut negative_stock = good;
        negative_stock.stock = -3;
        assert!(validate_book_draft(&negative_stock).is_err());
    }
}
