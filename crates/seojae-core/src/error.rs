//! # Error Types
//!
//! Domain-specific error types for seojae-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  seojae-core errors (this file)                                     │
//! │  ├── CoreError        - Domain rule violations                      │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  seojae-store errors (separate crate)                               │
//! │  └── StoreError       - Persistence failures                        │
//! │                                                                     │
//! │  Provider errors (seojae-app)                                       │
//! │  └── ApiError         - What the UI shell sees (serialized)         │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → UI     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that most store-layer lookups do NOT error: a missing book, cart
//! line, or review resolves to absent/no-op. Errors exist only where a
//! precondition (authentication, ownership, admin role, valid input) fails.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
///
/// These should be caught at the provider layer and translated to
/// user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Book cannot be found in the catalog.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Operation requires an authenticated session.
    ///
    /// ## When This Occurs
    /// - Submitting a review while anonymous
    /// - Checking out while anonymous
    /// - Editing the profile while anonymous
    #[error("Sign-in required")]
    AuthenticationRequired,

    /// Operation requires the admin role.
    #[error("Admin role required")]
    AdminRequired,

    /// Review exists but belongs to a different user.
    #[error("Review {review_id} is not owned by the current user")]
    NotReviewOwner { review_id: String },

    /// Review cannot be found for the given book.
    #[error("Review not found: {0}")]
    ReviewNotFound(String),

    /// Checkout was attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller-supplied input doesn't meet the screen-level
/// rules. Used for early validation before any state is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::BookNotFound("b-1".to_string());
        assert_eq!(err.to_string(), "Book not found: b-1");

        let err = CoreError::NotReviewOwner {
            review_id: "r-9".to_string(),
        };
        assert_eq!(err.to_string(), "Review r-9 is not owned by the current user");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
