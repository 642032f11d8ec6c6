//! # Provider Error Type
//!
//! Unified error type for provider operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Seojae                             │
//! │                                                                     │
//! │  UI Shell                      Rust Provider Layer                  │
//! │  ────────                      ───────────────────                  │
//! │                                                                     │
//! │  call add_to_cart()                                                 │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │  Provider Operation: Result<T, ApiError>                     │  │
//! │  │                                                              │  │
//! │  │  Storage error? ──── StoreError ─────────┐                   │  │
//! │  │  Domain error?  ──── CoreError  ───────── ApiError ────────► │  │
//! │  │  Bad input?     ──── ValidationError ────┘                   │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! │         │                                                           │
//! │         ▼  (serialized as { code, message })                        │
//! │  UI shows the message, branches on the code                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence failures that are policy-handled (cart/session writes) never
//! become an `ApiError`; they are logged at the call site and the
//! operation reports success from in-memory state.

use serde::Serialize;
use seojae_core::{CoreError, ValidationError};
use seojae_store::StoreError;

/// Error returned from provider operations.
///
/// ## Serialization
/// What the UI shell receives when an operation fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Book not found: 4a1e..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for provider responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Operation requires a signed-in user
    AuthRequired,

    /// Operation requires a role or ownership the user doesn't have
    Forbidden,

    /// Durable storage operation failed
    StorageError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new provider error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to provider errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Decode { ref key, .. } => {
                tracing::error!(key = %key, error = %err, "Stored value unreadable");
                ApiError::new(ErrorCode::StorageError, "Stored data could not be read")
            }
            StoreError::Encode { ref key, .. } => {
                tracing::error!(key = %key, error = %err, "Value could not be encoded");
                ApiError::new(ErrorCode::StorageError, "Data could not be saved")
            }
            StoreError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage connection failed")
            }
            StoreError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            StoreError::PoolExhausted => {
                ApiError::new(ErrorCode::StorageError, "Storage pool exhausted")
            }
            StoreError::QueryFailed(e) => {
                // Log the raw failure, return a generic message
                tracing::error!("Storage query failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            StoreError::Internal(e) => {
                tracing::error!("Internal storage error: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

/// Converts domain errors to provider errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BookNotFound(id) => ApiError::not_found("Book", &id),
            CoreError::ReviewNotFound(id) => ApiError::not_found("Review", &id),
            CoreError::AuthenticationRequired => {
                ApiError::new(ErrorCode::AuthRequired, "Sign-in required")
            }
            CoreError::AdminRequired => ApiError::new(ErrorCode::Forbidden, "Admin role required"),
            CoreError::NotReviewOwner { review_id } => ApiError::new(
                ErrorCode::Forbidden,
                format!("Review {} belongs to another user", review_id),
            ),
            CoreError::EmptyCart => ApiError::validation("Cart is empty"),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::AuthenticationRequired.into();
        assert_eq!(err.code, ErrorCode::AuthRequired);

        let err: ApiError = CoreError::BookNotFound("b-1".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Book not found: b-1");
    }

    #[test]
    fn test_serializes_with_screaming_code() {
        let err = ApiError::validation("title is required");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            "{\"code\":\"VALIDATION_ERROR\",\"message\":\"title is required\"}"
        );
    }
}
