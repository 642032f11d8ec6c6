//! # Review Operations
//!
//! Per-book reviews, stored as one ordered array per book under the
//! `reviews_<bookId>` key.
//!
//! ## Read vs. Write Policy
//! - Listing a book's reviews is tolerant: a missing or unreadable key
//!   reads as empty (the detail screen still renders)
//! - Mutations read strictly before writing: an unreadable array surfaces
//!   an error instead of being clobbered by the write-back
//!
//! One review per user per book is a UI-flow convention (the form switches
//! to edit mode when the user already has one); the store accepts whatever
//! the flow produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;

use seojae_core::validation::{validate_rating, validate_review_text};
use seojae_core::{CoreError, Review};
use seojae_store::keys;

use super::require_user;
use crate::error::ApiError;
use crate::state::{SessionState, StoreState};

// =============================================================================
// DTOs
// =============================================================================

/// Review for the UI shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub book_id: String,
    pub rating: u8,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Review> for ReviewDto {
    fn from(r: &Review) -> Self {
        ReviewDto {
            id: r.id.clone(),
            user_id: r.user_id.clone(),
            user_name: r.user_name.clone(),
            book_id: r.book_id.clone(),
            rating: r.rating,
            text: r.text.clone(),
            created_at: r.created_at,
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

/// The reviews for one book, in submission order.
pub async fn list_reviews(store: &StoreState, book_id: &str) -> Vec<ReviewDto> {
    debug!(book_id = %book_id, "list_reviews");
    load_tolerant(store, &keys::reviews(book_id))
        .await
        .iter()
        .map(ReviewDto::from)
        .collect()
}

/// Submits a new review for a book. Requires a signed-in user.
pub async fn submit_review(
    store: &StoreState,
    session: &SessionState,
    book_id: &str,
    rating: u8,
    text: &str,
) -> Result<ReviewDto, ApiError> {
    let user = require_user(session)?;
    validate_rating(rating)?;
    validate_review_text(text)?;

    let key = keys::reviews(book_id);
    let mut reviews: Vec<Review> = store.inner().get(&key).await?.unwrap_or_default();

    let review = Review {
        id: Uuid::new_v4().to_string(),
        user_id: user.id,
        user_name: user.name,
        book_id: book_id.to_string(),
        rating,
        text: text.trim().to_string(),
        created_at: Utc::now(),
    };
    reviews.push(review.clone());

    store.inner().put(&key, &reviews).await?;
    info!(book_id = %book_id, review_id = %review.id, "Review submitted");
    Ok(ReviewDto::from(&review))
}

/// Edits an existing review in place. Requires ownership.
///
/// The creation timestamp is kept; only rating and text change.
pub async fn update_review(
    store: &StoreState,
    session: &SessionState,
    book_id: &str,
    review_id: &str,
    rating: u8,
    text: &str,
) -> Result<ReviewDto, ApiError> {
    let user = require_user(session)?;
    validate_rating(rating)?;
    validate_review_text(text)?;

    let key = keys::reviews(book_id);
    let mut reviews: Vec<Review> = store.inner().get(&key).await?.unwrap_or_default();

    let review = reviews
        .iter_mut()
        .find(|r| r.id == review_id)
        .ok_or_else(|| ApiError::from(CoreError::ReviewNotFound(review_id.to_string())))?;

    if review.user_id != user.id {
        return Err(CoreError::NotReviewOwner {
            review_id: review_id.to_string(),
        }
        .into());
    }

    review.rating = rating;
    review.text = text.trim().to_string();
    let dto = ReviewDto::from(&*review);

    store.inner().put(&key, &reviews).await?;
    info!(book_id = %book_id, review_id = %review_id, "Review updated");
    Ok(dto)
}

/// Deletes a review. Requires ownership; an absent review is a no-op.
pub async fn delete_review(
    store: &StoreState,
    session: &SessionState,
    book_id: &str,
    review_id: &str,
) -> Result<(), ApiError> {
    let user = require_user(session)?;

    let key = keys::reviews(book_id);
    let mut reviews: Vec<Review> = store.inner().get(&key).await?.unwrap_or_default();

    let Some(review) = reviews.iter().find(|r| r.id == review_id) else {
        debug!(review_id = %review_id, "delete_review on unknown id (no-op)");
        return Ok(());
    };

    if review.user_id != user.id {
        return Err(CoreError::NotReviewOwner {
            review_id: review_id.to_string(),
        }
        .into());
    }

    reviews.retain(|r| r.id != review_id);
    store.inner().put(&key, &reviews).await?;
    info!(book_id = %book_id, review_id = %review_id, "Review deleted");
    Ok(())
}

/// All of the signed-in user's reviews across every book (profile screen).
///
/// Scans the `reviews_` prefix; unreadable keys are skipped with a log.
pub async fn my_reviews(
    store: &StoreState,
    session: &SessionState,
) -> Result<Vec<ReviewDto>, ApiError> {
    let user = require_user(session)?;

    let review_keys = store.inner().keys_with_prefix(keys::REVIEWS_PREFIX).await?;
    let mut mine = Vec::new();
    for key in review_keys {
        for review in load_tolerant(store, &key).await {
            if review.user_id == user.id {
                mine.push(ReviewDto::from(&review));
            }
        }
    }
    Ok(mine)
}

/// Reads one book's review array, treating failures as empty after
/// logging them.
async fn load_tolerant(store: &StoreState, key: &str) -> Vec<Review> {
    match store.inner().get::<Vec<Review>>(key).await {
        Ok(Some(reviews)) => reviews,
        Ok(None) => Vec::new(),
        Err(err) => {
            error!(key = %key, error = %err, "Failed to load reviews");
            Vec::new()
        }
    }
}
