//! # Durable Key Names
//!
//! Every name the store writes under lives here, so the durable contract
//! has exactly one definition.

/// Current session user record.
pub const USER: &str = "user";

/// Ordered array of cart lines.
pub const CART: &str = "cart";

/// Prefix for per-book review arrays.
pub const REVIEWS_PREFIX: &str = "reviews_";

/// Prefix for per-user purchase arrays.
pub const PURCHASES_PREFIX: &str = "purchases_";

/// Key holding the review array for one book.
pub fn reviews(book_id: &str) -> String {
    format!("{}{}", REVIEWS_PREFIX, book_id)
}

/// Key holding the purchase array for one user.
pub fn purchases(user_id: &str) -> String {
    format!("{}{}", PURCHASES_PREFIX, user_id)
}

/// Extracts the book id back out of a `reviews_<bookId>` key.
///
/// Used when scanning all review keys for one user's reviews.
pub fn book_id_from_reviews_key(key: &str) -> Option<&str> {
    key.strip_prefix(REVIEWS_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_shapes() {
        assert_eq!(reviews("b-42"), "reviews_b-42");
        assert_eq!(purchases("u-7"), "purchases_u-7");
    }

    #[test]
    fn test_book_id_round_trip() {
        let key = reviews("4a1e");
        assert_eq!(book_id_from_reviews_key(&key), Some("4a1e"));
        assert_eq!(book_id_from_reviews_key("purchases_u1"), None);
    }
}
