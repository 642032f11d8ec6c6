//! # Catalog Container
//!
//! The full set of books available for browsing, plus the derived views
//! the storefront screens read.
//!
//! ## Derived Views
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Views (recomputed on read)               │
//! │                                                                     │
//! │   books: Vec<Book>  ──┬──► all()            full shelf              │
//! │                       ├──► by_category(f)   category chip           │
//! │                       ├──► new_arrivals(n)  most recently added     │
//! │                       ├──► popular(n)       closest to selling out  │
//! │                       └──► search(q, f)     title/author substring  │
//! │                                             within the category     │
//! │                                                                     │
//! │   Views are projections; none of them is ever persisted.            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Admin mutations (`insert`, `update`, `delete`) operate directly on the
//! collection. A missing identifier on update/delete is a no-op, never an
//! error.

use chrono::Utc;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{Book, Category};

// =============================================================================
// Category Filter
// =============================================================================

/// Category selection for the browse views: either the "all" sentinel or a
/// single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category restriction (the "전체" chip).
    #[default]
    All,
    /// Restrict to one category.
    Only(Category),
}

impl CategoryFilter {
    fn matches(&self, book: &Book) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => book.category == *category,
        }
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(value: Option<Category>) -> Self {
        match value {
            Some(category) => CategoryFilter::Only(category),
            None => CategoryFilter::All,
        }
    }
}

// =============================================================================
// Book Draft
// =============================================================================

/// Input for the admin create/edit form. Identifier and creation timestamp
/// are assigned by the catalog, never by the caller.
#[derive(Debug, Clone)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub price: Money,
    pub stock: i64,
    pub category: Category,
    pub description: String,
    pub isbn: String,
    pub publish_date: chrono::NaiveDate,
    pub image: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// The catalog: an insertion-ordered collection of books.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog { books: Vec::new() }
    }

    /// Creates a catalog from an existing book list, preserving order.
    pub fn with_books(books: Vec<Book>) -> Self {
        Catalog { books }
    }

    /// The full collection, in insertion order.
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    /// Number of books in the catalog.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Checks whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Looks up a book by identifier.
    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    /// Books in the selected category (all books for the sentinel).
    pub fn by_category(&self, filter: CategoryFilter) -> Vec<&Book> {
        self.books.iter().filter(|b| filter.matches(b)).collect()
    }

    /// The `limit` most recently added books, newest first.
    ///
    /// Ordering is by `created_at` with insertion position as tie-break,
    /// so two books added within the same clock tick still order by
    /// arrival.
    pub fn new_arrivals(&self, limit: usize) -> Vec<&Book> {
        let mut indexed: Vec<(usize, &Book)> = self.books.iter().enumerate().collect();
        indexed.sort_by_key(|(idx, b)| (b.created_at, *idx));
        indexed
            .into_iter()
            .rev()
            .take(limit)
            .map(|(_, b)| b)
            .collect()
    }

    /// The `limit` most popular books.
    ///
    /// Popularity heuristic: in-stock books with the fewest units left,
    /// i.e. the ones closest to selling out. Out-of-stock books are
    /// excluded so the shelf never advertises something unbuyable.
    pub fn popular(&self, limit: usize) -> Vec<&Book> {
        let mut in_stock: Vec<&Book> = self.books.iter().filter(|b| b.in_stock()).collect();
        in_stock.sort_by_key(|b| b.stock);
        in_stock.into_iter().take(limit).collect()
    }

    /// Free-text filter over title and author, combined with the category
    /// filter.
    ///
    /// ## Behavior
    /// - Matching is a case-insensitive substring check
    /// - An empty (or whitespace) query returns the whole selected category
    pub fn search(&self, query: &str, filter: CategoryFilter) -> Vec<&Book> {
        let needle = query.trim().to_lowercase();
        self.books
            .iter()
            .filter(|b| filter.matches(b))
            .filter(|b| {
                needle.is_empty()
                    || b.title.to_lowercase().contains(&needle)
                    || b.author.to_lowercase().contains(&needle)
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Admin mutations
    // -------------------------------------------------------------------------

    /// Inserts a new book from a draft, assigning a fresh identifier and
    /// creation timestamp. Returns the stored record.
    pub fn insert(&mut self, draft: BookDraft) -> &Book {
        let book = Book {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            author: draft.author,
            publisher: draft.publisher,
            price: draft.price,
            stock: draft.stock,
            category: draft.category,
            description: draft.description,
            isbn: draft.isbn,
            publish_date: draft.publish_date,
            image: draft.image,
            created_at: Utc::now(),
        };
        self.books.push(book);
        self.books.last().expect("book was just pushed")
    }

    /// Replaces the editable fields of an existing book with the draft.
    ///
    /// Identifier and creation timestamp are kept. Returns the updated
    /// record, or `None` (no-op) when the identifier is unknown.
    pub fn update(&mut self, id: &str, draft: BookDraft) -> Option<&Book> {
        let book = self.books.iter_mut().find(|b| b.id == id)?;
        book.title = draft.title;
        book.author = draft.author;
        book.publisher = draft.publisher;
        book.price = draft.price;
        book.stock = draft.stock;
        book.category = draft.category;
        book.description = draft.description;
        book.isbn = draft.isbn;
        book.publish_date = draft.publish_date;
        book.image = draft.image;
        Some(book)
    }

    /// Deletes a book by identifier. Returns whether a record was removed;
    /// an unknown identifier is a no-op.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id != id);
        self.books.len() != before
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(title: &str, author: &str, category: Category, stock: i64) -> BookDraft {
        BookDraft {
            title: title.to_string(),
            author: author.to_string(),
            publisher: "민음사".to_string(),
            price: Money::from_won(15_000),
            stock,
            category,
            description: String::new(),
            isbn: "9788937400001".to_string(),
            publish_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            image: "cover.png".to_string(),
        }
    }

    fn seeded() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(draft("채식주의자", "한강", Category::Novel, 7));
        catalog.insert(draft("아몬드", "손원평", Category::Novel, 2));
        catalog.insert(draft("보통의 언어들", "김이나", Category::Essay, 0));
        catalog.insert(draft("러스트 프로그래밍", "짐 블랜디", Category::Tech, 12));
        catalog
    }

    #[test]
    fn test_get_by_id() {
        let catalog = seeded();
        let id = catalog.all()[0].id.clone();

        assert_eq!(catalog.get(&id).unwrap().title, "채식주의자");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_by_category_with_sentinel() {
        let catalog = seeded();

        assert_eq!(catalog.by_category(CategoryFilter::All).len(), 4);
        assert_eq!(
            catalog.by_category(CategoryFilter::Only(Category::Novel)).len(),
            2
        );
        assert!(catalog
            .by_category(CategoryFilter::Only(Category::Science))
            .is_empty());
    }

    #[test]
    fn test_new_arrivals_newest_first() {
        let catalog = seeded();
        let newest = catalog.new_arrivals(2);

        assert_eq!(newest.len(), 2);
        assert_eq!(newest[0].title, "러스트 프로그래밍");
        assert_eq!(newest[1].title, "보통의 언어들");
    }

    #[test]
    fn test_popular_excludes_out_of_stock() {
        let catalog = seeded();
        let popular = catalog.popular(10);

        // Lowest stock first, the stock-0 essay never shows
        assert_eq!(popular[0].title, "아몬드");
        assert!(popular.iter().all(|b| b.in_stock()));
        assert_eq!(popular.len(), 3);
    }

    #[test]
    fn test_search_matches_title_and_author() {
        let catalog = seeded();

        let by_title = catalog.search("아몬드", CategoryFilter::All);
        assert_eq!(by_title.len(), 1);

        let by_author = catalog.search("한강", CategoryFilter::All);
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].title, "채식주의자");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut catalog = Catalog::new();
        catalog.insert(draft("The Rust Book", "Steve Klabnik", Category::Tech, 3));

        assert_eq!(catalog.search("rust", CategoryFilter::All).len(), 1);
        assert_eq!(catalog.search("KLABNIK", CategoryFilter::All).len(), 1);
    }

    #[test]
    fn test_search_combines_with_category() {
        let catalog = seeded();

        // Both predicates must hold
        let hits = catalog.search("아몬드", CategoryFilter::Only(Category::Novel));
        assert_eq!(hits.len(), 1);

        let misses = catalog.search("아몬드", CategoryFilter::Only(Category::Tech));
        assert!(misses.is_empty());
    }

    #[test]
    fn test_empty_query_returns_selected_category() {
        let catalog = seeded();

        let novels = catalog.search("   ", CategoryFilter::Only(Category::Novel));
        assert_eq!(novels.len(), 2);

        let everything = catalog.search("", CategoryFilter::All);
        assert_eq!(everything.len(), 4);
    }

    #[test]
    fn test_insert_assigns_identity() {
        let mut catalog = Catalog::new();
        let id = catalog
            .insert(draft("새 책", "저자", Category::Essay, 1))
            .id
            .clone();

        assert!(!id.is_empty());
        assert!(catalog.get(&id).is_some());
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut catalog = seeded();
        let id = catalog.all()[1].id.clone();
        let created_at = catalog.all()[1].created_at;

        let updated = catalog
            .update(&id, draft("아몬드 (개정판)", "손원평", Category::Novel, 20))
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.title, "아몬드 (개정판)");
        assert_eq!(updated.stock, 20);
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut catalog = seeded();
        let before = catalog.len();

        assert!(catalog
            .update("missing", draft("x", "y", Category::Novel, 1))
            .is_none());
        assert_eq!(catalog.len(), before);
    }

    #[test]
    fn test_delete() {
        let mut catalog = seeded();
        let id = catalog.all()[0].id.clone();

        assert!(catalog.delete(&id));
        assert!(catalog.get(&id).is_none());
        assert_eq!(catalog.len(), 3);

        // Unknown identifier is a no-op
        assert!(!catalog.delete(&id));
        assert_eq!(catalog.len(), 3);
    }
}
