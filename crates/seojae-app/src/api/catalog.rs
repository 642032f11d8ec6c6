//! # Catalog Operations
//!
//! Browse views for the storefront screens and the admin CRUD surface.
//!
//! ## Browse Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Browse Flow                              │
//! │                                                                     │
//! │  Home screen ──────────► home()          new / popular / shelf      │
//! │                                                                     │
//! │  Category chip tapped ─► set_category()  updates browse state,      │
//! │                                          returns refreshed list     │
//! │                                                                     │
//! │  Search box typed ─────► set_search_query()                         │
//! │                                                                     │
//! │  List screen ──────────► list_books()    category + query combined  │
//! │                                                                     │
//! │  Detail screen ────────► get_book()                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog itself is in-memory only; admin edits last for the running
//! session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use seojae_core::catalog::{BookDraft, CategoryFilter};
use seojae_core::validation::{validate_book_draft, validate_search_query};
use seojae_core::{Book, Category, Money, NEW_ARRIVALS_LIMIT, POPULAR_LIMIT};

use super::require_admin;
use crate::error::ApiError;
use crate::state::{CatalogState, SessionState};

/// How many books the home screen's "all books" shelf shows.
const HOME_SHELF_LIMIT: usize = 8;

// =============================================================================
// DTOs
// =============================================================================

/// Book DTO for the UI shell.
///
/// ## Why DTO?
/// - Decouples the domain record from the UI contract
/// - serde rename to camelCase for JS consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub price: Money,
    pub stock: i64,
    pub category: Category,
    pub description: String,
    pub isbn: String,
    pub publish_date: NaiveDate,
    pub image: String,
    pub in_stock: bool,
}

impl From<&Book> for BookDto {
    fn from(b: &Book) -> Self {
        BookDto {
            id: b.id.clone(),
            title: b.title.clone(),
            author: b.author.clone(),
            publisher: b.publisher.clone(),
            price: b.price,
            stock: b.stock,
            category: b.category,
            description: b.description.clone(),
            isbn: b.isbn.clone(),
            publish_date: b.publish_date,
            image: b.image.clone(),
            in_stock: b.in_stock(),
        }
    }
}

/// One category chip: machine value plus Korean label.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub value: Category,
    pub label: String,
}

/// The home screen's three shelves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub new_arrivals: Vec<BookDto>,
    pub popular: Vec<BookDto>,
    pub shelf: Vec<BookDto>,
}

/// Admin create/edit form input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub price: Money,
    pub stock: i64,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub isbn: String,
    pub publish_date: NaiveDate,
    #[serde(default)]
    pub image: String,
}

impl BookInput {
    fn into_draft(self) -> BookDraft {
        BookDraft {
            title: self.title,
            author: self.author,
            publisher: self.publisher,
            price: self.price,
            stock: self.stock,
            category: self.category,
            description: self.description,
            isbn: self.isbn,
            publish_date: self.publish_date,
            image: self.image,
        }
    }
}

// =============================================================================
// Browse Operations
// =============================================================================

/// The category chips, with the sentinel handled UI-side as `null`.
pub fn categories() -> Vec<CategoryDto> {
    Category::ALL
        .iter()
        .map(|c| CategoryDto {
            value: *c,
            label: c.label().to_string(),
        })
        .collect()
}

/// The home screen shelves: new arrivals, popular, and a short slice of
/// the full catalog.
pub fn home(catalog: &CatalogState) -> HomeView {
    debug!("home view");
    catalog.with(|c, _| HomeView {
        new_arrivals: c.new_arrivals(NEW_ARRIVALS_LIMIT).into_iter().map(BookDto::from).collect(),
        popular: c.popular(POPULAR_LIMIT).into_iter().map(BookDto::from).collect(),
        shelf: c.all().iter().take(HOME_SHELF_LIMIT).map(BookDto::from).collect(),
    })
}

/// The list screen's view: current category filter combined with the
/// current search query.
pub fn list_books(catalog: &CatalogState) -> Vec<BookDto> {
    debug!("list_books");
    catalog.with(|c, browse| {
        c.search(&browse.query, browse.selected)
            .into_iter()
            .map(BookDto::from)
            .collect()
    })
}

/// Selects a category chip (`None` is the "all" sentinel) and returns the
/// refreshed list.
pub fn set_category(catalog: &CatalogState, category: Option<Category>) -> Vec<BookDto> {
    debug!(?category, "set_category");
    catalog.with_mut(|c, browse| {
        browse.selected = CategoryFilter::from(category);
        c.search(&browse.query, browse.selected)
            .into_iter()
            .map(BookDto::from)
            .collect()
    })
}

/// Updates the search query and returns the refreshed list.
pub fn set_search_query(catalog: &CatalogState, query: &str) -> Result<Vec<BookDto>, ApiError> {
    let query = validate_search_query(query)?;
    debug!(query = %query, "set_search_query");
    Ok(catalog.with_mut(|c, browse| {
        browse.query = query;
        c.search(&browse.query, browse.selected)
            .into_iter()
            .map(BookDto::from)
            .collect()
    }))
}

/// The "new arrivals" list (the home shelf's "more" screen).
pub fn new_books(catalog: &CatalogState) -> Vec<BookDto> {
    catalog.with(|c, _| c.new_arrivals(NEW_ARRIVALS_LIMIT).into_iter().map(BookDto::from).collect())
}

/// The "popular" list.
pub fn popular_books(catalog: &CatalogState) -> Vec<BookDto> {
    catalog.with(|c, _| c.popular(POPULAR_LIMIT).into_iter().map(BookDto::from).collect())
}

/// The detail screen's book.
pub fn get_book(catalog: &CatalogState, id: &str) -> Result<BookDto, ApiError> {
    debug!(id = %id, "get_book");
    catalog
        .with(|c, _| c.get(id).map(BookDto::from))
        .ok_or_else(|| ApiError::not_found("Book", id))
}

// =============================================================================
// Admin Operations
// =============================================================================

/// Registers a new book. Admin only.
pub fn create_book(
    session: &SessionState,
    catalog: &CatalogState,
    input: BookInput,
) -> Result<BookDto, ApiError> {
    require_admin(session)?;

    let draft = input.into_draft();
    validate_book_draft(&draft)?;

    let dto = catalog.with_mut(|c, _| BookDto::from(c.insert(draft)));
    info!(id = %dto.id, title = %dto.title, "Book created");
    Ok(dto)
}

/// Edits an existing book. Admin only.
///
/// ## Returns
/// `Ok(None)` when the identifier is unknown; the edit is a no-op, not an
/// error.
pub fn update_book(
    session: &SessionState,
    catalog: &CatalogState,
    id: &str,
    input: BookInput,
) -> Result<Option<BookDto>, ApiError> {
    require_admin(session)?;

    let draft = input.into_draft();
    validate_book_draft(&draft)?;

    let updated = catalog.with_mut(|c, _| c.update(id, draft).map(BookDto::from));
    match &updated {
        Some(dto) => info!(id = %dto.id, "Book updated"),
        None => debug!(id = %id, "update_book on unknown id (no-op)"),
    }
    Ok(updated)
}

/// Removes a book. Admin only. Unknown identifiers are a no-op.
pub fn delete_book(
    session: &SessionState,
    catalog: &CatalogState,
    id: &str,
) -> Result<bool, ApiError> {
    require_admin(session)?;

    let removed = catalog.with_mut(|c, _| c.delete(id));
    if removed {
        info!(id = %id, "Book deleted");
    } else {
        debug!(id = %id, "delete_book on unknown id (no-op)");
    }
    Ok(removed)
}
