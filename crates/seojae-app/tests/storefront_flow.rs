//! End-to-end flows over the provider layer: browse, session, cart,
//! reviews, checkout, and restart restoration.

use std::path::PathBuf;

use seojae_app::api::{cart, catalog, purchase, review, session};
use seojae_app::{App, AppConfig, ErrorCode};
use seojae_core::{Category, ADMIN_EMAIL};

async fn start_app() -> App {
    App::start(AppConfig::in_memory())
        .await
        .expect("in-memory app should start")
}

fn temp_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("seojae-test-{}.db", uuid::Uuid::new_v4()))
}

fn cleanup_db(path: &PathBuf) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

// =============================================================================
// Browse
// =============================================================================

#[tokio::test]
async fn home_shelves_are_populated() {
    let app = start_app().await;

    let home = catalog::home(app.catalog());
    assert_eq!(home.new_arrivals.len(), 5);
    assert_eq!(home.popular.len(), 5);
    assert_eq!(home.shelf.len(), 8);

    // Newest seed book leads the new arrivals shelf
    assert_eq!(home.new_arrivals[0].title, "러스트 프로그래밍 공식 가이드");
    // Popular excludes the out-of-stock essay
    assert!(home.popular.iter().all(|b| b.in_stock));
}

#[tokio::test]
async fn category_and_query_combine() {
    let app = start_app().await;

    let novels = catalog::set_category(app.catalog(), Some(Category::Novel));
    assert!(!novels.is_empty());
    assert!(novels.iter().all(|b| b.category == Category::Novel));

    let hits = catalog::set_search_query(app.catalog(), "아몬드").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "아몬드");

    // Same query in a category it doesn't belong to
    let misses = catalog::set_category(app.catalog(), Some(Category::Tech));
    assert!(misses.is_empty());

    // Clearing the query returns the whole selected category
    let techs = catalog::set_search_query(app.catalog(), "").unwrap();
    assert!(!techs.is_empty());
    assert!(techs.iter().all(|b| b.category == Category::Tech));

    // Back to the sentinel
    let all = catalog::set_category(app.catalog(), None);
    assert_eq!(all.len(), catalog::list_books(app.catalog()).len());
}

#[tokio::test]
async fn get_book_resolves_and_misses() {
    let app = start_app().await;
    let first = catalog::list_books(app.catalog())[0].clone();

    let found = catalog::get_book(app.catalog(), &first.id).unwrap();
    assert_eq!(found.title, first.title);

    let err = catalog::get_book(app.catalog(), "missing").unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn login_is_mock_but_admin_is_discriminated() {
    let app = start_app().await;

    let view = session::login(app.store(), app.session(), "hana@example.com", "secret1")
        .await
        .unwrap();
    assert!(view.is_authenticated);
    assert!(!view.is_admin);
    assert_eq!(view.user.as_ref().unwrap().name, "hana");

    let view = session::login(app.store(), app.session(), ADMIN_EMAIL, "secret1")
        .await
        .unwrap();
    assert!(view.is_admin);

    let err = session::login(app.store(), app.session(), "not-an-email", "secret1")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    // The password is never checked on sign-in; any length works
    let view = session::login(app.store(), app.session(), "a@b.co", "x")
        .await
        .unwrap();
    assert!(view.is_authenticated);

    // Registration is where the minimum length lives
    let err = session::register(app.store(), app.session(), "a@b.co", "short", "이름")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

#[tokio::test]
async fn logout_and_profile_update() {
    let app = start_app().await;

    session::register(app.store(), app.session(), "park@books.kr", "secret1", "박지민")
        .await
        .unwrap();

    let view = session::update_profile(
        app.store(),
        app.session(),
        session::ProfileInput {
            name: Some("박지민 (수정)".to_string()),
            email: None,
        },
    )
    .await
    .unwrap();
    let user = view.user.unwrap();
    assert_eq!(user.name, "박지민 (수정)");
    assert_eq!(user.email, "park@books.kr");

    let view = session::logout(app.store(), app.session()).await;
    assert!(!view.is_authenticated);

    // Anonymous profile edits are rejected
    let err = session::update_profile(app.store(), app.session(), Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn cart_upserts_and_derives_totals() {
    let app = start_app().await;
    let books = catalog::list_books(app.catalog());
    let (a, b) = (&books[0], &books[1]);

    cart::add_to_cart(app.store(), app.catalog(), app.cart(), &a.id, Some(1))
        .await
        .unwrap();
    cart::add_to_cart(app.store(), app.catalog(), app.cart(), &a.id, Some(2))
        .await
        .unwrap();
    let view = cart::add_to_cart(app.store(), app.catalog(), app.cart(), &b.id, None)
        .await
        .unwrap();

    // Same book twice with 1 and 2 merges into one line of 3
    assert_eq!(view.totals.line_count, 2);
    assert_eq!(view.lines[0].quantity, 3);
    assert_eq!(view.totals.total_quantity, 4);
    assert_eq!(
        view.totals.total_price.won(),
        a.price.won() * 3 + b.price.won()
    );

    // Quantity 0 removes; negative removes too
    let view = cart::set_cart_quantity(app.store(), app.cart(), &a.id, 0).await;
    assert_eq!(view.totals.line_count, 1);
    let view = cart::set_cart_quantity(app.store(), app.cart(), &b.id, -2).await;
    assert!(view.lines.is_empty());
}

#[tokio::test]
async fn cart_rejects_unknown_book_and_bad_quantity() {
    let app = start_app().await;
    let book = &catalog::list_books(app.catalog())[0];

    let err = cart::add_to_cart(app.store(), app.catalog(), app.cart(), "missing", None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = cart::add_to_cart(app.store(), app.catalog(), app.cart(), &book.id, Some(0))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

// =============================================================================
// Admin
// =============================================================================

fn sample_input() -> catalog::BookInput {
    serde_json::from_value(serde_json::json!({
        "title": "새로 들어온 책",
        "author": "저자",
        "publisher": "출판사",
        "price": 17000,
        "stock": 4,
        "category": "essay",
        "publishDate": "2025-03-01"
    }))
    .unwrap()
}

#[tokio::test]
async fn admin_crud_is_role_gated() {
    let app = start_app().await;

    // Anonymous
    let err = catalog::create_book(app.session(), app.catalog(), sample_input()).unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);

    // Plain user
    session::login(app.store(), app.session(), "hana@example.com", "secret1")
        .await
        .unwrap();
    let err = catalog::create_book(app.session(), app.catalog(), sample_input()).unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);

    // Admin
    session::login(app.store(), app.session(), ADMIN_EMAIL, "secret1")
        .await
        .unwrap();
    let created = catalog::create_book(app.session(), app.catalog(), sample_input()).unwrap();
    assert_eq!(created.title, "새로 들어온 책");
    assert!(catalog::get_book(app.catalog(), &created.id).is_ok());

    let mut edited = sample_input();
    edited.stock = 9;
    let updated = catalog::update_book(app.session(), app.catalog(), &created.id, edited)
        .unwrap()
        .unwrap();
    assert_eq!(updated.stock, 9);

    // Unknown ids are no-ops, not errors
    assert!(catalog::update_book(app.session(), app.catalog(), "missing", sample_input())
        .unwrap()
        .is_none());
    assert!(!catalog::delete_book(app.session(), app.catalog(), "missing").unwrap());

    assert!(catalog::delete_book(app.session(), app.catalog(), &created.id).unwrap());
    assert!(catalog::get_book(app.catalog(), &created.id).is_err());
}

// =============================================================================
// Reviews
// =============================================================================

#[tokio::test]
async fn review_lifecycle_with_ownership() {
    let app = start_app().await;
    let book = catalog::list_books(app.catalog())[0].clone();

    // Anonymous submissions are rejected
    let err = review::submit_review(app.store(), app.session(), &book.id, 5, "좋아요")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);

    session::login(app.store(), app.session(), "hana@example.com", "secret1")
        .await
        .unwrap();

    // Rating bounds
    let err = review::submit_review(app.store(), app.session(), &book.id, 6, "x")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let submitted = review::submit_review(
        app.store(),
        app.session(),
        &book.id,
        5,
        "단숨에 읽었습니다.",
    )
    .await
    .unwrap();
    assert_eq!(submitted.user_name, "hana");

    let listed = review::list_reviews(app.store(), &book.id).await;
    assert_eq!(listed.len(), 1);

    let updated = review::update_review(
        app.store(),
        app.session(),
        &book.id,
        &submitted.id,
        4,
        "다시 보니 4점.",
    )
    .await
    .unwrap();
    assert_eq!(updated.rating, 4);
    assert_eq!(updated.created_at, submitted.created_at);

    let mine = review::my_reviews(app.store(), app.session()).await.unwrap();
    assert_eq!(mine.len(), 1);

    // A different user cannot touch it
    session::login(app.store(), app.session(), "other@example.com", "secret1")
        .await
        .unwrap();
    let err = review::update_review(app.store(), app.session(), &book.id, &submitted.id, 1, "!")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);
    let err = review::delete_review(app.store(), app.session(), &book.id, &submitted.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);

    // Deleting an unknown review is a no-op
    review::delete_review(app.store(), app.session(), &book.id, "missing")
        .await
        .unwrap();

    // The owner can delete
    session::login(app.store(), app.session(), "hana@example.com", "secret1")
        .await
        .unwrap();
    // Re-login assigns a fresh user id, so the earlier review now belongs
    // to someone else; verify the ownership check sees that too
    let err = review::delete_review(app.store(), app.session(), &book.id, &submitted.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn checkout_snapshots_appends_and_clears() {
    let app = start_app().await;
    let books = catalog::list_books(app.catalog());

    // Empty cart cannot be purchased
    session::login(app.store(), app.session(), "hana@example.com", "secret1")
        .await
        .unwrap();
    let err = purchase::checkout(app.store(), app.session(), app.cart())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    cart::add_to_cart(app.store(), app.catalog(), app.cart(), &books[0].id, Some(2))
        .await
        .unwrap();
    cart::add_to_cart(app.store(), app.catalog(), app.cart(), &books[1].id, None)
        .await
        .unwrap();

    let batch = purchase::checkout(app.store(), app.session(), app.cart())
        .await
        .unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].quantity, 2);
    assert_eq!(
        batch[0].line_total.won(),
        batch[0].price.won() * batch[0].quantity
    );

    // Cart is cleared only after the history write succeeded
    assert!(cart::get_cart(app.cart()).lines.is_empty());

    // A second purchase appends rather than overwrites
    cart::add_to_cart(app.store(), app.catalog(), app.cart(), &books[2].id, None)
        .await
        .unwrap();
    purchase::checkout(app.store(), app.session(), app.cart())
        .await
        .unwrap();

    let history = purchase::purchase_history(app.store(), app.session())
        .await
        .unwrap();
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn checkout_requires_sign_in() {
    let app = start_app().await;

    let err = purchase::checkout(app.store(), app.session(), app.cart())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);
}

// =============================================================================
// Restart Restoration
// =============================================================================

#[tokio::test]
async fn restart_restores_session_and_cart_in_order() {
    let path = temp_db_path();

    let first_user_id;
    let first_lines;
    {
        let app = App::start(AppConfig::new(&path)).await.unwrap();
        let view = session::login(app.store(), app.session(), "hana@example.com", "secret1")
            .await
            .unwrap();
        first_user_id = view.user.unwrap().id;

        let books = catalog::list_books(app.catalog());
        cart::add_to_cart(app.store(), app.catalog(), app.cart(), &books[3].id, Some(2))
            .await
            .unwrap();
        cart::add_to_cart(app.store(), app.catalog(), app.cart(), &books[1].id, None)
            .await
            .unwrap();
        first_lines = cart::get_cart(app.cart()).lines;
        app.shutdown().await;
    }

    let app = App::start(AppConfig::new(&path)).await.unwrap();

    let view = session::get_session(app.session());
    assert!(view.is_authenticated);
    assert_eq!(view.user.unwrap().id, first_user_id);

    let restored = cart::get_cart(app.cart()).lines;
    assert_eq!(restored.len(), first_lines.len());
    for (restored, original) in restored.iter().zip(first_lines.iter()) {
        assert_eq!(restored.book_id, original.book_id);
        assert_eq!(restored.quantity, original.quantity);
        assert_eq!(restored.price.won(), original.price.won());
    }

    app.shutdown().await;
    cleanup_db(&path);
}
