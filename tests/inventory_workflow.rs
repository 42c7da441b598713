//! Book inventory workflows, through the service layer and the admin routes

mod common;

use axum::http::StatusCode;
use common::{body_json, body_string, book, book_form, TestApp, ISBN};
use library_portal::{
    models::{AdjustDirection, BookForm, OutcomeStatus, Role},
    AppError,
};
use serde_json::json;

fn form(author: &str, quantity: &str) -> BookForm {
    BookForm {
        isbn: ISBN.into(),
        book_name: "The Pragmatic Programmer".into(),
        author_name: author.into(),
        publisher_name: "Addison-Wesley".into(),
        quantity: quantity.into(),
    }
}

#[tokio::test]
async fn test_add_to_fresh_store() {
    let app = TestApp::new();

    let result = app.services.inventory.add_book(&form("Andrew Hunt", "4")).await.unwrap();
    assert_eq!(result.status, OutcomeStatus::Success);
    assert_eq!(result.message, "Book(s) added successfully");
    assert_eq!(result.redirect, "/admin/dashboard");

    let stored = app.books.get(ISBN).unwrap();
    assert_eq!(stored.available, 4);
    assert_eq!(stored.borrowed, 0);
}

#[tokio::test]
async fn test_readding_same_book_only_offers_top_up() {
    let app = TestApp::new();
    app.books.put(book(2, 1));

    let result = app
        .services
        .inventory
        .add_book(&form(" andrew hunt ", "3"))
        .await
        .unwrap();
    assert_eq!(result.status, OutcomeStatus::Confirm);
    assert_eq!(result.redirect, format!("/admin/update-quantity?isbn={}&quantity=3", ISBN));
    assert_eq!(result.cancel.as_deref(), Some("/admin/add-books"));
    assert_eq!(app.books.snapshot(), vec![book(2, 1)]);
}

#[tokio::test]
async fn test_readding_with_other_author_fails() {
    let app = TestApp::new();
    app.books.put(book(2, 0));

    let err = app
        .services
        .inventory
        .add_book(&form("David Thomas", "1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(app.books.snapshot(), vec![book(2, 0)]);
}

#[tokio::test]
async fn test_add_rejects_bad_isbn_and_quantity() {
    let app = TestApp::new();
    let inventory = &app.services.inventory;

    let mut short = form("Andrew Hunt", "1");
    short.isbn = "97800".into();
    assert!(matches!(inventory.add_book(&short).await, Err(AppError::Validation(_))));

    for quantity in ["0", "-3", "many"] {
        let err = inventory.add_book(&form("Andrew Hunt", quantity)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidQuantity(_)));
    }
    assert!(app.books.snapshot().is_empty());
}

#[tokio::test]
async fn test_remove_all_unborrowed_deletes_row() {
    let app = TestApp::new();
    app.books.put(book(3, 0));

    let result = app.services.inventory.remove_book(&form("Andrew Hunt", "3")).await.unwrap();
    assert_eq!(result.message, "Book(s) permanently removed from library");
    assert!(app.books.get(ISBN).is_none());
}

#[tokio::test]
async fn test_remove_all_while_borrowed_keeps_row() {
    let app = TestApp::new();
    app.books.put(book(3, 2));

    let result = app.services.inventory.remove_book(&form("Andrew Hunt", "3")).await.unwrap();
    assert_eq!(result.message, "Book(s) removed successfully! (Available set to zero)");
    assert_eq!(app.books.get(ISBN), Some(book(0, 2)));
}

#[tokio::test]
async fn test_partial_remove() {
    let app = TestApp::new();
    app.books.put(book(5, 0));

    let result = app.services.inventory.remove_book(&form("Andrew Hunt", "2")).await.unwrap();
    assert_eq!(result.message, "Book(s) removed successfully");
    assert_eq!(app.books.get(ISBN).unwrap().available, 3);
}

#[tokio::test]
async fn test_remove_more_than_available_fails() {
    let app = TestApp::new();
    app.books.put(book(2, 0));

    let err = app
        .services
        .inventory
        .remove_book(&form("Andrew Hunt", "3"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidQuantity(_)));
    assert_eq!(app.books.get(ISBN), Some(book(2, 0)));
}

#[tokio::test]
async fn test_remove_unknown_or_mismatched() {
    let app = TestApp::new();
    let inventory = &app.services.inventory;

    let err = inventory.remove_book(&form("Andrew Hunt", "1")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    app.books.put(book(2, 0));
    let err = inventory.remove_book(&form("Someone Else", "1")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(app.books.get(ISBN), Some(book(2, 0)));
}

#[tokio::test]
async fn test_update_quantity() {
    let app = TestApp::new();
    let inventory = &app.services.inventory;

    // Unknown ISBN: nothing created, still reported as done
    let result = inventory.update_quantity(ISBN, Some("4")).await.unwrap();
    assert_eq!(result.status, OutcomeStatus::Success);
    assert!(app.books.snapshot().is_empty());

    app.books.put(book(1, 0));
    let result = inventory.update_quantity(ISBN, Some("4")).await.unwrap();
    assert_eq!(
        result.message,
        format!("4 book(s) added successfully to existing inventory (ISBN: {})!", ISBN)
    );
    assert_eq!(app.books.get(ISBN).unwrap().available, 5);

    // Unusable quantities count as one copy
    inventory.update_quantity(ISBN, Some("lots")).await.unwrap();
    inventory.update_quantity(ISBN, Some("-7")).await.unwrap();
    inventory.update_quantity(ISBN, None).await.unwrap();
    assert_eq!(app.books.get(ISBN).unwrap().available, 8);
}

#[tokio::test]
async fn test_adjust_by_one() {
    let app = TestApp::new();
    let inventory = &app.services.inventory;
    app.books.put(book(1, 0));

    let result = inventory.adjust_by_one(ISBN, AdjustDirection::Increment).await.unwrap();
    assert!(result.success);
    assert_eq!(result.available, Some(2));

    inventory.adjust_by_one(ISBN, AdjustDirection::Decrement).await.unwrap();
    let result = inventory.adjust_by_one(ISBN, AdjustDirection::Decrement).await.unwrap();
    assert!(result.success);
    assert_eq!(result.available, Some(0));

    let result = inventory.adjust_by_one(ISBN, AdjustDirection::Decrement).await.unwrap();
    assert!(!result.success);
    assert_eq!(app.books.get(ISBN).unwrap().available, 0);

    let result = inventory
        .adjust_by_one("9999999999999", AdjustDirection::Decrement)
        .await
        .unwrap();
    assert!(!result.success);
}

#[tokio::test]
async fn test_add_books_route_and_top_up_link() {
    let app = TestApp::new();
    let admin = app.session_cookie(Role::Admin);

    let response = app
        .post_form("/admin/add-books", &book_form("Andrew Hunt", "2"), Some(&admin))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Book(s) added successfully"));
    assert_eq!(app.books.get(ISBN), Some(book(2, 0)));

    let response = app
        .post_form("/admin/add-books", &book_form("Andrew Hunt", "3"), Some(&admin))
        .await;
    let page = body_string(response).await;
    assert!(page.contains("already exists in the library"));
    assert!(page.contains("/admin/update-quantity?isbn=9780000000001&amp;quantity=3"));
    assert_eq!(app.books.get(ISBN), Some(book(2, 0)));

    let response = app
        .get(&format!("/admin/update-quantity?isbn={}&quantity=3", ISBN), Some(&admin))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.books.get(ISBN), Some(book(5, 0)));
}

#[tokio::test]
async fn test_remove_books_route_reports_quantity_error() {
    let app = TestApp::new();
    let admin = app.session_cookie(Role::Admin);
    app.books.put(book(1, 0));

    let response = app
        .post_form("/admin/remove-books", &book_form("Andrew Hunt", "4"), Some(&admin))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let page = body_string(response).await;
    assert!(page.contains("Quantity to remove (4) is more than the available quantity (1)."));
    assert_eq!(app.books.get(ISBN), Some(book(1, 0)));

    let response = app
        .post_form("/admin/remove-books", &book_form("Andrew Hunt", "1"), Some(&admin))
        .await;
    assert!(body_string(response).await.contains("Book(s) permanently removed from library"));
    assert!(app.books.get(ISBN).is_none());
}

#[tokio::test]
async fn test_manage_inventory_lists_books() {
    let app = TestApp::new();
    let admin = app.session_cookie(Role::Admin);
    app.books.put(book(4, 1));

    let response = app.get("/admin/manage-inventory", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("The Pragmatic Programmer"));
    assert!(page.contains(ISBN));
}

#[tokio::test]
async fn test_single_copy_endpoints() {
    let app = TestApp::new();
    let admin = app.session_cookie(Role::Admin);
    app.books.put(book(0, 1));

    let response = app
        .post_json("/api/inventory/remove-one", json!({ "isbn": ISBN }), Some(&admin))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);

    let response = app
        .post_json("/api/inventory/add-one", json!({ "isbn": ISBN }), Some(&admin))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["available"], 1);
    assert_eq!(app.books.get(ISBN), Some(book(1, 1)));
}

#[tokio::test]
async fn test_book_lookup() {
    let app = TestApp::new();
    app.books.put(book(2, 0));

    let response = app
        .post_json("/books/getBookDetailsByISBN", json!({ "isbn": ISBN }), None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["book"]["book_name"], "The Pragmatic Programmer");

    let response = app
        .post_json("/books/getBookDetailsByISBN", json!({ "isbn": "123" }), None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid ISBN. It must be 13 characters long.");

    let response = app
        .post_json("/books/getBookDetailsByISBN", json!({ "isbn": "9999999999999" }), None)
        .await;
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_add_rejects_whitespace_only_details() {
    let app = TestApp::new();
    let admin = app.session_cookie(Role::Admin);

    let form = format!(
        "isbn={}&bookName=+++&authorName=+&publisherName=+&quantity=1",
        ISBN
    );
    let response = app.post_form("/admin/add-books", &form, Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("All fields are required."));
    assert!(app.books.snapshot().is_empty());
}

#[tokio::test]
async fn test_overflowing_top_up_is_a_store_error() {
    let app = TestApp::new();
    app.books.put(book(i32::MAX - 1, 0));
    let inventory = &app.services.inventory;

    let err = inventory.update_quantity(ISBN, Some("5")).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(app.books.get(ISBN).unwrap().available, i32::MAX - 1);

    inventory.adjust_by_one(ISBN, AdjustDirection::Increment).await.unwrap();
    let err = inventory
        .adjust_by_one(ISBN, AdjustDirection::Increment)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(app.books.get(ISBN).unwrap().available, i32::MAX);
}
