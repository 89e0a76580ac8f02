//! Borrow/return transaction tests: the stock invariant under sequential
//! and concurrent access
//!
//! Run with: cargo test -- --ignored (requires both services running
//! against migrated databases with a shared JWT secret)

mod common;

use common::*;
use reqwest::Client;

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_walkthrough() {
    let client = Client::new();
    let (_, admin_token) = signup(&client, "admin").await;
    let (_, user_token) = signup(&client, "user").await;
    let title = unique("book");
    let book_id = create_book(&client, &admin_token, &title, 2).await;

    // First borrow: stock 2 -> 1, one open loan
    assert!(borrow(&client, &user_token, book_id).await.status().is_success());
    assert_eq!(stock_of(&client, book_id).await, 1);

    let rows = borrowings_titled(&client, &user_token, &title).await;
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["return_date"].is_null());
    let first_loan = rows[0]["id"].as_i64().unwrap();

    // Second borrow: stock 1 -> 0
    assert!(borrow(&client, &user_token, book_id).await.status().is_success());
    assert_eq!(stock_of(&client, book_id).await, 0);

    // Third borrow: conflict, stock stays 0
    let response = borrow(&client, &user_token, book_id).await;
    assert_eq!(response.status(), 409);
    assert_eq!(stock_of(&client, book_id).await, 0);

    // Return the first loan: stock 0 -> 1, return_date set
    assert!(return_loan(&client, &user_token, first_loan).await.status().is_success());
    assert_eq!(stock_of(&client, book_id).await, 1);

    let rows = borrowings_titled(&client, &user_token, &title).await;
    let returned = rows
        .iter()
        .find(|r| r["id"].as_i64() == Some(first_loan))
        .expect("returned loan missing from history");
    assert!(returned["return_date"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_borrowing_at_zero_stock_leaves_no_trace() {
    let client = Client::new();
    let (_, admin_token) = signup(&client, "admin").await;
    let title = unique("book");
    let book_id = create_book(&client, &admin_token, &title, 0).await;

    let response = borrow(&client, &admin_token, book_id).await;
    assert_eq!(response.status(), 409);

    assert_eq!(stock_of(&client, book_id).await, 0);
    assert!(borrowings_titled(&client, &admin_token, &title).await.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_borrowing_unknown_book_is_not_found() {
    let client = Client::new();
    let (_, token) = signup(&client, "user").await;

    let response = borrow(&client, &token, 999999999).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_double_return_increments_stock_once() {
    let client = Client::new();
    let (_, admin_token) = signup(&client, "admin").await;
    let title = unique("book");
    let book_id = create_book(&client, &admin_token, &title, 1).await;

    assert!(borrow(&client, &admin_token, book_id).await.status().is_success());
    let loan_id = borrowings_titled(&client, &admin_token, &title).await[0]["id"]
        .as_i64()
        .unwrap();

    assert!(return_loan(&client, &admin_token, loan_id).await.status().is_success());
    assert_eq!(stock_of(&client, book_id).await, 1);

    // Idempotency guard: the second return is a conflict and must not
    // increment stock again
    let response = return_loan(&client, &admin_token, loan_id).await;
    assert_eq!(response.status(), 409);
    assert_eq!(stock_of(&client, book_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_returning_unknown_loan_is_not_found() {
    let client = Client::new();
    let (_, token) = signup(&client, "user").await;

    let response = return_loan(&client, &token, 999999999).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_deleting_a_loaned_book_is_refused() {
    let client = Client::new();
    let (_, admin_token) = signup(&client, "admin").await;
    let title = unique("book");
    let book_id = create_book(&client, &admin_token, &title, 1).await;

    assert!(borrow(&client, &admin_token, book_id).await.status().is_success());

    let response = client
        .delete(format!("{}/books/{}", main_url(), book_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Book and loan are unchanged
    assert_eq!(stock_of(&client, book_id).await, 0);
    let rows = borrowings_titled(&client, &admin_token, &title).await;
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["return_date"].is_null());

    // After the return the deletion goes through
    let loan_id = rows[0]["id"].as_i64().unwrap();
    assert!(return_loan(&client, &admin_token, loan_id).await.status().is_success());

    let response = client
        .delete(format!("{}/books/{}", main_url(), book_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrows_of_the_last_copy() {
    let client = Client::new();
    let (_, admin_token) = signup(&client, "admin").await;
    let (_, user_token) = signup(&client, "user").await;
    let title = unique("book");
    let book_id = create_book(&client, &admin_token, &title, 1).await;

    // Exactly one of two simultaneous borrows may win the last copy
    let (first, second) = tokio::join!(
        borrow(&client, &user_token, book_id),
        borrow(&client, &admin_token, book_id),
    );

    let statuses = [first.status().as_u16(), second.status().as_u16()];
    let wins = statuses.iter().filter(|s| **s == 200).count();
    let conflicts = statuses.iter().filter(|s| **s == 409).count();

    assert_eq!(wins, 1, "exactly one borrow must succeed, got {:?}", statuses);
    assert_eq!(conflicts, 1, "the loser must observe a conflict, got {:?}", statuses);

    assert_eq!(stock_of(&client, book_id).await, 0);
    assert_eq!(borrowings_titled(&client, &admin_token, &title).await.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_users_see_only_their_own_history() {
    let client = Client::new();
    let (_, admin_token) = signup(&client, "admin").await;
    let (_, first_token) = signup(&client, "user").await;
    let (_, second_token) = signup(&client, "user").await;
    let title = unique("book");
    let book_id = create_book(&client, &admin_token, &title, 2).await;

    assert!(borrow(&client, &first_token, book_id).await.status().is_success());
    assert!(borrow(&client, &second_token, book_id).await.status().is_success());

    // Each user sees exactly one row for this title: their own
    let first_rows = borrowings_titled(&client, &first_token, &title).await;
    let second_rows = borrowings_titled(&client, &second_token, &title).await;
    assert_eq!(first_rows.len(), 1);
    assert_eq!(second_rows.len(), 1);
    assert_ne!(first_rows[0]["user_id"], second_rows[0]["user_id"]);

    // The admin sees both
    assert_eq!(borrowings_titled(&client, &admin_token, &title).await.len(), 2);

    // Listing order is newest first
    let admin_rows = borrowings_titled(&client, &admin_token, &title).await;
    assert!(admin_rows[0]["id"].as_i64() > admin_rows[1]["id"].as_i64());
}
