//! Shared helpers for the HTTP integration suites.
//!
//! The suites run against live services started separately (auth on 5001,
//! main on 5002 by default, both signed with the same JWT secret).

#![allow(dead_code)]

use reqwest::Client;
use serde_json::{json, Value};

pub fn auth_url() -> String {
    std::env::var("AUTH_URL").unwrap_or_else(|_| "http://localhost:5001".to_string())
}

pub fn main_url() -> String {
    std::env::var("MAIN_URL").unwrap_or_else(|_| "http://localhost:5002".to_string())
}

/// Unique name so suites can re-run against the same databases
pub fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}_{}", prefix, nanos)
}

/// Register an account with the shared test password
pub async fn register(client: &Client, username: &str, role: &str) {
    let response = client
        .post(format!("{}/register", auth_url()))
        .json(&json!({
            "username": username,
            "password": "rahasia",
            "role": role,
            "full_name": "Integration Tester",
            "phone_number": "0812000000"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201, "registration failed for {}", username);
}

/// Log in and return the session token
pub async fn login(client: &Client, username: &str) -> String {
    let response = client
        .post(format!("{}/login", auth_url()))
        .json(&json!({ "username": username, "password": "rahasia" }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success(), "login failed for {}", username);

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Register a fresh account with the given role and return (username, token)
pub async fn signup(client: &Client, role: &str) -> (String, String) {
    let username = unique(role);
    register(client, &username, role).await;
    let token = login(client, &username).await;
    (username, token)
}

/// Create a book through the admin catalog endpoint and return its id
pub async fn create_book(client: &Client, admin_token: &str, title: &str, stock: i64) -> i64 {
    let response = client
        .post(format!("{}/books", main_url()))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "title": title,
            "author": "Pram",
            "year": 1980,
            "genre": "novel",
            "stock": stock
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201, "book creation failed");

    let body: Value = response.json().await.expect("Failed to parse book response");
    body["book"]["id"].as_i64().expect("No book id in response")
}

/// Read a book's current stock from the public catalog listing
pub async fn stock_of(client: &Client, book_id: i64) -> i64 {
    let response = client
        .get(format!("{}/books", main_url()))
        .send()
        .await
        .expect("Failed to send list books request");

    assert!(response.status().is_success());

    let books: Vec<Value> = response.json().await.expect("Failed to parse books");
    books
        .iter()
        .find(|b| b["id"].as_i64() == Some(book_id))
        .unwrap_or_else(|| panic!("book {} not in catalog", book_id))["stock"]
        .as_i64()
        .expect("stock is not a number")
}

/// Send a borrow request and return the raw response
pub async fn borrow(client: &Client, token: &str, book_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/borrow", main_url()))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "borrower_name": "Integration Tester",
            "borrower_phone": "0812000000"
        }))
        .send()
        .await
        .expect("Failed to send borrow request")
}

/// Send a return request and return the raw response
pub async fn return_loan(client: &Client, token: &str, borrowing_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/return", main_url()))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "borrowing_id": borrowing_id }))
        .send()
        .await
        .expect("Failed to send return request")
}

/// List the borrowings visible to the caller
pub async fn list_borrowings(client: &Client, token: &str) -> Vec<Value> {
    let response = client
        .get(format!("{}/borrowings/all", main_url()))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send list borrowings request");

    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse borrowings")
}

/// Borrowings for one book title, newest first
pub async fn borrowings_titled(client: &Client, token: &str, title: &str) -> Vec<Value> {
    list_borrowings(client, token)
        .await
        .into_iter()
        .filter(|b| b["title"].as_str() == Some(title))
        .collect()
}
