mod common;

use std::sync::Arc;

use auth::FixedClock;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

fn nanophotonics() -> serde_json::Value {
    json!({
        "ISBN": "978-1-4020-8345-0",
        "author": "Jane Doe",
        "currency": "XOF",
        "description": "book description here",
        "language": "zarma",
        "page_count": 100,
        "price": 6.5,
        "published_date": "jul, 2021",
        "publisher": "Edition africaine",
        "rating": 4.0,
        "title": "Experiments, Science, and Fashion in Nanophotonics",
        "voters": 200
    })
}

fn classic() -> serde_json::Value {
    json!({
        "ISBN": "978-0-14-044913-6",
        "author": "Homer",
        "published_date": "Jan, 1999",
        "publisher": "Penguin",
        "rating": 5.0,
        "title": "The Odyssey"
    })
}

#[tokio::test]
async fn test_list_books_empty_catalog() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/books/")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Database is empty");
}

#[tokio::test]
async fn test_create_book_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/books/")
        .json(&nanophotonics())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.books.count().await, 0);
}

#[tokio::test]
async fn test_create_book_rejects_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post_authenticated("/api/books/", "not.a.token")
        .json(&nanophotonics())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let clock = Arc::new(FixedClock::new(chrono::Utc::now()));
    let app = TestApp::spawn_with_clock(clock.clone()).await;
    let token = app.signup_token("librarian@example.com").await;

    clock.advance(chrono::Duration::seconds(common::TEST_TTL_SECONDS + 1));

    let response = app
        .post_authenticated("/api/books/", &token)
        .json(&nanophotonics())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid or expired token");
    assert_eq!(app.books.count().await, 0);
}

#[tokio::test]
async fn test_create_and_get_book() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;

    let response = app
        .post_authenticated("/api/books/", &token)
        .json(&nanophotonics())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["ISBN"], "978-1-4020-8345-0");
    assert_eq!(body["data"]["page_count"], 100);

    let by_isbn: serde_json::Value = app
        .get("/api/books/bookByIsbn/978-1-4020-8345-0")
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(
        by_isbn["data"]["title"],
        "Experiments, Science, and Fashion in Nanophotonics"
    );

    let response = app
        .get("/api/books/title/The%20Odyssey")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "No book with this title: The Odyssey found");
}

#[tokio::test]
async fn test_create_book_minimal_fields() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;

    let response = app
        .post_authenticated("/api/books/", &token)
        .json(&json!({ "ISBN": "111", "title": "Untitled draft" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["author"], "");
    assert_eq!(body["data"]["page_count"], 0);
    assert!(body["data"]["rating"].is_null());
}

#[tokio::test]
async fn test_create_book_missing_title() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;

    let response = app
        .post_authenticated("/api/books/", &token)
        .json(&json!({ "ISBN": "111" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_book_oversized_isbn() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;

    let response = app
        .post_authenticated("/api/books/", &token)
        .json(&json!({ "ISBN": "9".repeat(33), "title": "Too long" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid book: ISBN must be at most 32 characters");
    assert_eq!(app.books.count().await, 0);
}

#[tokio::test]
async fn test_update_book_oversized_currency() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;
    app.create_book(&token, nanophotonics()).await;

    let response = app
        .put_authenticated("/api/books/978-1-4020-8345-0", &token)
        .json(&json!({ "currency": "X".repeat(17) }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_book_duplicate_isbn() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;
    app.create_book(&token, nanophotonics()).await;

    let response = app
        .post_authenticated("/api/books/", &token)
        .json(&nanophotonics())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.books.count().await, 1);
}

#[tokio::test]
async fn test_listings() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;
    app.create_book(&token, nanophotonics()).await;
    app.create_book(&token, classic()).await;

    let all: serde_json::Value = app
        .get("/api/books/")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let by_author: serde_json::Value = app
        .get("/api/books/author/Homer")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_author["data"][0]["title"], "The Odyssey");

    let by_year: serde_json::Value = app
        .get("/api/books/year/2021")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_year["data"].as_array().unwrap().len(), 1);
    assert_eq!(by_year["data"][0]["ISBN"], "978-1-4020-8345-0");

    let by_publisher: serde_json::Value = app
        .get("/api/books/publisher/Penguin")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_publisher["data"][0]["ISBN"], "978-0-14-044913-6");

    let famous: serde_json::Value = app
        .get("/api/books/famous/")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let famous = famous["data"].as_array().unwrap();
    assert_eq!(famous.len(), 1);
    assert_eq!(famous[0]["title"], "The Odyssey");
}

#[tokio::test]
async fn test_listing_not_found_messages() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;
    app.create_book(&token, nanophotonics()).await;

    let response = app.get("/api/books/year/1850").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No book with this year: 1850 found");

    let response = app.get("/api/books/famous/").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No book found");
}

#[tokio::test]
async fn test_update_book() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;
    app.create_book(&token, nanophotonics()).await;

    let response = app
        .put_authenticated("/api/books/978-1-4020-8345-0", &token)
        .json(&json!({ "price": 9.5, "rating": 5.0 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["price"], 9.5);
    assert_eq!(body["data"]["rating"], 5.0);
    assert_eq!(body["data"]["author"], "Jane Doe");
}

#[tokio::test]
async fn test_update_unknown_book() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;

    let response = app
        .put_authenticated("/api/books/000", &token)
        .json(&json!({ "price": 9.5 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_book() {
    let app = TestApp::spawn().await;
    let token = app.signup_token("librarian@example.com").await;
    app.create_book(&token, nanophotonics()).await;

    let response = app
        .delete_authenticated("/api/books/978-1-4020-8345-0", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "book deleted successfully!");
    assert_eq!(app.books.count().await, 0);

    let response = app
        .delete_authenticated("/api/books/978-1-4020-8345-0", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
