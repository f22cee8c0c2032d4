//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo test -- --ignored`

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

/// Client that does not follow redirects, so 303 responses and their
/// Location headers stay observable
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

/// Pick an existing book id from the catalog
async fn any_book_id(client: &Client) -> i64 {
    let body: Value = client
        .get(format!("{}/catalog/books", BASE_URL))
        .send()
        .await
        .expect("Failed to list books")
        .json()
        .await
        .expect("Failed to parse book list");
    body["book_list"][0]["id"].as_i64().expect("No books seeded")
}

/// Create a copy and return the redirect target (its canonical URL)
async fn create_copy(client: &Client, book_id: i64, imprint: &str) -> String {
    let response = client
        .post(format!("{}/catalog/bookinstance/create", BASE_URL))
        .form(&[
            ("book", book_id.to_string().as_str()),
            ("imprint", imprint),
            ("status", "Available"),
            ("due_back", ""),
        ])
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get("location")
        .expect("No Location header")
        .to_str()
        .expect("Bad Location header")
        .to_string()
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_book_instances() {
    let response = client()
        .get(format!("{}/catalog/bookinstances", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Book Instance List");
    assert!(body["bookinstance_list"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_detail_round_trip() {
    let client = client();
    let book_id = any_book_id(&client).await;

    let url = create_copy(&client, book_id, "Integration & Co, 2020").await;

    let response = client
        .get(format!("{}{}", BASE_URL, url))
        .send()
        .await
        .expect("Failed to fetch detail");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse detail");
    // The ampersand arrives escaped, as sanitized
    assert_eq!(
        body["bookinstance"]["imprint"],
        "Integration &amp; Co, 2020"
    );
    assert_eq!(body["bookinstance"]["status"], "Available");
}

#[tokio::test]
#[ignore]
async fn test_create_missing_fields_re_renders_with_errors() {
    let client = client();

    let response = client
        .post(format!("{}/catalog/bookinstance/create", BASE_URL))
        .form(&[("book", "  "), ("imprint", ""), ("status", "Available")])
        .send()
        .await
        .expect("Failed to send request");

    // Validation failures are not HTTP errors
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let messages: Vec<&str> = body["errors"]
        .as_array()
        .expect("No errors array")
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec!["Book must be specified.", "Imprint must be specified."]
    );
    assert!(body["book_list"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_invalid_due_back() {
    let client = client();
    let book_id = any_book_id(&client).await;

    let response = client
        .post(format!("{}/catalog/bookinstance/create", BASE_URL))
        .form(&[
            ("book", book_id.to_string().as_str()),
            ("imprint", "Imprint"),
            ("status", "Available"),
            ("due_back", "not-a-date"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["message"], "Invalid date");
}

#[tokio::test]
#[ignore]
async fn test_update_round_trip_preserves_id() {
    let client = client();
    let book_id = any_book_id(&client).await;

    let url = create_copy(&client, book_id, "First imprint").await;
    let id = url.rsplit('/').next().unwrap();

    let response = client
        .post(format!("{}{}/update", BASE_URL, url))
        .form(&[
            ("book", book_id.to_string().as_str()),
            ("imprint", "Second imprint"),
            ("status", "Loaned"),
            ("due_back", "2031-01-01"),
        ])
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body: Value = client
        .get(format!("{}{}", BASE_URL, url))
        .send()
        .await
        .expect("Failed to fetch detail")
        .json()
        .await
        .expect("Failed to parse detail");
    assert_eq!(body["bookinstance"]["id"].to_string(), id);
    assert_eq!(body["bookinstance"]["imprint"], "Second imprint");
    assert_eq!(body["bookinstance"]["due_back_formatted"], "2031-01-01");
}

#[tokio::test]
#[ignore]
async fn test_update_form_is_prepopulated() {
    let client = client();
    let book_id = any_book_id(&client).await;

    let url = create_copy(&client, book_id, "Prefill imprint").await;

    let body: Value = client
        .get(format!("{}{}/update", BASE_URL, url))
        .send()
        .await
        .expect("Failed to fetch form")
        .json()
        .await
        .expect("Failed to parse form");
    assert_eq!(body["title"], "Update BookInstance");
    assert_eq!(body["bookinstance"]["imprint"], "Prefill imprint");
    assert_eq!(body["selected_book"].as_i64(), Some(book_id));
    assert!(body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_delete_twice_redirects_both_times() {
    let client = client();
    let book_id = any_book_id(&client).await;

    let url = create_copy(&client, book_id, "Doomed imprint").await;
    let id = url.rsplit('/').next().unwrap().to_string();

    for _ in 0..2 {
        let response = client
            .post(format!("{}{}/delete", BASE_URL, url))
            .form(&[("bookinstanceid", id.as_str())])
            .send()
            .await
            .expect("Failed to send delete");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/catalog/bookinstances"
        );
    }

    // And the copy is gone
    let response = client
        .get(format!("{}{}", BASE_URL, url))
        .send()
        .await
        .expect("Failed to fetch detail");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_delete_form_for_missing_copy_redirects() {
    let response = client()
        .get(format!("{}/catalog/bookinstance/999999/delete", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/catalog/bookinstances"
    );
}

#[tokio::test]
#[ignore]
async fn test_detail_for_missing_copy_is_404() {
    let response = client()
        .get(format!("{}/catalog/bookinstance/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore]
async fn test_author_list_carries_derived_fields() {
    let response = client()
        .get(format!("{}/catalog/authors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Author List");
    let first = &body["author_list"][0];
    assert!(first["name"].as_str().unwrap().contains(", "));
    assert!(first["url"].as_str().unwrap().starts_with("/catalog/author/"));
    assert!(first["lifespan"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_author_create_and_detail() {
    let client = client();

    let response = client
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[
            ("first_name", "Ursula K."),
            ("family_name", "Le Guin"),
            ("date_of_birth", "1929-10-21"),
            ("date_of_death", "2018-01-22"),
        ])
        .send()
        .await
        .expect("Failed to send create request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let url = response
        .headers()
        .get("location")
        .expect("No Location header")
        .to_str()
        .unwrap()
        .to_string();

    let body: Value = client
        .get(format!("{}{}", BASE_URL, url))
        .send()
        .await
        .expect("Failed to fetch author")
        .json()
        .await
        .expect("Failed to parse author");
    assert_eq!(body["author"]["name"], "Le Guin, Ursula K.");
    assert_eq!(body["author"]["age"], 88);
}

#[tokio::test]
#[ignore]
async fn test_author_with_books_is_not_deleted() {
    let client = client();

    // Seeded author 1 has books
    let response = client
        .post(format!("{}/catalog/author/1/delete", BASE_URL))
        .form(&[("authorid", "1")])
        .send()
        .await
        .expect("Failed to send delete");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Delete Author");
    assert!(!body["author_books"].as_array().unwrap().is_empty());

    // Still there
    let response = client
        .get(format!("{}/catalog/author/1", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch author");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_book_detail_lists_copies() {
    let client = client();
    let book_id = any_book_id(&client).await;

    let response = client
        .get(format!("{}/catalog/book/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["book"]["title"].is_string());
    assert!(body["book_instances"].is_array());
}
