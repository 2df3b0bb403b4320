//! Owner-scoped item CRUD, search, and pagination over HTTP.

use axum::http::StatusCode;
use serde_json::{Value, json};

use curio_integration_tests::{TestApp, unique_email};

fn item_body(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "subtitle": "A subtitle",
        "description": "A longer description",
        "category": category,
    })
}

async fn create_item(app: &TestApp, token: &str, title: &str, category: &str) -> Value {
    let (status, body) = app
        .post("/items", Some(token), &item_body(title, category))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_item_endpoints_require_auth() {
    let app = TestApp::new();

    let (status, _) = app.get("/items", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.post("/items", None, &item_body("x", "y")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.put("/items/1", None, &json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.delete("/items/1", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_returns_the_full_item() {
    let app = TestApp::new();
    let email = unique_email();
    let token = app.access_token(&email).await;

    let item = create_item(&app, &token, "Walkman", "Electronics").await;
    assert_eq!(item["title"], "Walkman");
    assert_eq!(item["category"], "Electronics");
    assert_eq!(item["ownerEmail"], email);
    assert!(item["id"].is_i64());
    assert!(item["createdAt"].is_string());
    assert_eq!(item["createdAt"], item["updatedAt"]);
}

#[tokio::test]
async fn test_create_requires_all_fields() {
    let app = TestApp::new();
    let token = app.access_token(&unique_email()).await;

    let (status, body) = app
        .post("/items", Some(&token), &json!({ "title": "only" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");
}

#[tokio::test]
async fn test_listing_is_scoped_to_the_caller() {
    let app = TestApp::new();
    let token_a = app.access_token(&unique_email()).await;
    let token_b = app.access_token(&unique_email()).await;

    create_item(&app, &token_a, "Walkman", "Electronics").await;

    let (status, body) = app.get("/items", Some(&token_a)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));

    let (status, body) = app.get("/items", Some(&token_b)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["pagination"]["totalItems"], 0);
}

#[tokio::test]
async fn test_pagination_over_http() {
    let app = TestApp::new();
    let token = app.access_token(&unique_email()).await;

    for i in 0..25 {
        create_item(&app, &token, &format!("item-{i:02}"), "Misc").await;
    }

    let (status, body) = app.get("/items?page=3&limit=10", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["items"][0]["title"], "item-20");
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 3,
            "totalPages": 3,
            "totalItems": 25,
            "itemsPerPage": 10,
        })
    );

    // Past the end: empty page, same totals.
    let (_, body) = app.get("/items?page=9&limit=10", Some(&token)).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["pagination"]["totalItems"], 25);

    // Unparsable parameters fall back to page 1, limit 10.
    let (status, body) = app.get("/items?page=zero&limit=-5", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(10));
}

#[tokio::test]
async fn test_search_filters_across_fields() {
    let app = TestApp::new();
    let token = app.access_token(&unique_email()).await;

    create_item(&app, &token, "Walkman", "Electronics").await;
    create_item(&app, &token, "Novel", "Books").await;

    let (status, body) = app.get("/items?search=elect", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["items"][0]["title"], "Walkman");

    // Case-insensitive, and an empty term matches everything.
    let (_, body) = app.get("/items?search=NOVEL", Some(&token)).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));

    let (_, body) = app.get("/items?search=", Some(&token)).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_update_merges_partial_patch() {
    let app = TestApp::new();
    let token = app.access_token(&unique_email()).await;
    let item = create_item(&app, &token, "Walkman", "Electronics").await;
    let id = item["id"].as_i64().unwrap();

    let (status, body) = app
        .put(
            &format!("/items/{id}"),
            Some(&token),
            &json!({ "subtitle": "Refurbished" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Walkman");
    assert_eq!(body["subtitle"], "Refurbished");
}

#[tokio::test]
async fn test_cross_account_mutation_is_forbidden() {
    let app = TestApp::new();
    let token_a = app.access_token(&unique_email()).await;
    let token_b = app.access_token(&unique_email()).await;
    let item = create_item(&app, &token_a, "Walkman", "Electronics").await;
    let id = item["id"].as_i64().unwrap();

    let (status, body) = app
        .put(
            &format!("/items/{id}"),
            Some(&token_b),
            &json!({ "title": "Mine now" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not authorized to update this item");

    let (status, body) = app.delete(&format!("/items/{id}"), Some(&token_b)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not authorized to delete this item");

    // The owner still sees the original item.
    let (_, body) = app.get("/items", Some(&token_a)).await;
    assert_eq!(body["items"][0]["title"], "Walkman");
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let app = TestApp::new();
    let token = app.access_token(&unique_email()).await;

    let (status, body) = app
        .put("/items/999", Some(&token), &json!({ "title": "x" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found");

    let (status, _) = app.delete("/items/999", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_a_bad_request() {
    let app = TestApp::new();
    let token = app.access_token(&unique_email()).await;

    let (status, _) = app.delete("/items/abc", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_removes_the_item() {
    let app = TestApp::new();
    let token = app.access_token(&unique_email()).await;
    let item = create_item(&app, &token, "Walkman", "Electronics").await;
    let id = item["id"].as_i64().unwrap();

    let (status, body) = app.delete(&format!("/items/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.delete(&format!("/items/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/items", Some(&token)).await;
    assert_eq!(body["pagination"]["totalItems"], 0);
}

#[tokio::test]
async fn test_ids_keep_increasing_after_deletion() {
    let app = TestApp::new();
    let token = app.access_token(&unique_email()).await;

    let first = create_item(&app, &token, "one", "Misc").await;
    let id = first["id"].as_i64().unwrap();
    app.delete(&format!("/items/{id}"), Some(&token)).await;

    let second = create_item(&app, &token, "two", "Misc").await;
    assert!(second["id"].as_i64().unwrap() > id);
}
