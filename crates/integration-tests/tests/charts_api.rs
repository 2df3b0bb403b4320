//! Authenticated chart dataset reads.

use axum::http::StatusCode;

use curio_integration_tests::{TestApp, unique_email};

#[tokio::test]
async fn test_charts_require_auth() {
    let app = TestApp::new();

    for uri in ["/charts/area", "/charts/bar", "/charts/pie"] {
        let (status, body) = app.get(uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "Access token required");
    }
}

#[tokio::test]
async fn test_charts_return_seeded_datasets() {
    let app = TestApp::new();
    let token = app.access_token(&unique_email()).await;

    let (status, area) = app.get("/charts/area", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = area.as_array().unwrap();
    assert!(!rows.is_empty());
    assert!(rows[0].get("month").is_some());
    assert!(rows[0].get("revenue").is_some());

    let (status, bar) = app.get("/charts/bar", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bar.as_array().unwrap()[0].get("category").is_some());

    let (status, pie) = app.get("/charts/pie", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(pie.as_array().unwrap()[0].get("source").is_some());
}

#[tokio::test]
async fn test_charts_are_identical_for_every_caller() {
    let app = TestApp::new();
    let token_a = app.access_token(&unique_email()).await;
    let token_b = app.access_token(&unique_email()).await;

    let (_, first) = app.get("/charts/pie", Some(&token_a)).await;
    let (_, second) = app.get("/charts/pie", Some(&token_b)).await;
    assert_eq!(first, second);
}
