//! Integration test harness for Curio.
//!
//! Tests drive the fully assembled router in-process with `tower`'s
//! `oneshot` instead of binding a socket: every test gets its own app with
//! its own empty store, so tests are hermetic and run in parallel.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p curio-integration-tests
//! ```

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use curio_api::config::ApiConfig;
use curio_api::state::AppState;

/// Signing secret for tests; random enough to pass strength validation.
const TEST_SECRET: &str = "VfWxEyJ2T8qLwZbDk3mN9pQrStUvAxCe";

/// An in-process application instance with its own empty store.
pub struct TestApp {
    router: Router,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Create a fresh application with default token lifetimes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttls(Duration::from_secs(3600), Duration::from_secs(7 * 24 * 3600))
    }

    /// Create a fresh application with explicit token lifetimes.
    #[must_use]
    pub fn with_ttls(access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let config = ApiConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            jwt_secret: SecretString::from(TEST_SECRET),
            access_token_ttl: access_ttl,
            refresh_token_ttl: refresh_ttl,
            seed_demo: false,
        };

        Self {
            router: curio_api::app(AppState::new(&config)),
        }
    }

    /// Send a request and return the status plus the parsed JSON body
    /// (`Value::Null` for an empty body).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        bearer: Option<&str>,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        // Non-JSON bodies (the health check, axum's built-in rejections)
        // come back as a plain string value.
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, json)
    }

    /// `GET` with an optional bearer token.
    pub async fn get(&self, uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, bearer, None).await
    }

    /// `POST` a JSON body with an optional bearer token.
    pub async fn post(
        &self,
        uri: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        self.request(Method::POST, uri, bearer, Some(body)).await
    }

    /// `PUT` a JSON body with an optional bearer token.
    pub async fn put(&self, uri: &str, bearer: Option<&str>, body: &Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, bearer, Some(body)).await
    }

    /// `DELETE` with an optional bearer token.
    pub async fn delete(&self, uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, bearer, None).await
    }

    /// Register an account and log in; returns the login response body
    /// (`accessToken`, `refreshToken`, `user`).
    pub async fn register_and_login(&self, email: &str, password: &str) -> Value {
        let (status, _) = self
            .post(
                "/register",
                None,
                &json!({
                    "email": email,
                    "password": password,
                    "firstName": "Test",
                    "lastName": "User",
                    "phoneNumber": "555-0100",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed");

        let (status, body) = self
            .post("/login", None, &json!({ "email": email, "password": password }))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed");

        body
    }

    /// Register, log in, and return just the access token.
    pub async fn access_token(&self, email: &str) -> String {
        let login = self.register_and_login(email, "pw-123456").await;
        as_str(&login["accessToken"])
    }
}

/// A unique email per call so tests never collide on accounts.
#[must_use]
pub fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4().simple())
}

/// Extract a string field, panicking with context when absent.
#[must_use]
pub fn as_str(value: &Value) -> String {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected string, got {value}"))
        .to_owned()
}
