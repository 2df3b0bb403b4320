//! Curio API - credential and catalog service.
//!
//! This binary serves the JSON API on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON request/response bodies throughout
//! - Stateless HS256 bearer tokens with single-use refresh rotation
//! - Argon2id password digests
//! - In-memory record store; all data is per-process and lost on restart

#![cfg_attr(not(test), forbid(unsafe_code))]

use curio_api::config::ApiConfig;
use curio_api::services::auth::{AuthError, AuthService, ProfileFields};
use curio_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "curio_api=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Build application state (empty store, seeded chart datasets)
    let state = AppState::new(&config);

    if config.seed_demo {
        seed_demo_account(&state);
    }

    let app = curio_api::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("curio api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Seed the well-known demo account for local development.
///
/// Skipped silently when the account already exists, so a supervisor
/// restarting the process stays idempotent.
fn seed_demo_account(state: &AppState) {
    let auth = AuthService::new(state.store(), state.tokens());
    let result = auth.register(
        "demo@example.com",
        "demo123",
        ProfileFields {
            first_name: "Demo".to_owned(),
            last_name: "User".to_owned(),
            phone_number: "555-0100".to_owned(),
        },
    );

    match result {
        Ok(account) => tracing::info!(email = %account.email, "demo account seeded"),
        Err(AuthError::AccountExists) => {}
        Err(e) => tracing::warn!(error = %e, "failed to seed demo account"),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
