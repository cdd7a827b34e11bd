//! Forumlink auth service entry point.
//!
//! On each handshake the service:
//!
//! 1. Verifies the signed nonce payload sent by the forum.
//! 2. Assembles and signs a credential payload for the current user.
//! 3. Redirects the browser to the forum's `session/sso_login` endpoint.

use std::sync::Arc;

use tracing::{error, info};

use forumlink_auth::config::AppConfig;
use forumlink_auth::provider::HeaderUserProvider;
use forumlink_auth::{AppState, router};

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Configuration — a missing secret or domain must stop the process
    // here, not surface on the first handshake.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(forum_url = %config.forum_url, "forum SSO configured");

    let listen_port = config.listen_port;
    let state = Arc::new(AppState {
        config,
        users: Arc::new(HeaderUserProvider),
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{listen_port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    info!(address = %addr, "auth service listening");
    axum::serve(listener, app).await.expect("server error");
}
