//! Mock forum — a stand-in for the Discourse side of the handshake.
//!
//! Runs the forum's two SSO endpoints so the auth service can be
//! exercised locally without a real forum:
//!
//! - `GET /session/sso` opens the handshake: mints a nonce, signs the
//!   payload and redirects the browser to the host's `/discourse/sso`.
//! - `GET /session/sso_login` closes it: verifies the credential payload
//!   the host redirects back and echoes the decoded credential set.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect};
use axum::routing::get;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use serde_json::json;

use forumlink_sso::{Nonce, SharedSecret, decode_payload};

struct MockState {
    secret: SharedSecret,
    host_url: String,
    own_url: String,
}

#[tokio::main]
async fn main() {
    let secret =
        std::env::var("DISCOURSE_SECRET").unwrap_or_else(|_| "mock-forum-secret".to_string());
    let secret = SharedSecret::new(secret).expect("DISCOURSE_SECRET must not be empty");
    let host_url =
        std::env::var("HOST_URL").unwrap_or_else(|_| "http://localhost:3002".to_string());
    let port: u16 = std::env::var("MOCK_FORUM_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4100);
    let own_url = format!("http://localhost:{port}");

    let state = Arc::new(MockState {
        secret,
        host_url,
        own_url,
    });

    let app = Router::new()
        .route("/session/sso", get(open_handshake))
        .route("/session/sso_login", get(sso_login))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind listener");

    println!("MOCK-FORUM: listening on http://localhost:{port}");
    axum::serve(listener, app).await.expect("server error");
}

// --- Endpoints ---

/// `GET /session/sso` — open the handshake with a fresh signed nonce.
async fn open_handshake(State(state): State<Arc<MockState>>) -> Redirect {
    let nonce = Nonce::generate();
    let return_url = format!("{}/session/sso_login", state.own_url);
    let query = format!("nonce={nonce}&return_sso_url={}", urlencoding::encode(&return_url));
    let payload = STANDARD.encode(query);
    let sig = state.secret.sign(&payload);

    println!("MOCK-FORUM: handshake opened (nonce={nonce})");

    let target = format!(
        "{}/discourse/sso?sso={}&sig={sig}",
        state.host_url,
        urlencoding::encode(&payload)
    );
    Redirect::to(&target)
}

#[derive(Deserialize)]
struct SsoLoginQuery {
    sso: String,
    sig: String,
}

/// `GET /session/sso_login` — verify and echo the credential payload.
async fn sso_login(
    State(state): State<Arc<MockState>>,
    Query(query): Query<SsoLoginQuery>,
) -> impl IntoResponse {
    if state.secret.sign(&query.sso) != query.sig {
        println!("MOCK-FORUM: rejected credentials (signature mismatch)");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "signature mismatch" })),
        )
            .into_response();
    }

    match decode_payload(&query.sso) {
        Ok(fields) => {
            let credentials: serde_json::Map<String, serde_json::Value> = fields
                .into_iter()
                .map(|(key, value)| (key, json!(value)))
                .collect();
            println!("MOCK-FORUM: credentials accepted");
            Json(json!({ "status": "accepted", "credentials": credentials })).into_response()
        }
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}
