//! Forumlink auth service — federates host-application sign-in with a
//! Discourse forum over the DiscourseConnect handshake.
//!
//! Two routes cover the two legs of the handshake:
//!
//! 1. `GET /discourse/sso` — forum-initiated: the forum redirects the
//!    browser here with a signed nonce payload; the service validates it
//!    and answers with a signed credential payload for the current user.
//! 2. `GET /discourse/signin` — host-initiated: sends the current user
//!    straight to a forum session (or to the bare forum domain when
//!    anonymous).
//!
//! The router is a library so hosts can mount it with their own
//! [`provider::CurrentUserProvider`]; the binary in `main.rs` wires the
//! header-forwarded default.

pub mod config;
pub mod error;
pub mod provider;

use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::routing::get;
use serde::Deserialize;
use tracing::info;

use forumlink_sso::{CurrentUser, build_signin_redirect, build_sso_login_url, validate_payload};

use crate::config::AppConfig;
use crate::error::AuthError;
use crate::provider::CurrentUserProvider;

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// State shared across all Axum handlers.
pub struct AppState {
    /// Immutable configuration (shared secret + forum base URL).
    pub config: AppConfig,
    /// Capability yielding the user a request runs on behalf of.
    pub users: Arc<dyn CurrentUserProvider>,
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Query parameters of `GET /discourse/sso`.
#[derive(Deserialize)]
struct SsoHandshakeQuery {
    /// Base64-encoded nonce payload as sent by the forum.
    sso: String,
    /// Lowercase-hex HMAC-SHA256 digest of `sso`.
    sig: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /discourse/sso` — forum-initiated handshake leg.
///
/// Validates the signed nonce payload, then redirects back to the forum
/// with the current user's signed credentials carrying that nonce.
async fn sso_handshake(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<SsoHandshakeQuery>,
) -> Result<Redirect, AuthError> {
    let nonce = validate_payload(&state.config.secret, &query.sso, &query.sig)
        .map_err(AuthError::InvalidSsoRequest)?;

    let CurrentUser::Authenticated(identity) = state.users.current_user(&headers) else {
        return Err(AuthError::NotAuthenticated);
    };

    info!(nonce = %nonce, user = %identity.username, "SSO handshake validated");

    let url = build_sso_login_url(
        &state.config.secret,
        &state.config.forum_url,
        &nonce,
        &identity,
    );
    Ok(Redirect::to(&url))
}

/// `GET /discourse/signin` — host-initiated handshake leg.
async fn signin(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Redirect {
    let current = state.users.current_user(&headers);
    match &current {
        CurrentUser::Anonymous => info!("anonymous caller sent to forum without handshake"),
        CurrentUser::Authenticated(identity) => {
            info!(user = %identity.username, "forum sign-in initiated");
        }
    }

    let url = build_signin_redirect(&state.config.secret, &state.config.forum_url, &current);
    Redirect::to(&url)
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the service router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/discourse/sso", get(sso_handshake))
        .route("/discourse/signin", get(signin))
        .with_state(state)
}
