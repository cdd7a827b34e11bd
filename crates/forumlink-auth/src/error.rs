//! Error types for the Forumlink auth service.
//!
//! [`AuthError`] unifies all failure modes and implements
//! [`axum::response::IntoResponse`] so handlers can return
//! `Result<…, AuthError>` directly.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use forumlink_sso::SsoError;

/// Errors that can occur during the federation flow.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The inbound payload failed validation. Whether the signature,
    /// the encoding or the nonce was at fault goes to the log only —
    /// the response is the same either way.
    #[error("SSO request invalid")]
    InvalidSsoRequest(#[source] SsoError),

    /// The handshake needs a signed-in user and the caller has none.
    #[error("sign-in required")]
    NotAuthenticated,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidSsoRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
        };
        let message = self.to_string();

        match &self {
            Self::InvalidSsoRequest(cause) => {
                tracing::error!(%status, error = %message, %cause, "request failed");
            }
            Self::NotAuthenticated => {
                tracing::error!(%status, error = %message, "request failed");
            }
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
