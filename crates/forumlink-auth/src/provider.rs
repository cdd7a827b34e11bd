//! The current-user capability consumed from the host application.
//!
//! The handshake has to know who the caller is, but how that is
//! determined — session cookie, reverse-proxy header, embedded call —
//! belongs to the host. The router only ever sees [`CurrentUserProvider`].

use axum::http::HeaderMap;

use forumlink_sso::{CurrentUser, UserIdentity};

/// Yields the user a request runs on behalf of.
pub trait CurrentUserProvider: Send + Sync {
    /// Resolve the caller of a request from its headers.
    fn current_user(&self, headers: &HeaderMap) -> CurrentUser;
}

/// Reads the identity forwarded by the host's session layer.
///
/// The host application (or a reverse proxy in front of it) authenticates
/// the user and forwards the identity in `X-Auth-*` headers; a request
/// without `X-Auth-User-Id` is anonymous. The service must not be exposed
/// without such a trusted layer in front, since it believes these headers
/// unconditionally.
///
/// | Header                  | Required | Credential field           |
/// |-------------------------|----------|----------------------------|
/// | `X-Auth-User-Id`        | yes      | `external_id`              |
/// | `X-Auth-Email`          | yes      | `email`                    |
/// | `X-Auth-Username`       | yes      | `username`                 |
/// | `X-Auth-Name`           | no       | `name` (username if unset) |
/// | `X-Auth-Avatar-Url`     | no       | `avatar_url`               |
/// | `X-Auth-Admin`          | no       | `admin`                    |
/// | `X-Auth-Moderator`      | no       | `moderator`                |
/// | `X-Auth-Email-Verified` | no       | `require_activation`       |
#[derive(Debug, Default)]
pub struct HeaderUserProvider;

impl CurrentUserProvider for HeaderUserProvider {
    fn current_user(&self, headers: &HeaderMap) -> CurrentUser {
        let Some(id) = header_str(headers, "x-auth-user-id").and_then(|v| v.parse().ok()) else {
            return CurrentUser::Anonymous;
        };
        let (Some(email), Some(username)) = (
            header_str(headers, "x-auth-email"),
            header_str(headers, "x-auth-username"),
        ) else {
            return CurrentUser::Anonymous;
        };

        let full_name = header_str(headers, "x-auth-name").unwrap_or(username);

        CurrentUser::Authenticated(UserIdentity {
            id,
            email: email.to_string(),
            full_name: full_name.to_string(),
            username: username.to_string(),
            avatar_url: header_str(headers, "x-auth-avatar-url").map(str::to_string),
            admin: header_flag(headers, "x-auth-admin"),
            moderator: header_flag(headers, "x-auth-moderator"),
            email_verified: header_flag(headers, "x-auth-email-verified").unwrap_or(true),
        })
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn header_flag(headers: &HeaderMap, name: &str) -> Option<bool> {
    header_str(headers, name).and_then(|value| value.parse().ok())
}
