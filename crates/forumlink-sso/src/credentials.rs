//! Outbound credential assembly and redirect construction.
//!
//! The host answers a validated handshake — or opens one of its own —
//! by redirecting the browser to the forum's `session/sso_login`
//! endpoint with a signed credential payload describing the current
//! user. Assembly, encoding and signing mirror the inbound leg, so a
//! payload we emit decodes back to exactly the credential set we built.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::identity::{CurrentUser, UserIdentity};
use crate::nonce::Nonce;
use crate::secret::SharedSecret;

/// Path on the forum that consumes signed credential payloads.
const SSO_LOGIN_PATH: &str = "/session/sso_login";

/// Insertion-ordered set of SSO attributes sent to the forum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CredentialSet {
    entries: Vec<(String, String)>,
}

impl CredentialSet {
    fn push(&mut self, key: &str, value: impl Into<String>) {
        self.entries.push((key.to_string(), value.into()));
    }

    /// Value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute pairs in insertion order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Encode as an `&`-delimited query string with percent-encoded values.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Assemble the credential set for `identity`, correlated by `nonce`.
///
/// Always carries `nonce`, `email`, `name`, `username` and `external_id`.
/// Avatar handling follows the identity: a custom avatar is sent as
/// `avatar_url`, otherwise the forum is told to refresh its cached copy
/// via `avatar_force_update`. The `admin` and `moderator` flags are sent
/// only when the host tracks them, and `require_activation` only for an
/// unverified email address. The shared secret itself never appears here.
pub fn build_credentials(nonce: &Nonce, identity: &UserIdentity) -> CredentialSet {
    let mut credentials = CredentialSet::default();

    credentials.push("nonce", nonce.as_str());
    credentials.push("email", identity.email.as_str());
    credentials.push("name", identity.full_name.as_str());
    credentials.push("username", identity.username.as_str());
    credentials.push("external_id", identity.id.to_string());

    match &identity.avatar_url {
        Some(url) => credentials.push("avatar_url", url.as_str()),
        None => credentials.push("avatar_force_update", "true"),
    }

    if !identity.email_verified {
        credentials.push("require_activation", "true");
    }
    if let Some(admin) = identity.admin {
        credentials.push("admin", if admin { "true" } else { "false" });
    }
    if let Some(moderator) = identity.moderator {
        credentials.push("moderator", if moderator { "true" } else { "false" });
    }

    credentials
}

/// Build the signed `session/sso_login` redirect for `identity`.
///
/// Encodes the credential set (query string → base64), signs the encoded
/// form, and embeds both in the forum URL. `forum_base_url` must carry no
/// trailing slash.
pub fn build_sso_login_url(
    secret: &SharedSecret,
    forum_base_url: &str,
    nonce: &Nonce,
    identity: &UserIdentity,
) -> String {
    let credentials = build_credentials(nonce, identity);
    let sso = STANDARD.encode(credentials.to_query_string());
    let sig = secret.sign(&sso);
    format!(
        "{forum_base_url}{SSO_LOGIN_PATH}?sso={}&sig={sig}",
        urlencoding::encode(&sso)
    )
}

/// Where to send a caller who wants to reach the forum signed in.
///
/// Anonymous callers go to the bare forum domain — no handshake is
/// attempted for them. Authenticated callers get a fresh nonce (this is
/// the host-initiated leg; no inbound nonce exists) and a signed
/// `session/sso_login` redirect.
pub fn build_signin_redirect(
    secret: &SharedSecret,
    forum_base_url: &str,
    current_user: &CurrentUser,
) -> String {
    match current_user {
        CurrentUser::Anonymous => forum_base_url.to_string(),
        CurrentUser::Authenticated(identity) => {
            build_sso_login_url(secret, forum_base_url, &Nonce::generate(), identity)
        }
    }
}
