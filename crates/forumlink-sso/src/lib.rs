#![deny(missing_docs)]

//! # Forumlink SSO
//!
//! Protocol types and operations for the DiscourseConnect single sign-on
//! handshake: a signed, base64-encoded query-string payload exchanged
//! between a host application and a Discourse forum over HTTP redirects.
//!
//! ## Handshake
//!
//! ```text
//! forum ──▶ host   GET /discourse/sso?sso=<payload>&sig=<hex>
//!                  validate_payload(payload, sig) ──▶ nonce
//! host  ──▶ forum  302 {domain}/session/sso_login?sso=<credentials>&sig=<hex>
//! ```
//!
//! Both legs sign with the same shared secret: HMAC-SHA256 over the
//! still-encoded payload, rendered as lowercase hex.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`secret`] | Shared HMAC key ([`SharedSecret`]) and digest computation |
//! | [`nonce`] | Session-correlation tokens ([`Nonce`]) |
//! | [`payload`] | Inbound payload validation and decoding |
//! | [`identity`] | Host-supplied user identity ([`UserIdentity`], [`CurrentUser`]) |
//! | [`credentials`] | Outbound credential assembly and redirect construction |
//! | [`error`] | [`SsoError`] |

pub mod credentials;
pub mod error;
pub mod identity;
pub mod nonce;
pub mod payload;
pub mod secret;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `forumlink_sso::Nonce` directly.
pub use credentials::*;
pub use error::*;
pub use identity::*;
pub use nonce::*;
pub use payload::*;
pub use secret::*;
