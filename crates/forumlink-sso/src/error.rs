//! Error types for the `forumlink-sso` crate.
//!
//! All fallible operations in this crate return variants of [`SsoError`].
//! The three payload-validation failures are separate variants so tests
//! can tell them apart; callers at the HTTP boundary are expected to
//! collapse them into a single rejection.

/// Errors produced while validating or constructing SSO payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SsoError {
    /// The payload signature did not match the digest computed under the
    /// shared secret.
    #[error("payload signature mismatch")]
    InvalidSignature,

    /// The payload could not be decoded into a query string.
    #[error("malformed payload: {reason}")]
    MalformedPayload {
        /// Human-readable explanation.
        reason: String,
    },

    /// The decoded payload carries no `nonce` field.
    #[error("payload is missing the nonce field")]
    MissingNonce,

    /// The shared secret was empty at construction time.
    #[error("shared secret must not be empty")]
    EmptySecret,
}
