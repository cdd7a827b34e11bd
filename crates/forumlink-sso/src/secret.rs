//! Shared-secret key material for the SSO handshake.
//!
//! The same key verifies inbound payloads and signs outbound ones. It is
//! configured once at process start and never changes afterwards, so a
//! [`SharedSecret`] can be shared freely across request handlers.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::SsoError;

type HmacSha256 = Hmac<Sha256>;

/// The shared HMAC key agreed between the host application and the forum.
///
/// The constructor rejects the empty string, so every reachable value can
/// sign — an unsigned handshake is unrepresentable.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(String);

impl SharedSecret {
    /// Create a shared secret, rejecting the empty string.
    pub fn new(secret: impl Into<String>) -> Result<Self, SsoError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SsoError::EmptySecret);
        }
        Ok(Self(secret))
    }

    /// Key bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Compute the lowercase-hex HMAC-SHA256 digest of `message`.
    ///
    /// This is the signature format used on both legs of the handshake:
    /// the digest always covers the still-encoded payload string.
    pub fn sign(&self, message: &str) -> String {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.as_bytes())
            .expect("HMAC accepts keys of any size");
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

// Keeps the key out of logs and error chains.
impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}
