//! Session-correlation nonces.
//!
//! A [`Nonce`] ties one handshake attempt to one forum session: the forum
//! mints it, the host passes it back unmodified inside the signed
//! credential payload, and the forum refuses credentials carrying a nonce
//! it does not remember. When the host initiates the handshake itself it
//! mints a fresh nonce instead.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque per-session correlation token.
///
/// The value is never inspected, only carried through: whatever the forum
/// sent comes back to it byte for byte.
///
/// # Examples
///
/// ```
/// use forumlink_sso::Nonce;
///
/// let nonce = Nonce::new("cb68251eefb5211e58c00ff1395f0c0b");
/// assert_eq!(nonce.to_string(), "cb68251eefb5211e58c00ff1395f0c0b");
///
/// let nonce2: Nonce = "cb68251eefb5211e58c00ff1395f0c0b".into();
/// assert_eq!(nonce, nonce2);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nonce(String);

impl Nonce {
    /// Create a `Nonce` from a string slice.
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Mint a fresh random nonce for a host-initiated handshake.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Nonce {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Nonce {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for Nonce {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}
