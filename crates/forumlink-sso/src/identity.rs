//! User identity supplied by the host application.
//!
//! The handshake never looks users up itself: the host owns its user
//! store and hands over a read-only [`UserIdentity`] (or tells us the
//! caller is anonymous) through whatever capability it injects.

use serde::{Deserialize, Serialize};

/// Identity of an authenticated host-application user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Stable numeric identifier, unique within the host application.
    /// This — not the username or email — keys the forum account.
    pub id: u64,
    /// Primary email address.
    pub email: String,
    /// Full display name.
    pub full_name: String,
    /// Short login name.
    pub username: String,
    /// URL of a custom avatar, when the user has uploaded one.
    pub avatar_url: Option<String>,
    /// Forum admin flag, when the host tracks one.
    pub admin: Option<bool>,
    /// Forum moderator flag, when the host tracks one.
    pub moderator: Option<bool>,
    /// Whether the host has verified the email address.
    pub email_verified: bool,
}

/// The caller a handshake runs on behalf of.
///
/// Dispatched explicitly: every consumer has to say what happens in the
/// anonymous case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentUser {
    /// No signed-in user.
    Anonymous,
    /// A signed-in user and their identity.
    Authenticated(UserIdentity),
}

impl CurrentUser {
    /// The identity, if the caller is signed in.
    pub fn identity(&self) -> Option<&UserIdentity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }
}
