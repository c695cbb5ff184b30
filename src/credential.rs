use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::token::SessionToken;

/// The user descriptor held next to the session token.
///
/// Serialized with camelCase keys (`displayName`), matching what the login
/// and signup flows persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier of the account
    pub id: String,
    /// Account role
    pub role: Role,
    /// Name shown in the UI
    #[serde(default)]
    pub display_name: String,
}

/// Locally held proof of authentication: token plus user descriptor.
#[derive(Debug)]
pub struct Credential {
    /// Bearer token, redacted in all formatted output
    pub token: SessionToken,
    /// Who the token was issued to
    pub user: User,
}

impl Credential {
    /// Creates a credential from a raw token and a user descriptor.
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: SessionToken::new(token),
            user,
        }
    }
}
