use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Authenticated identity and bearer token.
///
/// Deserializes directly from the sign-in response
/// (`{ token, type, id, username, email, roles }`); the persisted form uses the
/// same shape.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Session {
    token: String,
    #[serde(rename = "id")]
    #[zeroize(skip)]
    user_id: String,
    #[zeroize(skip)]
    username: String,
    #[serde(default)]
    #[zeroize(skip)]
    email: String,
    #[serde(default)]
    #[zeroize(skip)]
    roles: BTreeSet<String>,
}

impl Session {
    /// Create a session from its parts.
    pub fn new(
        token: impl Into<String>,
        user_id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        roles: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
            username: username.into(),
            email: email.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Check for a role, accepting both `ADMIN` and `ROLE_ADMIN` spellings.
    pub fn has_role(&self, role: &str) -> bool {
        let bare = role.trim_start_matches("ROLE_");
        self.roles
            .iter()
            .any(|r| r.trim_start_matches("ROLE_").eq_ignore_ascii_case(bare))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .finish()
    }
}
