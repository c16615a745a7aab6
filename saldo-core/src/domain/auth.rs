//! Credentials exchanged with the authentication endpoints

use serde::{Deserialize, Serialize};

/// Registration form data
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login form data
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

// Keep passwords out of debug output and logs.
impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of the sign-up and sign-in endpoints
///
/// `token` and `exp` are only meaningful when `success` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    /// Token expiration in epoch seconds
    #[serde(default)]
    pub exp: Option<i64>,
}

impl AuthGrant {
    /// Token and expiration of a successful grant
    pub fn credential(&self) -> Option<(&str, i64)> {
        if !self.success {
            return None;
        }
        match (self.token.as_deref(), self.exp) {
            (Some(token), Some(exp)) if !token.is_empty() => Some((token, exp)),
            _ => None,
        }
    }
}
