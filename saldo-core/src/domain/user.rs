//! User profile domain model

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user as returned by `/v1/users/infos`
///
/// Timestamps are kept exactly as the server sends them; an optimistically
/// seeded profile carries empty strings until the first profile fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl UserProfile {
    /// Profile built from sign-up form data before the server's copy is known
    pub fn seeded(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// True once the profile has been confirmed by the server
    pub fn is_confirmed(&self) -> bool {
        !self.uid.is_empty()
    }
}
