//! Session domain model

use serde::{Deserialize, Serialize};

use super::UserProfile;

/// Logical state of a session at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No credential held
    Anonymous,
    /// Credential held and not yet expired
    Authenticated,
    /// Credential held but past (or missing) its expiration
    Expired,
}

/// Client-held authentication record
///
/// Field names match the durable storage layout (`token`, `tokenExpiration`,
/// `user`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    /// Epoch seconds after which the token is no longer valid
    #[serde(default)]
    pub token_expiration: Option<i64>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl Session {
    /// Session for a freshly issued credential
    pub fn new(token: impl Into<String>, expiration: i64, user: Option<UserProfile>) -> Self {
        Self {
            token: Some(token.into()),
            token_expiration: Some(expiration),
            user,
        }
    }

    /// True iff a token and an expiration are present and `expiration > now`
    pub fn is_authenticated(&self, now: i64) -> bool {
        match (&self.token, self.token_expiration) {
            (Some(token), Some(exp)) if !token.is_empty() => exp > now,
            _ => false,
        }
    }

    pub fn state(&self, now: i64) -> SessionState {
        if self.token.is_none() {
            SessionState::Anonymous
        } else if self.is_authenticated(now) {
            SessionState::Authenticated
        } else {
            SessionState::Expired
        }
    }

    /// True when token, expiration and profile are all present
    pub fn is_complete(&self) -> bool {
        self.token.is_some() && self.token_expiration.is_some() && self.user.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.token_expiration.is_none() && self.user.is_none()
    }

    /// Seconds until expiration, negative once expired
    pub fn remaining_secs(&self, now: i64) -> Option<i64> {
        self.token_expiration.map(|exp| exp - now)
    }
}
