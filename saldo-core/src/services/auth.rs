//! Auth service - registration, sign-in and sign-out

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{
    AuthGrant, Notification, SessionState, Severity, SignInRequest, SignUpRequest, UserProfile,
};
use crate::i18n::{Locale, Message};
use crate::ports::{BankApi, Notifier};
use crate::services::SessionStore;

/// Auth service driving the session through the banking API
pub struct AuthService {
    api: Arc<dyn BankApi>,
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    locale: Locale,
}

impl AuthService {
    pub fn new(
        api: Arc<dyn BankApi>,
        session: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        locale: Locale,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            locale,
        }
    }

    /// Register a new user and sign them in
    ///
    /// Returns `Ok(false)` when the server declined the registration without
    /// an error status. On success the profile is seeded with the submitted
    /// name and email, then refreshed from the server.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<bool> {
        let request = SignUpRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        tracing::info!(email, "registering user");

        let grant = match self.api.sign_up(&request).await {
            Ok(grant) => grant,
            Err(e) => return Err(self.fail(e, Message::SignUpFailed)),
        };
        let seed = UserProfile::seeded(name, email);
        match self.accept(&grant, seed) {
            Ok(true) => {}
            Ok(false) => return Ok(false),
            Err(e) => return Err(self.fail(e, Message::SignUpFailed)),
        }

        self.fetch_profile().await;
        self.confirm(Message::SignUpSuccess)
    }

    /// Sign in an existing user
    ///
    /// Returns `Ok(false)` when the server answered without granting a
    /// session. Failures are reported through the notifier before being
    /// returned.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<bool> {
        let request = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        tracing::info!(email, "signing in");

        let grant = match self.api.sign_in(&request).await {
            Ok(grant) => grant,
            Err(e) => return Err(self.fail(e, Message::SignInFailed)),
        };
        // The server's profile replaces this seed once fetched
        let seed = UserProfile::seeded("", email);
        match self.accept(&grant, seed) {
            Ok(true) => {}
            Ok(false) => return Ok(false),
            Err(e) => return Err(self.fail(e, Message::SignInFailed)),
        }

        self.fetch_profile().await;
        self.confirm(Message::SignInSuccess)
    }

    /// Announce the new session unless the profile fetch already ended it
    fn confirm(&self, message: Message) -> Result<bool> {
        if !self.session.is_authenticated() {
            tracing::warn!("session ended before sign-in completed");
            return Err(Error::Unauthorized { message: None });
        }
        self.notify(Severity::Success, message);
        Ok(true)
    }

    /// Store the credential of a successful grant
    fn accept(&self, grant: &AuthGrant, seed: UserProfile) -> Result<bool> {
        if !grant.success {
            tracing::info!("server declined the request");
            return Ok(false);
        }
        let Some((token, expiration)) = grant.credential() else {
            return Err(Error::Decode(
                "successful grant without token or expiration".to_string(),
            ));
        };
        self.session.establish(token, expiration, Some(seed));
        Ok(true)
    }

    /// Refresh the profile from the server
    ///
    /// Failures keep the previous profile; nothing is raised.
    pub async fn fetch_profile(&self) -> Option<UserProfile> {
        match self.api.user_info().await {
            Ok(profile) => {
                if self.session.update_profile(profile.clone()) {
                    Some(profile)
                } else {
                    None
                }
            }
            Err(e) => {
                tracing::warn!("failed to fetch user profile: {}", e);
                None
            }
        }
    }

    /// End the session locally; never contacts the server
    pub fn logout(&self) {
        end_session(&self.session, self.notifier.as_ref(), self.locale);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Summary of the current session
    pub fn status(&self) -> SessionSummary {
        SessionSummary::of(&self.session)
    }

    fn fail(&self, error: Error, fallback: Message) -> Error {
        tracing::warn!("authentication request failed: {}", error);
        let error = error.into_user_facing(self.locale.text(fallback));
        self.notifier.notify(Notification::new(
            Severity::Error,
            self.locale.title(Severity::Error),
            error.to_string(),
        ));
        error
    }

    fn notify(&self, severity: Severity, message: Message) {
        self.notifier.notify(Notification::new(
            severity,
            self.locale.title(severity),
            self.locale.text(message),
        ));
    }
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub state: SessionState,
    pub name: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub remaining_secs: Option<i64>,
}

impl SessionSummary {
    pub fn of(store: &SessionStore) -> Self {
        let now = store.now();
        let session = store.snapshot();
        Self {
            state: session.state(now),
            name: session.user.as_ref().map(|u| u.name.clone()),
            email: session.user.as_ref().map(|u| u.email.clone()),
            expires_at: session
                .token_expiration
                .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0)),
            remaining_secs: session.remaining_secs(now).filter(|secs| *secs > 0),
        }
    }
}

/// Clear the session locally and tell the user
pub(crate) fn end_session(session: &SessionStore, notifier: &dyn Notifier, locale: Locale) {
    session.clear();
    notifier.notify(Notification::new(
        Severity::Info,
        locale.title(Severity::Info),
        locale.text(Message::LoggedOut),
    ));
}
