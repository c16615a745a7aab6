//! Session store - owner of the client-side session
//!
//! Holds the current [`Session`] in memory and mirrors every change to
//! durable storage as a single composite record, so the token, its
//! expiration and the profile can never be persisted out of step.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{Session, SessionState, UserProfile};
use crate::ports::{Clock, CredentialProvider};
use crate::services::JsonStorage;

/// Storage key of the composite session record
pub const SESSION_KEY: &str = "session";

/// Per-field keys written by older clients, read once for migration
pub const LEGACY_TOKEN_KEY: &str = "token";
pub const LEGACY_EXPIRATION_KEY: &str = "tokenExpiration";
pub const LEGACY_USER_KEY: &str = "user";

/// Session state shared by the services and the HTTP middleware
pub struct SessionStore {
    session: Mutex<Session>,
    storage: JsonStorage,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Build the store, restoring a previous session from storage
    ///
    /// A stored session is adopted only when token, expiration and profile
    /// are all present; anything partial is discarded and removed.
    pub fn restore(storage: JsonStorage, clock: Arc<dyn Clock>) -> Self {
        let session = Self::load_durable(&storage);
        if session.is_complete() {
            tracing::debug!(
                state = ?session.state(clock.now()),
                "restored session from storage"
            );
        }
        Self {
            session: Mutex::new(session),
            storage,
            clock,
        }
    }

    fn load_durable(storage: &JsonStorage) -> Session {
        if let Some(stored) = storage.load::<Session>(SESSION_KEY) {
            if stored.is_complete() {
                return stored;
            }
            tracing::info!("discarding incomplete stored session");
            if let Err(e) = storage.remove(SESSION_KEY) {
                tracing::warn!("failed to remove incomplete session: {}", e);
            }
            return Session::default();
        }

        let legacy = Session {
            token: storage.load(LEGACY_TOKEN_KEY),
            token_expiration: storage.load(LEGACY_EXPIRATION_KEY),
            user: storage.load(LEGACY_USER_KEY),
        };
        if legacy.is_empty() {
            return Session::default();
        }

        let adopted = if legacy.is_complete() {
            match storage.save(SESSION_KEY, &legacy) {
                Ok(()) => legacy,
                Err(e) => {
                    tracing::warn!("failed to migrate legacy session: {}", e);
                    // keep the legacy keys so the next start can retry
                    return legacy;
                }
            }
        } else {
            tracing::info!("discarding incomplete legacy session");
            Session::default()
        };

        for key in [LEGACY_TOKEN_KEY, LEGACY_EXPIRATION_KEY, LEGACY_USER_KEY] {
            if let Err(e) = storage.remove(key) {
                tracing::warn!(key, "failed to remove legacy session key: {}", e);
            }
        }
        adopted
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // The session is plain data; a panic elsewhere cannot leave it torn
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply a change and persist the result
    fn update<F: FnOnce(&mut Session)>(&self, change: F) {
        let mut session = self.lock();
        change(&mut session);
        self.persist(&session);
    }

    fn persist(&self, session: &Session) {
        let result = if session.is_empty() {
            self.storage.remove(SESSION_KEY)
        } else {
            self.storage.save(SESSION_KEY, session)
        };
        if let Err(e) = result {
            tracing::warn!("failed to persist session: {}", e);
        }
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.lock().user.clone()
    }

    /// Evaluated against the clock on every call
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated(self.clock.now())
    }

    pub fn state(&self) -> SessionState {
        self.lock().state(self.clock.now())
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Install a freshly issued credential, replacing any previous session
    pub fn establish(&self, token: &str, expiration: i64, profile: Option<UserProfile>) {
        self.update(|session| *session = Session::new(token, expiration, profile));
    }

    /// Replace the profile; ignored (returns false) when no token is held
    pub fn update_profile(&self, profile: UserProfile) -> bool {
        let mut session = self.lock();
        if session.token.is_none() {
            tracing::debug!("dropping profile for a session that no longer exists");
            return false;
        }
        session.user = Some(profile);
        self.persist(&session);
        true
    }

    /// Forget token, expiration and profile, in memory and in storage
    pub fn clear(&self) {
        self.update(|session| *session = Session::default());
    }
}

impl CredentialProvider for SessionStore {
    fn current_token(&self) -> Option<String> {
        self.token()
    }

    fn invalidate(&self) {
        self.clear();
    }
}
