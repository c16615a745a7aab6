//! Saldo Core - session-aware client for the banking API
//!
//! This crate implements the core logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Session, BankAccount, Transfer, etc.)
//! - **ports**: Trait definitions for external dependencies (BankApi, KeyValueStore)
//! - **services**: Business logic orchestration (auth, session, bank accounts)
//! - **adapters**: Concrete implementations (reqwest client, JSON file store, etc.)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod i18n;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use adapters::{BearerAuth, ClientConfig, FileStore, HttpBankApi, SessionExpiry, SystemClock};
use config::Config;
use ports::{BankApi, Notifier};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{
    BankAccount, Direction, NewTransfer, Notification, Session, SessionState, Severity, Transfer,
    TransferFilters, TransferPage, TransferReceipt, UserProfile,
};
pub use i18n::Locale;
pub use services::{Resource, SessionSummary};

/// File inside the data directory holding the durable key/value store
pub const STORAGE_FILE: &str = "storage.json";

/// Configuration and restored session, without a network client
///
/// Enough for commands that only look at or end the local session.
pub struct LocalContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
}

impl LocalContext {
    pub fn open(saldo_dir: &Path) -> Result<Self> {
        let config = Config::load(saldo_dir)?;
        let store = Arc::new(FileStore::new(saldo_dir.join(STORAGE_FILE)));
        let session = Arc::new(SessionStore::restore(
            JsonStorage::new(store),
            Arc::new(SystemClock),
        ));
        Ok(Self { config, session })
    }

    pub fn status(&self) -> SessionSummary {
        SessionSummary::of(&self.session)
    }

    /// Forget the stored session
    pub fn logout(&self, notifier: &dyn Notifier) {
        services::auth::end_session(&self.session, notifier, self.config.locale);
    }
}

/// Main context for Saldo operations
///
/// This is the primary entry point for all business logic. It owns the
/// session store and wires it into the HTTP client middleware and the
/// services.
pub struct SaldoContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub auth_service: AuthService,
    pub bank_service: BankAccountsService,
}

impl SaldoContext {
    /// Create a new Saldo context backed by the data directory
    pub fn new(saldo_dir: &Path, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let LocalContext { config, session } = LocalContext::open(saldo_dir)?;

        let client = ClientConfig::new(config.require_api_url()?)?
            .with_timeout(Duration::from_secs(config.timeout_secs))
            .with_middleware(
                BearerAuth::new(session.clone()).with_scheme(config.auth_scheme.clone()),
            )
            .with_middleware(SessionExpiry::new(
                session.clone(),
                notifier.clone(),
                config.locale,
            ));
        let api: Arc<dyn BankApi> = Arc::new(HttpBankApi::new(client)?);

        Ok(Self::from_parts(config, api, session, notifier))
    }

    /// Assemble a context from already constructed parts
    pub fn from_parts(
        config: Config,
        api: Arc<dyn BankApi>,
        session: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let auth_service = AuthService::new(api.clone(), session.clone(), notifier, config.locale);
        let bank_service = BankAccountsService::new(api, config.locale);

        Self {
            config,
            session,
            auth_service,
            bank_service,
        }
    }
}
