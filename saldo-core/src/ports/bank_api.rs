//! Banking API port
//!
//! Defines the remote operations the services depend on. The HTTP adapter
//! implements it against the real server; tests substitute scripted fakes.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{
    AuthGrant, BankAccount, NewTransfer, SignInRequest, SignUpRequest, TransferFilters,
    TransferPage, TransferReceipt, UserProfile,
};

/// Remote banking API
#[async_trait]
pub trait BankApi: Send + Sync {
    // === Authentication ===

    /// Register a new user
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthGrant>;

    /// Establish a session for an existing user
    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthGrant>;

    // === Users ===

    /// Profile of the user owning the current credential
    async fn user_info(&self) -> Result<UserProfile>;

    // === Bank accounts ===

    /// Accounts owned by the current user
    async fn my_accounts(&self) -> Result<Vec<BankAccount>>;

    /// One page of the transfer statement
    async fn transfers(&self, filters: &TransferFilters) -> Result<TransferPage>;

    /// Submit a new transfer
    async fn create_transfer(&self, transfer: &NewTransfer) -> Result<TransferReceipt>;
}

/// Source of the credential attached to outgoing requests
///
/// Implemented by the session store; the HTTP middleware only sees this
/// narrow view of it.
pub trait CredentialProvider: Send + Sync {
    /// Current token, expired or not
    fn current_token(&self) -> Option<String>;

    /// Drop the credential after the server rejected it
    fn invalidate(&self);
}
