//! Bank accounts service - accounts, statement and transfers
//!
//! Keeps the last fetched accounts and transfers together with a loading
//! flag and an error message per resource. A failed fetch leaves the
//! previous data in place.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::result::{Error, Result};
use crate::domain::{
    BankAccount, NewTransfer, Transfer, TransferFilters, TransferPage, TransferReceipt,
    DEFAULT_PER_PAGE,
};
use crate::i18n::{Locale, Message};
use crate::ports::BankApi;

/// Resources tracked by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Accounts,
    Transfers,
    Transfer,
}

#[derive(Debug, Clone, Default)]
struct Status {
    loading: bool,
    error: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<BankAccount>,
    transfers: Vec<Transfer>,
    page: Option<TransferPage>,
    accounts_status: Status,
    transfers_status: Status,
    transfer_status: Status,
}

impl State {
    fn status_mut(&mut self, resource: Resource) -> &mut Status {
        match resource {
            Resource::Accounts => &mut self.accounts_status,
            Resource::Transfers => &mut self.transfers_status,
            Resource::Transfer => &mut self.transfer_status,
        }
    }

    fn status(&self, resource: Resource) -> &Status {
        match resource {
            Resource::Accounts => &self.accounts_status,
            Resource::Transfers => &self.transfers_status,
            Resource::Transfer => &self.transfer_status,
        }
    }
}

/// Clears the loading flag of a resource when dropped
struct Loading<'a> {
    state: &'a Mutex<State>,
    resource: Resource,
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.status_mut(self.resource).loading = false;
    }
}

/// Bank accounts service
pub struct BankAccountsService {
    api: Arc<dyn BankApi>,
    locale: Locale,
    state: Mutex<State>,
}

impl BankAccountsService {
    pub fn new(api: Arc<dyn BankApi>, locale: Locale) -> Self {
        Self {
            api,
            locale,
            state: Mutex::new(State::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mark a resource as loading and clear its previous error
    fn begin(&self, resource: Resource) -> Loading<'_> {
        let mut state = self.lock();
        let status = state.status_mut(resource);
        status.loading = true;
        status.error = None;
        Loading {
            state: &self.state,
            resource,
        }
    }

    fn record_error(&self, resource: Resource, error: Error, fallback: Message) -> Error {
        tracing::warn!(?resource, "request failed: {}", error);
        let error = error.into_user_facing(self.locale.text(fallback));
        self.lock().status_mut(resource).error = Some(error.to_string());
        error
    }

    // === Accessors ===

    pub fn accounts(&self) -> Vec<BankAccount> {
        self.lock().accounts.clone()
    }

    /// Transfers of the last fetched statement page
    pub fn transfers(&self) -> Vec<Transfer> {
        self.lock().transfers.clone()
    }

    /// Pagination of the last fetched statement page
    pub fn transfer_page(&self) -> Option<TransferPage> {
        self.lock().page.clone()
    }

    pub fn is_loading(&self, resource: Resource) -> bool {
        self.lock().status(resource).loading
    }

    pub fn error(&self, resource: Resource) -> Option<String> {
        self.lock().status(resource).error.clone()
    }

    // === Operations ===

    /// Replace the account list with the server's
    ///
    /// On failure the previous list is kept, the error is recorded on
    /// [`Resource::Accounts`] and an empty list is returned.
    pub async fn fetch_accounts(&self) -> Vec<BankAccount> {
        let _loading = self.begin(Resource::Accounts);
        match self.api.my_accounts().await {
            Ok(accounts) => {
                tracing::debug!(count = accounts.len(), "fetched bank accounts");
                self.lock().accounts = accounts.clone();
                accounts
            }
            Err(e) => {
                self.record_error(Resource::Accounts, e, Message::AccountsLoadFailed);
                Vec::new()
            }
        }
    }

    /// Fetch one statement page and keep it as the current transfer list
    ///
    /// Failures are recorded on [`Resource::Transfers`]; an empty list is
    /// returned and the previous page is kept.
    pub async fn fetch_transfers(&self, filters: &TransferFilters) -> Vec<Transfer> {
        let _loading = self.begin(Resource::Transfers);
        match self.api.transfers(filters).await {
            Ok(page) => {
                tracing::debug!(
                    count = page.bank_account_transfers.len(),
                    page = page.current_page,
                    total_pages = page.total_pages,
                    "fetched transfers"
                );
                let transfers = page.bank_account_transfers.clone();
                let mut state = self.lock();
                state.transfers = transfers.clone();
                state.page = Some(page);
                transfers
            }
            Err(e) => {
                self.record_error(Resource::Transfers, e, Message::TransfersLoadFailed);
                Vec::new()
            }
        }
    }

    /// First statement page, unfiltered
    pub async fn fetch_recent_transfers(&self, per_page: u32) -> Vec<Transfer> {
        self.fetch_transfers(&TransferFilters::recent(per_page)).await
    }

    /// Submit a transfer, then refresh balances and recent transfers
    ///
    /// Invalid input is rejected before any request is made. A failed
    /// refresh does not fail the transfer; it is recorded on the refreshed
    /// resource instead.
    pub async fn create_transfer(&self, transfer: &NewTransfer) -> Result<TransferReceipt> {
        let _loading = self.begin(Resource::Transfer);

        if let Err(reason) = transfer.validate() {
            let error = Error::validation(reason);
            self.lock().status_mut(Resource::Transfer).error = Some(error.to_string());
            return Err(error);
        }

        tracing::info!(
            from = transfer.from_user_bank_account_id,
            to = transfer.to_user_bank_account_id,
            amount = %transfer.amount_to_transfer,
            "submitting transfer"
        );
        let receipt = match self.api.create_transfer(transfer).await {
            Ok(receipt) => receipt,
            Err(e) => return Err(self.record_error(Resource::Transfer, e, Message::TransferFailed)),
        };

        self.fetch_accounts().await;
        self.fetch_recent_transfers(DEFAULT_PER_PAGE).await;
        Ok(receipt)
    }
}
