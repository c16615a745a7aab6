//! Scripted BankApi for service tests
//!
//! Each operation replays a configurable outcome and counts its calls, so
//! services can be exercised without a socket.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{
    AccountSnapshot, AuthGrant, BankAccount, NewTransfer, SignInRequest, SignUpRequest, Transfer,
    TransferFilters, TransferPage, TransferReceipt, UserProfile,
};
use crate::ports::{BankApi, CredentialProvider};

/// Outcome replayed by a scripted operation
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    Ok(T),
    Status(u16, Option<String>),
    Transport,
}

impl<T: Clone> Scripted<T> {
    fn produce(&self) -> Result<T> {
        match self {
            Scripted::Ok(value) => Ok(value.clone()),
            Scripted::Status(401, message) => Err(Error::Unauthorized {
                message: message.clone(),
            }),
            Scripted::Status(status, message) => Err(Error::Status {
                status: *status,
                message: message.clone(),
            }),
            Scripted::Transport => Err(Error::Transport("connection refused".to_string())),
        }
    }
}

pub const GRANT_TOKEN: &str = "scripted-token";
pub const GRANT_EXP: i64 = 1_700_003_600;

pub fn grant() -> AuthGrant {
    AuthGrant {
        success: true,
        token: Some(GRANT_TOKEN.to_string()),
        exp: Some(GRANT_EXP),
    }
}

pub fn profile() -> UserProfile {
    UserProfile {
        uid: "user-1".to_string(),
        name: "Ana Souza".to_string(),
        email: "ana@example.com".to_string(),
        created_at: "2024-01-01T12:00:00Z".to_string(),
        updated_at: "2024-01-01T12:00:00Z".to_string(),
    }
}

pub fn account(id: i64, amount: Decimal) -> BankAccount {
    BankAccount {
        id,
        bank_name: "Banco Saldo".to_string(),
        bank_code: "999".to_string(),
        agency_number: "0001".to_string(),
        agency_digit: "9".to_string(),
        account_number: format!("{:05}", id),
        account_digit: "1".to_string(),
        account_type: "checking".to_string(),
        document: "12345678900".to_string(),
        holder_name: "Ana Souza".to_string(),
        amount,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

pub fn transfer(id: i64, amount: Decimal) -> Transfer {
    Transfer {
        id,
        was_success: true,
        transfer_type_text: "PIX".to_string(),
        amount_to_transfer: amount,
        created_at: "2024-03-01T10:00:00Z".to_string(),
        to_bank_account: AccountSnapshot::default(),
        from_user_bank_account: AccountSnapshot::default(),
    }
}

pub fn page(transfers: Vec<Transfer>) -> TransferPage {
    let total = transfers.len() as u64;
    TransferPage {
        bank_account_transfers: transfers,
        current_page: 1,
        per_page: 3,
        total_pages: 1,
        total_records: total,
    }
}

pub struct ScriptedApi {
    sign_up: Mutex<Scripted<AuthGrant>>,
    sign_in: Mutex<Scripted<AuthGrant>>,
    user_info: Mutex<Scripted<UserProfile>>,
    accounts: Mutex<Scripted<Vec<BankAccount>>>,
    transfers: Mutex<Scripted<TransferPage>>,
    create_transfer: Mutex<Scripted<TransferReceipt>>,
    delay: Mutex<Option<Duration>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    filters: Mutex<Vec<TransferFilters>>,
    credentials: Mutex<Option<Arc<dyn CredentialProvider>>>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self {
            sign_up: Mutex::new(Scripted::Ok(grant())),
            sign_in: Mutex::new(Scripted::Ok(grant())),
            user_info: Mutex::new(Scripted::Ok(profile())),
            accounts: Mutex::new(Scripted::Ok(vec![
                account(1, Decimal::new(150_000, 2)),
                account(2, Decimal::new(2_050, 2)),
            ])),
            transfers: Mutex::new(Scripted::Ok(page(vec![
                transfer(10, Decimal::new(5_000, 2)),
                transfer(11, Decimal::new(1_250, 2)),
            ]))),
            create_transfer: Mutex::new(Scripted::Ok(TransferReceipt {
                message: "Transferência realizada com sucesso".to_string(),
            })),
            delay: Mutex::new(None),
            calls: Mutex::new(HashMap::new()),
            filters: Mutex::new(Vec::new()),
            credentials: Mutex::new(None),
        }
    }
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_sign_up(&self, outcome: Scripted<AuthGrant>) {
        *self.sign_up.lock().unwrap() = outcome;
    }

    pub fn script_sign_in(&self, outcome: Scripted<AuthGrant>) {
        *self.sign_in.lock().unwrap() = outcome;
    }

    pub fn script_user_info(&self, outcome: Scripted<UserProfile>) {
        *self.user_info.lock().unwrap() = outcome;
    }

    pub fn script_accounts(&self, outcome: Scripted<Vec<BankAccount>>) {
        *self.accounts.lock().unwrap() = outcome;
    }

    pub fn script_transfers(&self, outcome: Scripted<TransferPage>) {
        *self.transfers.lock().unwrap() = outcome;
    }

    pub fn script_create_transfer(&self, outcome: Scripted<TransferReceipt>) {
        *self.create_transfer.lock().unwrap() = outcome;
    }

    /// Make every call wait before answering
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.calls.lock().unwrap().get(operation).copied().unwrap_or(0)
    }

    /// Filters passed to every `transfers` call, in order
    pub fn filters(&self) -> Vec<TransferFilters> {
        self.filters.lock().unwrap().clone()
    }

    /// Drop the credential when a non-auth call answers 401
    pub fn invalidate_on_unauthorized(&self, credentials: Arc<dyn CredentialProvider>) {
        *self.credentials.lock().unwrap() = Some(credentials);
    }

    fn answer<T: Clone>(&self, script: &Mutex<Scripted<T>>) -> Result<T> {
        let result = script.lock().unwrap().produce();
        if let Err(Error::Unauthorized { .. }) = &result {
            if let Some(credentials) = self.credentials.lock().unwrap().as_ref() {
                credentials.invalidate();
            }
        }
        result
    }

    async fn enter(&self, operation: &'static str) {
        *self.calls.lock().unwrap().entry(operation).or_insert(0) += 1;
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl BankApi for ScriptedApi {
    async fn sign_up(&self, _request: &SignUpRequest) -> Result<AuthGrant> {
        self.enter("sign_up").await;
        self.sign_up.lock().unwrap().produce()
    }

    async fn sign_in(&self, _request: &SignInRequest) -> Result<AuthGrant> {
        self.enter("sign_in").await;
        self.sign_in.lock().unwrap().produce()
    }

    async fn user_info(&self) -> Result<UserProfile> {
        self.enter("user_info").await;
        self.answer(&self.user_info)
    }

    async fn my_accounts(&self) -> Result<Vec<BankAccount>> {
        self.enter("my_accounts").await;
        self.answer(&self.accounts)
    }

    async fn transfers(&self, filters: &TransferFilters) -> Result<TransferPage> {
        self.filters.lock().unwrap().push(filters.clone());
        self.enter("transfers").await;
        self.answer(&self.transfers)
    }

    async fn create_transfer(&self, _transfer: &NewTransfer) -> Result<TransferReceipt> {
        self.enter("create_transfer").await;
        self.answer(&self.create_transfer)
    }
}
