//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub(crate) mod auth;
mod bank_accounts;
pub mod session;
mod storage;

pub use auth::{AuthService, SessionSummary};
pub use bank_accounts::{BankAccountsService, Resource};
pub use session::SessionStore;
pub use storage::JsonStorage;
