//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod account;
pub mod amount;
mod auth;
mod notification;
pub mod result;
mod session;
mod transfer;
mod user;

pub use account::{AccountSnapshot, BankAccount};
pub use auth::{AuthGrant, SignInRequest, SignUpRequest};
pub use notification::{Notification, Severity};
pub use session::{Session, SessionState};
pub use transfer::{
    Direction, NewTransfer, Transfer, TransferFilters, TransferPage, TransferReceipt,
    DEFAULT_PAGE, DEFAULT_PER_PAGE,
};
pub use user::UserProfile;
