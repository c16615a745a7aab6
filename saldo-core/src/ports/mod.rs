//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod bank_api;
mod clock;
mod notifier;
mod storage;

pub use bank_api::{BankApi, CredentialProvider};
pub use clock::Clock;
pub use notifier::Notifier;
pub use storage::KeyValueStore;
