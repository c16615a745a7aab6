//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client (plus middleware) for the BankApi port
//! - JSON file and in-memory maps for the KeyValueStore port
//! - System and manual clocks for the Clock port
//! - Recording and tracing notifiers for the Notifier port

pub mod clock;
pub mod file_store;
pub mod http;
pub mod memory_store;
pub mod notifier;

#[cfg(test)]
pub mod mock_server;
#[cfg(test)]
pub mod scripted_api;

pub use clock::{ManualClock, SystemClock};
pub use file_store::FileStore;
pub use http::{BearerAuth, ClientConfig, HttpBankApi, HttpFailure, Middleware, SessionExpiry};
pub use memory_store::MemoryStore;
pub use notifier::RecordingNotifier;
