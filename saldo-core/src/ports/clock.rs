//! Wall-clock port

/// Source of the current time in epoch seconds
///
/// Session validity is evaluated against this on every read.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}
