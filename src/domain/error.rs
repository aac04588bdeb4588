//! Domain validation errors for core domain types.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
///
/// These errors are returned by `try_new` constructors and other methods
/// that validate domain rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A policy with every threshold disabled selects nothing; constructing
    /// one is an error so a no-op sweep cannot start silently.
    #[error("no retention threshold enabled: set max_reposts or stale_limit_days")]
    NoThresholdEnabled,
}
