//! Workspace base error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `TrafficError`,
//! `FleetError`, ...) and the coordinator folds them into `CommandError`.
//! `FmError` covers what sits below all of them: configuration.

use thiserror::Error;

/// The top-level error type for `fm-core`.
#[derive(Debug, Error)]
pub enum FmError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `fm-core`.
pub type FmResult<T> = Result<T, FmError>;
