//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The four variants are the full taxonomy callers have to handle. Only
/// `Conflict` is recoverable (a duplicate scan); everything else aborts the
/// current operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Required input is missing or malformed (no station selected, bad criteria).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The unit is already present at the destination station.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A referenced unit is absent from the source station.
    #[error("not found: {0}")]
    NotFound(String),

    /// The record store was unreachable or answered with an unexpected status.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// `true` for the duplicate-scan signal.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
