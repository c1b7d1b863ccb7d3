//! Error taxonomy for the bandit agent.
//!
//! All operations are deterministic, pure computations; every error here is a
//! precondition violation (or a surfaced numerical fault) and is returned to
//! the caller immediately. Nothing is retried, defaulted, or sanitized.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BanditError>;

/// Failure modes of the bandit agent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BanditError {
    /// A scalar or index argument violated its contract (non-positive arm
    /// count or dimension at construction, out-of-range arm index at update,
    /// non-finite context component or payoff).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A supplied context vector does not have the agent's dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A linear-algebra step produced an unusable result (singular ridge
    /// matrix, non-finite score). Should not occur given the identity
    /// initialization invariant, but is surfaced rather than propagated as
    /// NaN/Inf.
    #[error("numerical failure: {0}")]
    NumericalFailure(&'static str),
}
