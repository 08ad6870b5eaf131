//! crates/trivia_core/src/ports.rs
//!
//! Defines the service contracts (traits) the quiz core depends on.
//! These traits form the boundary of the hexagonal architecture, keeping the core
//! independent of how questions are actually fetched.

use async_trait::async_trait;

use crate::domain::QuestionSet;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// It is `Clone` because load failures are kept as state, not thrown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Request failed with status {status}")]
    Http { status: u16 },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Malformed payload: {0}")]
    Malformed(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Request was cancelled")]
    Cancelled,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetches the full question set in a single round-trip.
    ///
    /// Any non-2xx response or malformed payload is an error. No retries.
    async fn fetch_all_questions(&self) -> PortResult<QuestionSet>;
}
