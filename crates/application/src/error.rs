//! Application error types

use spoiler_domain::DomainError;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// An HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpClientError),

    /// Login did not yield a usable bearer token.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A case needs fixture state an earlier case did not record.
    #[error("no {0} recorded by an earlier case")]
    MissingFixture(&'static str),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
