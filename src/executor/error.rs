//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for a single transport call.
///
/// Describes what went wrong without dictating recovery strategy.
/// [`RetryingExecutor`](super::RetryingExecutor) treats every variant as
/// transient.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body stream could not be read.
    #[error("Failed to read request body: {0}")]
    Body(#[source] std::io::Error),
}

/// Terminal error returned by [`RetryingExecutor::execute`](super::RetryingExecutor::execute).
///
/// Root causes of the individual failed attempts are logged, not carried here.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// Every attempt failed with a transport error or a 5xx status.
    #[error("HTTP request failed after {attempts} attempts")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
    },
}

/// Error produced while rendering a request in wire format.
#[derive(Debug, Error)]
pub enum DumpError {
    /// A header value contains bytes that are not visible ASCII.
    #[error("Header '{name}' has a non-printable value")]
    InvalidHeaderValue {
        /// The offending header name
        name: String,
    },
}
