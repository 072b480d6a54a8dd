//! Common error types for Tune Tracker

use thiserror::Error;

/// Common result type for Tune Tracker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the catalog client
///
/// Failure responses from the catalog API are not parsed for structured
/// error codes; any non-success status is reported uniformly as `Api`.
#[derive(Error, Debug)]
pub enum Error {
    /// Request never completed (DNS, connect, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Catalog API returned a non-success status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body or user input could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
