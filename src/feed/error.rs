use std::path::PathBuf;

use thiserror::Error;

use crate::util::UrlValidationError;
use crate::xml::XmlError;

/// Errors that can occur while loading a feed document.
///
/// These cover the full path from a user-supplied location to a parsed
/// tree: location validation, network or file I/O, size limits, decoding,
/// and XML parsing.
#[derive(Debug, Error)]
pub enum FeedError {
    /// No location was given.
    #[error("Feed location is empty")]
    EmptyLocation,
    /// The URL failed validation (bad syntax, scheme, or host policy).
    #[error(transparent)]
    InvalidUrl(#[from] UrlValidationError),
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Server returned 429 Too Many Requests after max retries
    #[error("Rate limited after {0} retries")]
    RateLimited(u32),
    /// Body exceeded the configured size limit
    #[error("Feed exceeds size limit of {limit} bytes")]
    TooLarge { limit: usize },
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
    /// Reading a local feed file failed
    #[error("Failed to read feed file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Feed bytes are not valid UTF-8
    #[error("Feed is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    /// Feed is not well-formed XML
    #[error(transparent)]
    Xml(#[from] XmlError),
}
