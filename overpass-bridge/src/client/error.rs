//! Upstream transport error type.

use thiserror::Error;

/// Errors that can occur while talking to the upstream HTTP service.
///
/// These are transport-level failures only; problems with the response
/// *content* are decode errors and live in
/// [`DecodeError`](crate::decode::DecodeError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request could not be sent (connection refused, DNS, TLS, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The request or body read exceeded the configured timeout ceiling.
    #[error("request timed out")]
    Timeout,

    /// The upstream answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body stream failed mid-read.
    #[error("failed to read response body: {0}")]
    Body(String),
}
