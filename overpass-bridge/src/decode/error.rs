//! Error types for incremental response decoding.

use thiserror::Error;

use crate::client::ClientError;

/// Errors that can occur while decoding an upstream response body.
///
/// Any of these terminates the decoded sequence; no partial record is ever
/// yielded after one is raised. In streaming mode, records emitted before
/// the failure remain valid.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body ended before the document was complete.
    #[error("unexpected end of response body")]
    UnexpectedEof,

    /// The document structure did not match what the scanner expected.
    #[error("expected {expected}, found {found:?} at byte {offset}")]
    Unexpected {
        expected: &'static str,
        found: char,
        offset: u64,
    },

    /// The top-level `elements` key held something other than an array.
    #[error("\"elements\" is not an array")]
    ElementsNotArray,

    /// One element in the array could not be decoded.
    #[error("malformed element: {0}")]
    MalformedElement(serde_json::Error),

    /// A metadata field (`generator`, `osm3s`) had the wrong shape.
    #[error("malformed metadata field {field:?}: {source}")]
    MalformedMetadata {
        field: &'static str,
        source: serde_json::Error,
    },

    /// The body stream itself failed mid-read.
    ///
    /// This is a transport failure surfacing through the decoder; the
    /// service layer reclassifies it as an upstream error.
    #[error("upstream read failed: {0}")]
    Upstream(#[from] ClientError),
}
