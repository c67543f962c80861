//! Incremental decoding of the upstream response body.
//!
//! The upstream answers a query with one JSON object carrying a small
//! metadata block and an `elements` array that can run to hundreds of
//! megabytes. This module decodes that body without ever materializing
//! the whole object or the whole array:
//!
//! ```text
//! body chunks → JsonScanner (framing) → serde_json (per record) → RawElement
//! ```
//!
//! - [`JsonScanner`] - synchronous, resumable framing state machine
//! - [`ElementStream`] - async driver that pulls body chunks on demand
//! - [`Metadata`] - the `generator`/`copyright` block collected alongside
//! - [`DecodeError`] - terminal failures of the decoded sequence

mod error;
mod scanner;
mod stream;

pub use error::DecodeError;
pub use scanner::{JsonScanner, ScanItem, ScanStatus};
pub use stream::{ElementStream, Metadata};
