//! Async driver turning a response body stream into decoded elements.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::client::ClientError;
use crate::element::RawElement;

use super::error::DecodeError;
use super::scanner::{JsonScanner, ScanItem, ScanStatus};

/// Metadata block from the upstream response.
///
/// Both fields are optional upstream and default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// The upstream generator string (e.g. `Overpass API 0.7.62`).
    pub generator: String,
    /// The copyright/attribution string from the `osm3s` block.
    pub copyright: String,
}

/// `osm3s` metadata object; only the copyright is of interest.
#[derive(Debug, Default, Deserialize)]
struct Osm3s {
    #[serde(default)]
    copyright: String,
}

/// Lazy, ordered sequence of decoded elements over a response body.
///
/// Body chunks are pulled only when the scanner needs more bytes to
/// complete the next item, so the decoder never reads ahead of what the
/// consumer has accepted: backpressure propagates naturally to the
/// upstream connection. The sequence is finite and single-consumption.
///
/// Metadata fields encountered before the `elements` array are collected
/// as a side effect and available via [`metadata`](Self::metadata).
pub struct ElementStream<S> {
    body: S,
    scanner: JsonScanner,
    metadata: Metadata,
    finished: bool,
}

impl<S> ElementStream<S>
where
    S: Stream<Item = Result<Bytes, ClientError>> + Unpin,
{
    pub fn new(body: S) -> Self {
        Self {
            body,
            scanner: JsonScanner::new(),
            metadata: Metadata::default(),
            finished: false,
        }
    }

    /// The metadata collected so far.
    ///
    /// Complete once [`next_element`](Self::next_element) has returned its
    /// first element (or `None`), since metadata precedes the array in
    /// upstream responses.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Decodes the next element from the body.
    ///
    /// Returns `Ok(None)` when the array is exhausted. Any error is
    /// terminal: subsequent calls return `Ok(None)` and no partial record
    /// is ever yielded.
    pub async fn next_element(&mut self) -> Result<Option<RawElement>, DecodeError> {
        if self.finished {
            return Ok(None);
        }
        match self.advance().await {
            Ok(Some(raw)) => Ok(Some(raw)),
            Ok(None) => {
                self.finished = true;
                Ok(None)
            }
            Err(e) => {
                self.finished = true;
                Err(e)
            }
        }
    }

    async fn advance(&mut self) -> Result<Option<RawElement>, DecodeError> {
        loop {
            match self.scanner.next()? {
                ScanStatus::NeedMore => match self.body.next().await {
                    Some(Ok(chunk)) => {
                        trace!(bytes = chunk.len(), "body chunk received");
                        self.scanner.feed(&chunk);
                    }
                    Some(Err(e)) => return Err(DecodeError::Upstream(e)),
                    None => self.scanner.finish(),
                },
                ScanStatus::Item(ScanItem::Finished) => return Ok(None),
                ScanStatus::Item(ScanItem::Field { key, value }) => {
                    self.capture_metadata(&key, &value)?;
                }
                ScanStatus::Item(ScanItem::Element(bytes)) => {
                    let raw = serde_json::from_slice::<RawElement>(&bytes)
                        .map_err(DecodeError::MalformedElement)?;
                    trace!(kind = %raw.kind, id = raw.id, "element decoded");
                    return Ok(Some(raw));
                }
            }
        }
    }

    fn capture_metadata(&mut self, key: &str, value: &[u8]) -> Result<(), DecodeError> {
        match key {
            "generator" => {
                self.metadata.generator = serde_json::from_slice::<String>(value)
                    .map_err(|e| DecodeError::MalformedMetadata {
                        field: "generator",
                        source: e,
                    })?;
            }
            "osm3s" => {
                let osm3s: Osm3s = serde_json::from_slice(value).map_err(|e| {
                    DecodeError::MalformedMetadata {
                        field: "osm3s",
                        source: e,
                    }
                })?;
                self.metadata.copyright = osm3s.copyright;
            }
            other => trace!(key = other, "skipping top-level field"),
        }
        Ok(())
    }
}
