//! The two public translation operations.

use serde::Serialize;
use tracing::debug;

use crate::client::{AsyncHttpClient, BodyStream};
use crate::decode::{ElementStream, Metadata};
use crate::element::{convert, Element};
use crate::query::{build_request_body, QueryRequest};

use super::config::ServiceConfig;
use super::error::ServiceError;

/// The aggregated result of a query: metadata plus every converted element
/// in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub metadata: Metadata,
    pub elements: Vec<Element>,
}

/// The translation service.
///
/// Composes query building, the upstream HTTP call, incremental decoding
/// and per-record conversion into the two public operations,
/// [`query`](Self::query) and [`stream_query`](Self::stream_query). Both
/// issue exactly one outbound request and perform no internal parallelism;
/// concurrent calls only share the (read-only) HTTP client underneath.
pub struct OverpassService<C> {
    config: ServiceConfig,
    client: C,
}

impl<C: AsyncHttpClient> OverpassService<C> {
    pub fn new(config: ServiceConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Aggregate query: run to completion and return everything at once.
    ///
    /// Drives the decoder over the whole response, converting each record
    /// as it is decoded; records of unrecognized kinds are excluded. Fails
    /// as a whole on any upstream or decode error - no partial list is
    /// returned.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, ServiceError> {
        let mut stream = self.open_stream(request).await?;

        let mut elements = Vec::new();
        while let Some(raw) = stream.next_element().await? {
            if let Some(element) = convert(raw) {
                elements.push(element);
            }
        }

        debug!(count = elements.len(), "aggregate query complete");
        Ok(QueryResponse {
            metadata: stream.metadata().clone(),
            elements,
        })
    }

    /// Streaming query: yield converted elements one at a time.
    ///
    /// The returned [`QueryStream`] decodes lazily; each element is fully
    /// emitted before the next one is decoded, and the upstream body is
    /// read no faster than the caller consumes. Errors terminate the
    /// stream without retracting elements already yielded. Dropping the
    /// stream aborts the in-flight upstream call.
    pub async fn stream_query(&self, request: &QueryRequest) -> Result<QueryStream, ServiceError> {
        Ok(QueryStream {
            inner: self.open_stream(request).await?,
            finished: false,
        })
    }

    async fn open_stream(
        &self,
        request: &QueryRequest,
    ) -> Result<ElementStream<BodyStream>, ServiceError> {
        let url = self.config.interpreter_url();
        let body = build_request_body(request);
        debug!(
            url = %url,
            timeout_secs = request.effective_timeout_secs(),
            "issuing upstream query"
        );
        let body_stream = self.client.post_form(&url, body).await?;
        Ok(ElementStream::new(body_stream))
    }
}

/// Lazy, ordered stream of typed elements for one query.
///
/// Obtained from [`OverpassService::stream_query`]. Ends with `None` after
/// the upstream array is exhausted or after the first error.
pub struct QueryStream {
    inner: ElementStream<BodyStream>,
    finished: bool,
}

impl QueryStream {
    /// Metadata collected so far; complete once the first element (or the
    /// end of the stream) has been observed.
    pub fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    /// The next typed element, in upstream order.
    ///
    /// Skips records of unrecognized kinds without surfacing them. An
    /// `Err` item is terminal; every call after it returns `None`.
    pub async fn next(&mut self) -> Option<Result<Element, ServiceError>> {
        if self.finished {
            return None;
        }
        loop {
            match self.inner.next_element().await {
                Ok(Some(raw)) => {
                    if let Some(element) = convert(raw) {
                        return Some(Ok(element));
                    }
                    // Unrecognized kind: dropped, keep decoding.
                }
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
