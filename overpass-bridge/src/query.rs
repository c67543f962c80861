//! Query construction for the upstream Overpass interpreter.
//!
//! A [`QueryRequest`] carries the caller's Overpass QL fragment plus an
//! optional server-side timeout. [`build_request_body`] wraps the fragment
//! with the output-format and timeout directives to produce the literal
//! form-encoded body POSTed upstream. The fragment itself is never
//! validated here; a malformed query is the upstream service's problem.

/// Server-side timeout applied when a request leaves the timeout unset.
pub const DEFAULT_TIMEOUT_SECS: u32 = 180;

/// One translation request: a query fragment and an optional timeout.
///
/// A timeout of `0` means "unset" and resolves to
/// [`DEFAULT_TIMEOUT_SECS`]. Requests are immutable, created per call and
/// discarded once the call completes.
///
/// # Example
///
/// ```
/// use overpass_bridge::query::QueryRequest;
///
/// let request = QueryRequest::new("node(50.6,7.0,50.8,7.3);out;").with_timeout_secs(30);
/// assert_eq!(request.effective_timeout_secs(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Overpass QL fragment, passed through unvalidated.
    pub query: String,
    /// Server-side timeout in seconds; 0 means unset.
    pub timeout_secs: u32,
}

impl QueryRequest {
    /// Create a request with the timeout unset.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            timeout_secs: 0,
        }
    }

    /// Set the server-side timeout in seconds.
    pub fn with_timeout_secs(mut self, timeout_secs: u32) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The timeout actually sent upstream, after defaulting.
    pub fn effective_timeout_secs(&self) -> u32 {
        if self.timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            self.timeout_secs
        }
    }
}

/// Builds the literal upstream request body for a query.
///
/// The body is form-encoded as expected by `/api/interpreter`:
/// `data=[out:json][timeout:<T>];<query>`.
pub fn build_request_body(request: &QueryRequest) -> String {
    format!(
        "data=[out:json][timeout:{}];{}",
        request.effective_timeout_secs(),
        request.query
    )
}
