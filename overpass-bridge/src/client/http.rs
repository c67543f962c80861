//! HTTP client abstraction for testability.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use tracing::{debug, trace, warn};

use super::error::ClientError;

/// A response body delivered as a stream of byte chunks.
///
/// Chunks arrive in order; the stream ends when the body is exhausted.
/// Dropping the stream releases the underlying connection, aborting any
/// in-flight transfer.
pub type BodyStream = BoxStream<'static, Result<Bytes, ClientError>>;

/// Trait for asynchronous HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing by
/// enabling mock HTTP clients in tests. The single operation is the one the
/// translation pipeline needs: a form-encoded POST whose response body is
/// consumed incrementally rather than buffered whole.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP POST with a form-encoded body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `body` - Form-encoded request body
    ///
    /// # Returns
    ///
    /// The response body as a byte-chunk stream, or an error. Non-success
    /// HTTP statuses are reported as errors, not as bodies.
    fn post_form(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<BodyStream, ClientError>> + Send;
}

const USER_AGENT: &str = concat!("overpass-bridge/", env!("CARGO_PKG_VERSION"));

/// Async HTTP client implementation using reqwest.
///
/// The inner `reqwest::Client` holds the process-wide connection pool and
/// is shared read-only across all concurrent calls; it carries no per-call
/// state.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new client with the given overall timeout ceiling.
    ///
    /// The timeout covers the full request including body read, so it acts
    /// as a hard upper bound even when the upstream honors its own
    /// server-side timeout directive.
    pub fn new(timeout_secs: u64) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            // Connection pooling - keep connections warm across calls
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            // TCP optimizations
            .tcp_keepalive(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ClientError::Request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn post_form(&self, url: &str, body: String) -> Result<BodyStream, ClientError> {
        trace!(url, bytes = body.len(), "HTTP POST starting");

        let response = match self
            .client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
        {
            Ok(resp) => {
                debug!(url, status = resp.status().as_u16(), "HTTP response received");
                resp
            }
            Err(e) => {
                warn!(
                    url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(if e.is_timeout() {
                    ClientError::Timeout
                } else {
                    ClientError::Request(e.to_string())
                });
            }
        };

        if !response.status().is_success() {
            warn!(url, status = response.status().as_u16(), "HTTP error status");
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response
            .bytes_stream()
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout
                } else {
                    ClientError::Body(e.to_string())
                }
            })
            .boxed())
    }
}

#[cfg(test)]
pub mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Mock HTTP client for testing.
    ///
    /// Serves a canned body split into fixed-size chunks so that decoder
    /// tests exercise resumption at arbitrary byte boundaries. Records
    /// every request for assertions on URL and body.
    pub struct MockHttpClient {
        pub response: Result<Vec<u8>, ClientError>,
        pub chunk_size: usize,
        pub requests: Mutex<Vec<(String, String)>>,
    }

    impl MockHttpClient {
        pub fn ok(body: &str, chunk_size: usize) -> Self {
            Self {
                response: Ok(body.as_bytes().to_vec()),
                chunk_size,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn err(error: ClientError) -> Self {
            Self {
                response: Err(error),
                chunk_size: 1,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        async fn post_form(&self, url: &str, body: String) -> Result<BodyStream, ClientError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), body));

            let data = self.response.clone()?;
            let chunk_size = self.chunk_size.max(1);
            let chunks: Vec<Result<Bytes, ClientError>> = data
                .chunks(chunk_size)
                .map(|c| Ok(Bytes::copy_from_slice(c)))
                .collect();
            Ok(futures::stream::iter(chunks).boxed())
        }
    }

    #[tokio::test]
    async fn test_mock_client_chunks_body() {
        let mock = MockHttpClient::ok("abcdef", 4);
        let mut stream = mock.post_form("http://example.com", String::new()).await.unwrap();

        assert_eq!(stream.next().await.unwrap().unwrap().as_ref(), &b"abcd"[..]);
        assert_eq!(stream.next().await.unwrap().unwrap().as_ref(), &b"ef"[..]);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockHttpClient::err(ClientError::Timeout);
        let result = mock.post_form("http://example.com", String::new()).await;
        assert_eq!(result.err(), Some(ClientError::Timeout));
    }

    #[tokio::test]
    async fn test_mock_client_records_requests() {
        let mock = MockHttpClient::ok("{}", 64);
        mock.post_form("http://example.com/api", "data=x".to_string())
            .await
            .unwrap();

        let requests = mock.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "http://example.com/api");
        assert_eq!(requests[0].1, "data=x");
    }
}
