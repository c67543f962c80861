//! The translation service: the two public query operations.
//!
//! # Architecture
//!
//! ```text
//! QueryRequest → Query Builder → HTTP POST → Incremental Decoder → Converter → output
//! ```
//!
//! [`OverpassService::query`] collects every converted element into one
//! [`QueryResponse`]; [`OverpassService::stream_query`] hands back a
//! [`QueryStream`] that decodes and yields one element at a time.
//! [`forward_elements`] bridges a stream onto a bounded channel with
//! cooperative cancellation.
//!
//! # Example
//!
//! ```ignore
//! use overpass_bridge::client::ReqwestClient;
//! use overpass_bridge::query::QueryRequest;
//! use overpass_bridge::service::{OverpassService, ServiceConfig};
//!
//! let config = ServiceConfig::new().with_base_url("http://localhost:8091");
//! let client = ReqwestClient::new(config.http_timeout_secs())?;
//! let service = OverpassService::new(config, client);
//!
//! let request = QueryRequest::new("node[amenity=cafe](50.6,7.0,50.8,7.3);out;");
//! let mut stream = service.stream_query(&request).await?;
//! while let Some(element) = stream.next().await {
//!     println!("{:?}", element?);
//! }
//! ```

mod config;
mod delivery;
mod error;
mod facade;

pub use config::{
    ServiceConfig, DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, INTERPRETER_PATH,
};
pub use delivery::forward_elements;
pub use error::ServiceError;
pub use facade::{OverpassService, QueryResponse, QueryStream};
