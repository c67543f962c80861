//! Overpass Bridge - typed streaming front-end for the Overpass API.
//!
//! This library translates Overpass QL queries into strongly-typed geodata
//! elements, decoding the upstream JSON response incrementally so results
//! can be consumed one record at a time instead of as one monolithic
//! document.
//!
//! # High-Level API
//!
//! ```ignore
//! use overpass_bridge::client::ReqwestClient;
//! use overpass_bridge::query::QueryRequest;
//! use overpass_bridge::service::{OverpassService, ServiceConfig};
//!
//! let config = ServiceConfig::new();
//! let client = ReqwestClient::new(config.http_timeout_secs())?;
//! let service = OverpassService::new(config, client);
//!
//! // Aggregate mode: everything at once.
//! let response = service.query(&QueryRequest::new("node(50.6,7.0,50.8,7.3);out;")).await?;
//!
//! // Streaming mode: one element at a time, backpressure included.
//! let mut stream = service.stream_query(&QueryRequest::new("way[highway];out;")).await?;
//! while let Some(element) = stream.next().await {
//!     handle(element?);
//! }
//! ```

pub mod client;
pub mod decode;
pub mod element;
pub mod logging;
pub mod query;
pub mod service;

/// Version of the Overpass Bridge library and CLI.
///
/// Synchronized across the workspace; defined in `Cargo.toml` and injected
/// at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
