//! Upstream HTTP client abstraction.
//!
//! The translation pipeline issues exactly one outbound request per call:
//! a form-encoded POST to the upstream interpreter endpoint whose response
//! body is consumed as a stream of byte chunks. [`AsyncHttpClient`] is the
//! seam that lets tests substitute a mock for the real
//! [`ReqwestClient`].

mod error;
mod http;

pub use error::ClientError;
pub use http::{AsyncHttpClient, BodyStream, ReqwestClient};

#[cfg(test)]
pub use http::tests::MockHttpClient;
