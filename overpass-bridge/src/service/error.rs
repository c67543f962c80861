//! Call-level error taxonomy.

use thiserror::Error;

use crate::client::ClientError;
use crate::decode::DecodeError;

/// A failed translation call.
///
/// Every failure is scoped to the single call that raised it; nothing is
/// retried and no other call or process-wide state is affected. The two
/// classes mirror where the failure happened: reaching the upstream versus
/// making sense of what it sent back.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The upstream HTTP call failed (connect, timeout, status, body read).
    #[error("upstream call failed: {0}")]
    Upstream(#[from] ClientError),

    /// The upstream response could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(DecodeError),
}

impl From<DecodeError> for ServiceError {
    fn from(e: DecodeError) -> Self {
        match e {
            // A transport failure mid-body belongs to the upstream class
            // even though the decoder was the one to observe it.
            DecodeError::Upstream(client) => ServiceError::Upstream(client),
            other => ServiceError::Decode(other),
        }
    }
}
