//! Channel delivery of a query stream with cancellation.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::element::Element;

use super::error::ServiceError;
use super::facade::QueryStream;

/// Forwards a [`QueryStream`] into a channel until it ends, the receiver
/// goes away, or `cancel` fires.
///
/// Cancellation is checked before each decode and again before each send,
/// so no further elements are emitted once it is observed; the stream (and
/// with it the upstream connection) is dropped on return. A dropped
/// receiver is treated like cancellation, not an error. Elements already
/// sent are never retracted.
///
/// Returns the number of elements delivered.
pub async fn forward_elements(
    mut stream: QueryStream,
    sender: mpsc::Sender<Element>,
    cancel: CancellationToken,
) -> Result<usize, ServiceError> {
    let mut sent = 0usize;
    loop {
        let item = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(sent, "stream cancelled by caller");
                return Ok(sent);
            }
            item = stream.next() => item,
        };

        match item {
            None => {
                debug!(sent, "stream complete");
                return Ok(sent);
            }
            Some(Err(e)) => {
                warn!(sent, error = %e, "stream failed after partial emission");
                return Err(e);
            }
            Some(Ok(element)) => {
                let delivered = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        debug!(sent, "stream cancelled before send");
                        return Ok(sent);
                    }
                    result = sender.send(element) => result.is_ok(),
                };
                if !delivered {
                    debug!(sent, "receiver dropped, stopping stream");
                    return Ok(sent);
                }
                sent += 1;
            }
        }
    }
}
