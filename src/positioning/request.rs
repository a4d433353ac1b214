//! Request/reply plumbing for one-shot positions.

use std::time::Duration;

use log::debug;
use tokio::sync::{mpsc, oneshot};

use super::error::PositioningError;
use crate::geo::Coordinate;

/// A provider of the device's current position.
///
/// Implementations receive one [`PositionReply`] per request and resolve it
/// at most once, from any thread, whenever a fix is available. They should
/// unregister their underlying listener after resolving, or as soon as the
/// reply reports [`PositionReply::is_cancelled`].
pub trait PositioningSource: Send + Sync {
    /// Starts acquiring a single position for `reply`.
    fn request_one_shot(&self, reply: PositionReply);
}

/// Handle through which a source delivers exactly one position.
#[derive(Debug)]
pub struct PositionReply {
    tx: oneshot::Sender<Coordinate>,
}

impl PositionReply {
    /// Delivers the position, consuming the reply.
    ///
    /// # Returns
    ///
    /// `true` if the requester received it, `false` if it had already
    /// stopped waiting.
    #[allow(clippy::must_use_candidate)]
    pub fn resolve(self, position: Coordinate) -> bool {
        self.tx.send(position).is_ok()
    }

    /// Whether the requester has stopped waiting (timed out or dropped).
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Requests one position from `source`, waiting at most `timeout`.
///
/// # Errors
///
/// Returns [`PositioningError::Timeout`] if no position arrives in time and
/// [`PositioningError::Abandoned`] if the source drops the reply unresolved.
pub async fn request_position<S>(
    source: &S,
    timeout: Duration,
) -> Result<Coordinate, PositioningError>
where
    S: PositioningSource + ?Sized,
{
    let (tx, rx) = oneshot::channel();
    source.request_one_shot(PositionReply { tx });

    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok(position)) => Ok(position),
        Ok(Err(_)) => Err(PositioningError::Abandoned),
        Err(_) => {
            debug!("Position request timed out after {timeout:?}");
            Err(PositioningError::Timeout(timeout))
        }
    }
}

/// Takes the first update from a continuous subscription, then closes it.
///
/// Closing the receiver makes every sender see the subscription as gone,
/// which is the signal for the producer to unregister. Returns `None` if
/// the subscription ended without producing an update.
pub async fn first_fix(mut updates: mpsc::Receiver<Coordinate>) -> Option<Coordinate> {
    let fix = updates.recv().await;
    updates.close();
    fix
}
