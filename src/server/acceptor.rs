//! Accept loop: the queue's only producer.

use tokio_util::sync::CancellationToken;

use crate::net::{Connection, Listener, ListenerError};
use crate::queue::BoundedQueue;

/// Accept connections and feed them to the queue until shutdown.
///
/// Exits cleanly when the token is cancelled mid-accept or when the queue
/// rejects an enqueue because shutdown was already signalled. An accept I/O
/// failure is fatal and propagates to the caller.
pub(crate) async fn accept_loop(
    listener: &Listener,
    queue: &BoundedQueue<Connection>,
    shutdown: &CancellationToken,
) -> Result<(), ListenerError> {
    loop {
        let conn = match listener.accept(shutdown).await? {
            Some(conn) => conn,
            None => {
                tracing::info!("Accept loop stopped by shutdown");
                return Ok(());
            }
        };

        if let Err(rejected) = queue.enqueue(conn).await {
            // The queue shut down while we held a fresh connection. It never
            // reached a worker, so we still own it and must close it here.
            let conn = rejected.into_inner();
            tracing::debug!(
                connection_id = %conn.id(),
                "Closing connection accepted during shutdown"
            );
            return Ok(());
        }
    }
}
