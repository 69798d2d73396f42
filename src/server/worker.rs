//! Worker pool: the queue's consumers.
//!
//! # Responsibilities
//! - Spawn N symmetric worker tasks before the accept loop starts
//! - Each worker: dequeue, hand the connection to the request handler, close
//! - Join every worker during shutdown
//!
//! # Design Decisions
//! - Workers are pure consumers; they never enqueue and never observe the
//!   shutdown token — the queue's `ShutdownError` is their stop signal
//! - A handler failure is logged and isolated to its connection; the worker
//!   loops back to dequeue

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::http;
use crate::net::Connection;
use crate::queue::BoundedQueue;
use crate::server::ServerError;

/// Fixed-size pool of worker tasks consuming from one shared queue.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `count` workers on the runtime.
    pub fn spawn(
        count: usize,
        queue: Arc<BoundedQueue<Connection>>,
        config: Arc<ServerConfig>,
    ) -> Self {
        let handles = (0..count)
            .map(|worker_id| {
                let queue = Arc::clone(&queue);
                let config = Arc::clone(&config);
                tokio::spawn(worker_loop(worker_id, queue, config))
            })
            .collect();

        tracing::info!(workers = count, "Worker pool started");
        Self { handles }
    }

    /// Wait for every worker to exit.
    ///
    /// All handles are awaited even if one fails; a panicked or cancelled
    /// worker task is a fatal infrastructure error and the first one is
    /// reported after the rest have been joined.
    pub async fn join(self) -> Result<(), ServerError> {
        let mut first_failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Worker task failed to join");
                first_failure.get_or_insert(e);
            }
        }
        match first_failure {
            Some(e) => Err(ServerError::WorkerJoin(e)),
            None => {
                tracing::info!("All workers stopped");
                Ok(())
            }
        }
    }
}

/// One worker: dequeue, serve, close, repeat until the queue shuts down.
async fn worker_loop(
    worker_id: usize,
    queue: Arc<BoundedQueue<Connection>>,
    config: Arc<ServerConfig>,
) {
    loop {
        let mut conn = match queue.dequeue().await {
            Ok(conn) => conn,
            // Designed stop signal, not a failure.
            Err(_) => {
                tracing::debug!(worker_id, "Worker stopping");
                return;
            }
        };

        let id = conn.id();
        let peer_addr = conn.peer_addr();
        if let Err(err) = http::handle(&mut conn, &config).await {
            tracing::warn!(
                worker_id,
                connection_id = %id,
                peer_addr = %peer_addr,
                error = %err,
                "Request failed"
            );
        }
        // `conn` drops here: the socket closes on success and failure alike.
    }
}
