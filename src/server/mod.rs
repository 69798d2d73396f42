//! Server orchestration: acceptor, worker pool, and ordered teardown.
//!
//! # Data Flow
//! ```text
//! accept loop ──enqueue──▶ BoundedQueue ──dequeue──▶ worker ──▶ http::handle
//!                                                                  │
//!                                         connection closed ◀──────┘
//! ```
//!
//! # Design Decisions
//! - Workers start before the first accept so no connection waits on pool
//!   startup
//! - Shutdown is strictly ordered: stop intake → shut the queue → join
//!   workers → release the queue → close the listener
//! - A clean interrupt-triggered shutdown is success (exit 0); accept, join,
//!   and teardown failures are fatal

mod acceptor;
mod worker;

pub use worker::WorkerPool;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::lifecycle::{ShutdownCoordinator, ShutdownHandle};
use crate::net::{Connection, Listener, ListenerError};
use crate::queue::BoundedQueue;

/// Fatal server failure; anything here ends the process with a non-zero
/// status.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("listener error: {0}")]
    Listener(#[from] ListenerError),

    #[error("worker task failed: {0}")]
    WorkerJoin(#[from] tokio::task::JoinError),
}

/// The assembled server: listener, queue, and shutdown coordinator.
pub struct Server {
    config: Arc<ServerConfig>,
    listener: Listener,
    queue: Arc<BoundedQueue<Connection>>,
    shutdown: ShutdownCoordinator,
}

impl Server {
    /// Bind the listener and build the queue from validated configuration.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let listener = Listener::bind(&config.bind_addr()).await?;
        let queue = Arc::new(BoundedQueue::new(config.queue_capacity));

        Ok(Self {
            config: Arc::new(config),
            listener,
            queue,
            shutdown: ShutdownCoordinator::new(),
        })
    }

    /// The address the listener actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    /// Handle for triggering shutdown from signal wiring or tests.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.handle()
    }

    /// Run until an interrupt triggers shutdown, then tear down in order.
    ///
    /// Returns `Ok(())` after a clean shutdown; an accept failure still runs
    /// the full teardown before the error is reported.
    pub async fn run(self) -> Result<(), ServerError> {
        let workers = WorkerPool::spawn(
            self.config.workers,
            Arc::clone(&self.queue),
            Arc::clone(&self.config),
        );

        tracing::info!(
            serve_dir = %self.config.serve_dir.display(),
            queue_capacity = self.queue.capacity(),
            "Server running"
        );

        let accept_result =
            acceptor::accept_loop(&self.listener, &self.queue, self.shutdown.token()).await;

        // Intake has stopped; release every blocked task and let the pool
        // drain whatever is still queued.
        tracing::info!("Shutting down");
        self.queue.shutdown();
        let join_result = workers.join().await;

        // Ordered release: queue first, then the listening socket.
        drop(self.queue);
        drop(self.listener);

        accept_result?;
        join_result?;

        tracing::info!("Shutdown complete");
        Ok(())
    }
}
