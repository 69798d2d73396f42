//! TCP listener with cancel-aware accept.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming TCP connections
//! - Observe the shutdown token so a blocked accept can be interrupted
//!   without relying on signal-interrupted syscalls

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::net::connection::Connection;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Failed to bind to address.
    Bind(std::io::Error),
    /// Failed to accept connection.
    Accept(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Bind(e) => write!(f, "Failed to bind: {}", e),
            ListenerError::Accept(e) => write!(f, "Failed to accept: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

/// Listening endpoint for the server.
///
/// The socket is owned solely by the acceptor side; workers never touch it.
/// Dropping the listener closes the socket.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind to the given address.
    pub async fn bind(addr: &str) -> Result<Self, ListenerError> {
        let addr: SocketAddr = addr.parse().map_err(|e| {
            ListenerError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;

        let listener = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;
        let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

        tracing::info!(address = %local_addr, "Listener bound");

        Ok(Self { inner: listener })
    }

    /// Accept the next connection, or return `None` if the shutdown token is
    /// cancelled while waiting.
    pub async fn accept(
        &self,
        shutdown: &CancellationToken,
    ) -> Result<Option<Connection>, ListenerError> {
        tokio::select! {
            _ = shutdown.cancelled() => Ok(None),
            accepted = self.inner.accept() => {
                let (stream, peer_addr) = accepted.map_err(ListenerError::Accept)?;
                let conn = Connection::new(stream, peer_addr);
                tracing::debug!(
                    connection_id = %conn.id(),
                    peer_addr = %peer_addr,
                    "Connection accepted"
                );
                Ok(Some(conn))
            }
        }
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }
}
