//! Accepted-connection handle and identity.
//!
//! # Responsibilities
//! - Own one accepted TCP stream, exclusively, for its whole lifetime
//! - Generate unique connection IDs for tracing
//! - Release the socket on every exit path via `Drop`

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::net::TcpStream;

/// Global atomic counter for connection IDs.
/// Relaxed ordering is sufficient since we only need uniqueness, not
/// synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// One accepted connection.
///
/// Exactly one actor owns a `Connection` at any time: the acceptor until it
/// is enqueued, the queue while stored, a worker after dequeue. Dropping the
/// value closes the socket, so the handle cannot leak regardless of which
/// path releases it.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer_addr: SocketAddr,
    id: ConnectionId,
}

impl Connection {
    pub(crate) fn new(stream: TcpStream, peer_addr: SocketAddr) -> Self {
        Self {
            stream,
            peer_addr,
            id: ConnectionId::new(),
        }
    }

    /// This connection's tracing ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Address of the remote peer.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Mutable access to the underlying stream for request/response I/O.
    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }
}
