//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (cancel-aware accept loop)
//!     → connection.rs (handle identity, exclusive ownership)
//!     → Hand off to the bounded queue, then to a worker
//! ```
//!
//! # Design Decisions
//! - The listening socket belongs to the acceptor side only
//! - A connection handle is owned by exactly one actor at a time; the socket
//!   closes when the handle is dropped, on every path

pub mod connection;
pub mod listener;

pub use connection::{Connection, ConnectionId};
pub use listener::{Listener, ListenerError};
