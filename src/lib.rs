//! Multi-threaded HTTP/1.0 static file server.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌───────────────────────────────────────────────┐
//!                   │                   STATICD                     │
//!                   │                                               │
//!   TCP connection  │  ┌──────────┐   ┌──────────────┐   ┌───────┐  │
//!   ────────────────┼─▶│   net    │──▶│ BoundedQueue │──▶│worker │  │
//!                   │  │ acceptor │   │ (fixed ring) │   │ pool  │  │
//!                   │  └──────────┘   └──────────────┘   └───┬───┘  │
//!                   │                                        │      │
//!                   │                                        ▼      │
//!   HTTP response   │                                   ┌────────┐  │
//!   ◀───────────────┼───────────────────────────────────│  http  │  │
//!                   │                                   └────────┘  │
//!                   │  ┌─────────────────────────────────────────┐  │
//!                   │  │          Cross-Cutting Concerns         │  │
//!                   │  │  ┌────────┐ ┌───────────┐ ┌──────────┐  │  │
//!                   │  │  │ config │ │ lifecycle │ │ tracing  │  │  │
//!                   │  │  └────────┘ └───────────┘ └──────────┘  │  │
//!                   │  └─────────────────────────────────────────┘  │
//!                   └───────────────────────────────────────────────┘
//! ```
//!
//! One acceptor loop feeds accepted connections through a bounded circular
//! queue to a fixed pool of workers; an interrupt signal drives a single,
//! strictly ordered shutdown: stop intake, shut the queue, drain and join
//! the workers, release the sockets.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod queue;
pub mod server;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::ServerConfig;
pub use lifecycle::{ShutdownCoordinator, ShutdownHandle};
pub use queue::BoundedQueue;
pub use server::Server;
