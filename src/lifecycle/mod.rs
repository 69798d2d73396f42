//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT → ShutdownCoordinator::trigger
//!
//! Shutdown (shutdown.rs):
//!     Trigger observed by accept loop → stop intake → queue shutdown
//!     → workers drain and exit → queue and listener released
//! ```
//!
//! # Design Decisions
//! - Ordered shutdown: stop accept, shut the queue, join workers, release
//! - One-way state machine: once `Stopping`, never back to `Running`

pub mod shutdown;
pub mod signals;

pub use shutdown::{ShutdownCoordinator, ShutdownHandle};
