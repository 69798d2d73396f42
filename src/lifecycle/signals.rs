//! OS signal handling.
//!
//! # Responsibilities
//! - Register the interrupt handler (Ctrl+C / SIGINT)
//! - Translate the signal into a shutdown trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The signal feeds one cancellation token; only the accept loop observes
//!   it, so a single point of control drives teardown
//! - Repeated interrupts are harmless: the trigger is idempotent

use crate::lifecycle::shutdown::ShutdownHandle;

/// Spawn the task that forwards interrupt signals to the shutdown handle.
pub fn spawn_interrupt_listener(handle: ShutdownHandle) {
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for interrupt signal");
                return;
            }
            if handle.is_stopping() {
                tracing::debug!("Interrupt received again; shutdown already in progress");
            } else {
                tracing::info!("Interrupt received, shutting down");
                handle.trigger();
            }
        }
    });
}
