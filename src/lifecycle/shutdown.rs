//! Shutdown coordination for the server.

use tokio_util::sync::CancellationToken;

/// Coordinator for graceful shutdown.
///
/// Two logical states, `Running` and `Stopping`; the transition is one-way
/// and happens at most once no matter how many times [`trigger`] is called.
/// The underlying token is observed by exactly one point of control, the
/// accept loop; workers never watch it and instead stop when the queue
/// reports shutdown.
///
/// [`trigger`]: ShutdownCoordinator::trigger
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    /// Create a new coordinator in the `Running` state.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Move to `Stopping`. Idempotent.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// Whether shutdown has been triggered.
    pub fn is_stopping(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The token the accept loop selects on.
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// A cloneable handle for triggering or observing shutdown from outside
    /// the server (signal wiring, tests).
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            token: self.token.clone(),
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Externally held handle onto the shutdown coordinator.
#[derive(Clone)]
pub struct ShutdownHandle {
    token: CancellationToken,
}

impl ShutdownHandle {
    /// Trigger shutdown. Idempotent.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// Whether shutdown has been triggered.
    pub fn is_stopping(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_is_idempotent() {
        let coordinator = ShutdownCoordinator::new();
        assert!(!coordinator.is_stopping());

        coordinator.trigger();
        coordinator.trigger();
        assert!(coordinator.is_stopping());
    }

    #[test]
    fn handle_observes_and_triggers() {
        let coordinator = ShutdownCoordinator::new();
        let handle = coordinator.handle();
        assert!(!handle.is_stopping());

        handle.trigger();
        assert!(coordinator.is_stopping());
    }
}
