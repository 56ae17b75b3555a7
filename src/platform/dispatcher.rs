//! Where repositories run their background work

use std::future::Future;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;

/// Handle to the runtime that background observers are spawned on
#[derive(Debug, Clone)]
pub struct DispatcherManager {
    handle: Handle,
}

impl DispatcherManager {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime of the calling task
    pub fn try_current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::new)
    }

    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }
}
