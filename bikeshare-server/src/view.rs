//! The published station view.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::join::Snapshot;

/// Thread-safe holder of the latest successful [`Snapshot`].
///
/// Cloning shares the same slot. The refresh cycle is the only writer;
/// readers get an `Arc` to a complete snapshot and never hold the lock
/// while using it.
#[derive(Clone, Default)]
pub struct PublishedView {
    inner: Arc<RwLock<Option<Arc<Snapshot>>>>,
}

impl PublishedView {
    /// Create an empty view. Reads report "not ready" until the first `set`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, or `None` if no refresh has succeeded yet.
    pub async fn get(&self) -> Option<Arc<Snapshot>> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Replace the current snapshot wholesale.
    pub async fn set(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        let mut guard = self.inner.write().await;
        *guard = Some(snapshot);
    }
}
