//! Join error types.

use crate::gbfs::{FeedError, FeedKind};

/// Errors that abort a fetch-and-join. No snapshot is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
    /// One of the two feeds could not be fetched or decoded
    #[error("{feed} feed unavailable: {source}")]
    Feed { feed: FeedKind, source: FeedError },

    /// A fetch task panicked or was cancelled before reporting
    #[error("fetch task failed: {0}")]
    TaskFailed(String),
}

impl JoinError {
    /// The feed whose failure aborted the join, if any.
    pub fn feed(&self) -> Option<FeedKind> {
        match self {
            JoinError::Feed { feed, .. } => Some(*feed),
            JoinError::TaskFailed(_) => None,
        }
    }
}
