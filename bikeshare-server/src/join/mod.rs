//! Join engine.
//!
//! Fetches the information and status feeds side by side and merges them
//! per station id into an immutable [`Snapshot`].

mod engine;
mod error;
mod snapshot;

pub use engine::{FeedSources, JoinEngine, MISSING_STATUS_ADVISORY, join_feeds};
pub use error::JoinError;
pub use snapshot::{JoinedStation, Snapshot};
