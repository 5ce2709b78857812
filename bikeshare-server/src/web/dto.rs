//! Data transfer objects for web responses.
//!
//! Station bodies are [`JoinedStation`](crate::join::JoinedStation) itself,
//! which already serialises to the public wire shape.

use serde::{Deserialize, Serialize};

use crate::join::Snapshot;

/// Error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Freshness summary of the published snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether any refresh has succeeded yet
    pub ready: bool,

    /// Stations in the current snapshot
    pub station_count: usize,

    /// Advisory message of the current snapshot
    pub advisory: Option<String>,

    /// When the current snapshot was built (RFC 3339)
    pub refreshed_at: Option<String>,

    /// Upstream `last_updated` of the information feed
    pub information_updated: Option<i64>,

    /// Upstream `last_updated` of the status feed
    pub status_updated: Option<i64>,
}

impl StatusResponse {
    pub fn not_ready() -> Self {
        Self {
            ready: false,
            station_count: 0,
            advisory: None,
            refreshed_at: None,
            information_updated: None,
            status_updated: None,
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            ready: true,
            station_count: snapshot.len(),
            advisory: snapshot.advisory().map(str::to_owned),
            refreshed_at: Some(snapshot.refreshed_at().to_rfc3339()),
            information_updated: Some(snapshot.information_updated()),
            status_updated: Some(snapshot.status_updated()),
        }
    }
}
