//! Joined station records and the snapshot that holds them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A station known to both feeds: its name plus live counts.
///
/// Serialises to the public API shape
/// `{station_id, name, num_bikes_available, num_docks_available}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoinedStation {
    #[serde(rename = "station_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "num_bikes_available")]
    pub bikes_available: u32,
    #[serde(rename = "num_docks_available")]
    pub docks_available: u32,
}

/// One completed refresh: every joinable station plus an optional advisory.
///
/// Immutable once built. Replacing the published data means building a new
/// `Snapshot`, never editing this one.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    stations: HashMap<String, JoinedStation>,
    advisory: Option<String>,
    refreshed_at: DateTime<Utc>,
    information_updated: i64,
    status_updated: i64,
}

impl Snapshot {
    /// Build a snapshot stamped with the current time.
    ///
    /// Later duplicates of an id replace earlier ones.
    pub fn new(
        stations: impl IntoIterator<Item = JoinedStation>,
        advisory: Option<String>,
    ) -> Self {
        Self {
            stations: stations.into_iter().map(|s| (s.id.clone(), s)).collect(),
            advisory,
            refreshed_at: Utc::now(),
            information_updated: 0,
            status_updated: 0,
        }
    }

    /// Record the upstream `last_updated` of both feeds.
    pub fn with_feed_timestamps(mut self, information_updated: i64, status_updated: i64) -> Self {
        self.information_updated = information_updated;
        self.status_updated = status_updated;
        self
    }

    /// Look up a station by id.
    pub fn get(&self, id: &str) -> Option<&JoinedStation> {
        self.stations.get(id)
    }

    /// All stations, in no particular order.
    pub fn stations(&self) -> impl Iterator<Item = &JoinedStation> {
        self.stations.values()
    }

    /// All stations sorted by name, ties broken by id.
    pub fn sorted_by_name(&self) -> Vec<&JoinedStation> {
        let mut stations: Vec<_> = self.stations.values().collect();
        stations.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Note about incomplete data, e.g. stations that had no status.
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    /// Upstream `last_updated` of the information feed (seconds since epoch).
    pub fn information_updated(&self) -> i64 {
        self.information_updated
    }

    /// Upstream `last_updated` of the status feed (seconds since epoch).
    pub fn status_updated(&self) -> i64 {
        self.status_updated
    }
}
