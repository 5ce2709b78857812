//! GBFS feed documents and their decoder.
//!
//! Only the parts of the General Bikeshare Feed Specification that the
//! join needs are mapped here. Unknown fields are ignored and missing
//! numeric fields fall back to zero, matching what the upstream feed
//! actually sends rather than what the GBFS document promises.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::FeedError;

/// Which of the two upstream feeds a document or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// `station_information.json`: names, addresses, coordinates
    Information,
    /// `station_status.json`: live bike and dock counts
    Status,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Information => f.write_str("station information"),
            FeedKind::Status => f.write_str("station status"),
        }
    }
}

/// Top-level GBFS document: `{ "last_updated": ..., "data": { "stations": [...] } }`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Feed<T> {
    /// Seconds since the Unix epoch when the upstream last rebuilt the document.
    #[serde(default)]
    pub last_updated: i64,

    pub data: FeedData<T>,
}

/// The `data` object of a GBFS document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedData<T> {
    #[serde(default = "Vec::new")]
    pub stations: Vec<T>,
}

impl<T> Feed<T> {
    /// Build a feed document from its parts (used by tests and fixtures).
    pub fn new(last_updated: i64, stations: Vec<T>) -> Self {
        Self {
            last_updated,
            data: FeedData { stations },
        }
    }

    pub fn stations(&self) -> &[T] {
        &self.data.stations
    }
}

/// Station metadata record from the information feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StationInformation {
    #[serde(rename = "station_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    pub capacity: u32,
}

/// Live availability record from the status feed.
///
/// The `is_*` flags are integers on the wire (`0`/`1`), not booleans,
/// and are kept that way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StationStatus {
    #[serde(rename = "station_id")]
    pub id: String,
    #[serde(rename = "num_bikes_available")]
    pub bikes_available: u32,
    #[serde(rename = "num_bikes_disabled")]
    pub bikes_disabled: u32,
    #[serde(rename = "num_docks_available")]
    pub docks_available: u32,
    #[serde(rename = "num_docks_disabled")]
    pub docks_disabled: u32,
    pub is_installed: i32,
    pub is_renting: i32,
    pub is_returning: i32,
    pub last_reported: i64,
}

pub type InformationFeed = Feed<StationInformation>;
pub type StatusFeed = Feed<StationStatus>;

/// Decode a raw feed body into its typed document.
///
/// Empty and malformed bodies both fail with [`FeedError::Decode`].
pub fn decode<T: DeserializeOwned>(feed: FeedKind, body: &[u8]) -> Result<Feed<T>, FeedError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FeedError::Decode {
            feed,
            message: "empty response body".to_string(),
        });
    }

    serde_json::from_slice(body).map_err(|e| FeedError::Decode {
        feed,
        message: e.to_string(),
    })
}

pub fn decode_information(body: &[u8]) -> Result<InformationFeed, FeedError> {
    decode(FeedKind::Information, body)
}

pub fn decode_status(body: &[u8]) -> Result<StatusFeed, FeedError> {
    decode(FeedKind::Status, body)
}
