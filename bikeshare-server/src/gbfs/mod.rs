//! GBFS (General Bikeshare Feed Specification) feed access.
//!
//! Two upstream documents are consumed:
//! - `station_information.json`: slowly changing station metadata
//! - `station_status.json`: live bike and dock counts
//!
//! Both are fetched as raw bytes by a [`Fetcher`] and decoded separately,
//! so a transport failure and a decode failure stay distinguishable.

mod client;
mod error;
pub mod mock;
mod types;

pub use client::{CLIENT_IDENTIFIER_HEADER, Fetcher, FetcherConfig, HttpFetcher};
pub use error::FeedError;
pub use mock::{MockFetcher, MockResponse};
pub use types::{
    Feed, FeedData, FeedKind, InformationFeed, StationInformation, StationStatus, StatusFeed,
    decode, decode_information, decode_status,
};
