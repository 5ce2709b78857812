//! Concurrent fetch of both feeds and the per-station join.

use std::collections::HashMap;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tracing::{debug, warn};

use crate::gbfs::{
    FeedError, FeedKind, Fetcher, InformationFeed, StationInformation, StationStatus, StatusFeed,
    decode_information, decode_status,
};

use super::error::JoinError;
use super::snapshot::{JoinedStation, Snapshot};

/// Advisory attached to a snapshot when some known stations had no status.
pub const MISSING_STATUS_ADVISORY: &str = "We are missing the status for some stations.";

/// Upstream feed locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSources {
    pub information_url: String,
    pub status_url: String,
}

impl FeedSources {
    pub fn new(information_url: impl Into<String>, status_url: impl Into<String>) -> Self {
        Self {
            information_url: information_url.into(),
            status_url: status_url.into(),
        }
    }
}

/// Outcome of one fetch-and-decode task.
enum Fetched {
    Information(Result<InformationFeed, FeedError>),
    Status(Result<StatusFeed, FeedError>),
}

/// Fetches both feeds concurrently and joins them into a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct JoinEngine<F> {
    fetcher: F,
    sources: FeedSources,
}

impl<F: Fetcher> JoinEngine<F> {
    pub fn new(fetcher: F, sources: FeedSources) -> Self {
        Self { fetcher, sources }
    }

    pub fn sources(&self) -> &FeedSources {
        &self.sources
    }

    /// Fetch both feeds and join them.
    ///
    /// The two fetches run as separate tasks and both are always awaited,
    /// whichever finishes first and whether or not either fails. If any
    /// side failed, the first failure observed is returned.
    pub async fn fetch_and_join(&self) -> Result<Snapshot, JoinError> {
        let information = {
            let fetcher = self.fetcher.clone();
            let url = self.sources.information_url.clone();
            tokio::spawn(async move {
                let body = fetcher.fetch(&url).await;
                Fetched::Information(body.and_then(|b| decode_information(&b)))
            })
        };
        let status = {
            let fetcher = self.fetcher.clone();
            let url = self.sources.status_url.clone();
            tokio::spawn(async move {
                let body = fetcher.fetch(&url).await;
                Fetched::Status(body.and_then(|b| decode_status(&b)))
            })
        };

        let mut pending: FuturesUnordered<_> = [information, status].into_iter().collect();

        let mut information_feed = None;
        let mut status_feed = None;
        let mut first_error = None;

        while let Some(joined) = pending.next().await {
            let error = match joined {
                Ok(Fetched::Information(Ok(feed))) => {
                    information_feed = Some(feed);
                    continue;
                }
                Ok(Fetched::Status(Ok(feed))) => {
                    status_feed = Some(feed);
                    continue;
                }
                Ok(Fetched::Information(Err(source))) => JoinError::Feed {
                    feed: FeedKind::Information,
                    source,
                },
                Ok(Fetched::Status(Err(source))) => JoinError::Feed {
                    feed: FeedKind::Status,
                    source,
                },
                Err(e) => JoinError::TaskFailed(e.to_string()),
            };

            debug!(error = %error, "feed fetch failed");
            if first_error.is_none() {
                first_error = Some(error);
            }
        }

        if let Some(error) = first_error {
            return Err(error);
        }

        match (information_feed, status_feed) {
            (Some(information), Some(status)) => Ok(join_feeds(&information, &status)),
            _ => Err(JoinError::TaskFailed(
                "fetch task finished without a result".to_string(),
            )),
        }
    }
}

/// Join decoded feeds by station id.
///
/// Information is authoritative for which stations exist: stations without
/// status are left out and flagged in the advisory, and status-only stations
/// are ignored. Information records with an empty id or name are skipped.
/// Output order is unspecified.
pub fn join_feeds(information: &InformationFeed, status: &StatusFeed) -> Snapshot {
    let known: HashMap<&str, &StationInformation> = information
        .stations()
        .iter()
        .filter(|s| !s.id.is_empty() && !s.name.is_empty())
        .map(|s| (s.id.as_str(), s))
        .collect();
    let unnamed = information
        .stations()
        .iter()
        .filter(|s| s.id.is_empty() || s.name.is_empty())
        .count();
    if unnamed > 0 {
        debug!(unnamed, "skipping station records without an id or name");
    }
    let live: HashMap<&str, &StationStatus> = status
        .stations()
        .iter()
        .map(|s| (s.id.as_str(), s))
        .collect();

    let mut missing_status = 0usize;
    let mut stations = Vec::with_capacity(known.len());

    for (id, info) in &known {
        match live.get(id) {
            Some(status) => stations.push(JoinedStation {
                id: (*id).to_string(),
                name: info.name.clone(),
                bikes_available: status.bikes_available,
                docks_available: status.docks_available,
            }),
            None => missing_status += 1,
        }
    }

    let advisory = if missing_status > 0 {
        warn!(missing_status, "some stations have no status");
        Some(MISSING_STATUS_ADVISORY.to_string())
    } else {
        None
    };

    Snapshot::new(stations, advisory)
        .with_feed_timestamps(information.last_updated, status.last_updated)
}
