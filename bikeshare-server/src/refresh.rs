//! Background refresh cycle.
//!
//! Polls both feeds on a fixed interval and publishes each successful join.
//! A failed cycle leaves the previous snapshot in place; stale data is
//! served until a later cycle succeeds.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::gbfs::Fetcher;
use crate::join::{JoinEngine, JoinError};
use crate::view::PublishedView;

/// Default time between refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// The single writer of a [`PublishedView`].
pub struct RefreshCycle<F> {
    engine: JoinEngine<F>,
    view: PublishedView,
    interval: Duration,
}

impl<F: Fetcher> RefreshCycle<F> {
    pub fn new(engine: JoinEngine<F>, view: PublishedView, interval: Duration) -> Self {
        Self {
            engine,
            view,
            interval,
        }
    }

    /// Run one fetch-and-join and publish the result on success.
    ///
    /// Returns the number of stations published. On failure the view is
    /// left untouched and the error is returned.
    pub async fn refresh_once(&self) -> Result<usize, JoinError> {
        debug!(
            information_url = %self.engine.sources().information_url,
            status_url = %self.engine.sources().status_url,
            "fetching station feeds"
        );

        let snapshot = self.engine.fetch_and_join().await?;
        let count = snapshot.len();
        let advisory = snapshot.advisory().map(str::to_owned);

        self.view.set(snapshot).await;
        info!(stations = count, advisory = ?advisory, "published station snapshot");

        Ok(count)
    }

    /// Refresh forever. The first cycle starts immediately.
    ///
    /// Cycles never overlap: the next tick is only awaited once the current
    /// fetch has finished, and a late cycle pushes the schedule back rather
    /// than bursting to catch up.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if let Err(e) = self.refresh_once().await {
                warn!(error = %e, "refresh failed, keeping previous snapshot");
            }
        }
    }

    /// Spawn [`run`](Self::run) onto the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
