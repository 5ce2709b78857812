//! Terminal table of station availability.

use std::io::Write;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::join::Snapshot;
use crate::view::PublishedView;

/// ANSI: clear screen and move the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Render a snapshot as a fixed-width table sorted by station name.
pub fn render_table(snapshot: &Snapshot) -> String {
    let stations = snapshot.sorted_by_name();
    let name_width = stations
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Station".len());

    let mut out = String::new();
    out.push_str(&format!("{:<name_width$}  {:>5}  {:>5}\n", "Station", "Bikes", "Docks"));
    out.push_str(&format!("{}  {}  {}\n", "-".repeat(name_width), "-----", "-----"));

    for station in &stations {
        out.push_str(&format!(
            "{:<name_width$}  {:>5}  {:>5}\n",
            station.name, station.bikes_available, station.docks_available
        ));
    }

    out.push('\n');
    if let Some(advisory) = snapshot.advisory() {
        out.push_str(&format!("Note: {advisory}\n"));
    }
    out.push_str(&format!(
        "{} stations, last refreshed {}\n",
        stations.len(),
        snapshot.refreshed_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out
}

/// Text shown before the first successful refresh.
pub fn render_not_ready() -> String {
    "Waiting for station data...\n".to_string()
}

/// Redraw the table on stdout every `interval`, forever.
pub async fn run_table(view: PublishedView, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let frame = match view.get().await {
            Some(snapshot) => render_table(&snapshot),
            None => render_not_ready(),
        };

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = write!(stdout, "{CLEAR_SCREEN}{frame}").and_then(|_| stdout.flush()) {
            warn!(error = %e, "failed to draw station table");
        }
    }
}
