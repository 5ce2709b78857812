//! Process configuration, read from environment variables.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Default upstream metadata feed (Oslo Bysykkel).
pub const DEFAULT_INFORMATION_URL: &str =
    "https://gbfs.urbansharing.com/oslobysykkel.no/station_information.json";

/// Default upstream status feed (Oslo Bysykkel).
pub const DEFAULT_STATUS_URL: &str =
    "https://gbfs.urbansharing.com/oslobysykkel.no/station_status.json";

const DEFAULT_CLIENT_ID: &str = "test-test";
const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Which presentation layers to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// HTTP API only
    Server,
    /// Terminal table only
    Table,
    /// HTTP API and terminal table
    Both,
}

impl Mode {
    pub fn serves_http(self) -> bool {
        matches!(self, Mode::Server | Mode::Both)
    }

    pub fn shows_table(self) -> bool {
        matches!(self, Mode::Table | Mode::Both)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(Mode::Server),
            "table" => Ok(Mode::Table),
            "both" => Ok(Mode::Both),
            other => Err(format!("unknown mode {other:?}, expected server, table or both")),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sent as the `Client-Identifier` header on every feed request
    pub client_id: String,
    pub information_url: String,
    pub status_url: String,
    /// Per-request timeout for feed fetches
    pub request_timeout: Duration,
    /// Time between refresh cycles
    pub refresh_interval: Duration,
    /// Address the HTTP API listens on
    pub bind: SocketAddr,
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            information_url: DEFAULT_INFORMATION_URL.to_string(),
            status_url: DEFAULT_STATUS_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            refresh_interval: Duration::from_secs(10),
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            mode: Mode::Server,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(id) = lookup("BIKESHARE_CLIENT_ID") {
            config.client_id = id;
        }
        if let Some(url) = lookup("BIKESHARE_INFORMATION_URL") {
            config.information_url = url;
        }
        if let Some(url) = lookup("BIKESHARE_STATUS_URL") {
            config.status_url = url;
        }
        if let Some(value) = lookup("BIKESHARE_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = parse_secs("BIKESHARE_REQUEST_TIMEOUT_SECS", value)?;
        }
        if let Some(value) = lookup("BIKESHARE_REFRESH_INTERVAL_SECS") {
            config.refresh_interval = parse_secs("BIKESHARE_REFRESH_INTERVAL_SECS", value)?;
        }

        let bind = lookup("BIKESHARE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        config.bind = bind.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            name: "BIKESHARE_BIND",
            value: bind.clone(),
            reason: e.to_string(),
        })?;

        if let Some(value) = lookup("BIKESHARE_MODE") {
            config.mode = value.parse().map_err(|reason| ConfigError::Invalid {
                name: "BIKESHARE_MODE",
                value,
                reason,
            })?;
        }

        Ok(config)
    }

    /// Set custom feed URLs (for testing).
    pub fn with_feed_urls(
        mut self,
        information_url: impl Into<String>,
        status_url: impl Into<String>,
    ) -> Self {
        self.information_url = information_url.into();
        self.status_url = status_url.into();
        self
    }

    /// Set the refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

fn parse_secs(name: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name,
            value,
            reason: "must be at least 1 second".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            name,
            value,
            reason: e.to_string(),
        }),
    }
}
