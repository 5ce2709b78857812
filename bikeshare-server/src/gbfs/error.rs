//! Feed error types.

use super::types::FeedKind;

/// Errors from fetching or decoding a single upstream feed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// The GET failed: non-200 status, I/O error or timeout
    #[error("GET {url} failed{}: {message}", status_suffix(.status))]
    Transport {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// The body could not be parsed as the expected feed document
    #[error("failed to decode {feed} feed: {message}")]
    Decode { feed: FeedKind, message: String },

    /// The HTTP client could not be constructed
    #[error("HTTP client setup failed: {message}")]
    Setup { message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with status {s}")).unwrap_or_default()
}

impl FeedError {
    /// Build a transport error from a reqwest failure.
    pub fn transport(url: &str, err: reqwest::Error) -> Self {
        FeedError::Transport {
            url: url.to_string(),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FeedError::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FeedError::Decode { .. })
    }

    /// HTTP status of a failed GET, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::Transport {
            url: "https://example.com/status.json".into(),
            status: Some(500),
            message: "Internal Server Error".into(),
        };
        assert_eq!(
            err.to_string(),
            "GET https://example.com/status.json failed with status 500: Internal Server Error"
        );

        let err = FeedError::Transport {
            url: "https://example.com/status.json".into(),
            status: None,
            message: "operation timed out".into(),
        };
        assert_eq!(
            err.to_string(),
            "GET https://example.com/status.json failed: operation timed out"
        );

        let err = FeedError::Decode {
            feed: FeedKind::Status,
            message: "EOF while parsing a value".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to decode station status feed: EOF while parsing a value"
        );
    }

    #[test]
    fn transport_and_decode_are_distinct() {
        let transport = FeedError::Transport {
            url: "u".into(),
            status: Some(503),
            message: String::new(),
        };
        assert!(transport.is_transport());
        assert!(!transport.is_decode());
        assert_eq!(transport.status(), Some(503));

        let decode = FeedError::Decode {
            feed: FeedKind::Information,
            message: String::new(),
        };
        assert!(decode.is_decode());
        assert!(!decode.is_transport());
        assert_eq!(decode.status(), None);
    }
}
