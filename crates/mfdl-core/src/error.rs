//! Error type shared by the resolver, downloader and speed test.

use thiserror::Error;

/// Coarse classification used by the CLI to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input URL rejected before any request was made.
    InvalidInput,
    /// Connection failure or non-success HTTP status.
    Network,
    /// Landing page has no recognizable download link.
    Parse,
    /// Anything else (local I/O, unexpected state).
    Unexpected,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} does not look like a {expected_domain} link")]
    InvalidInputUrl { url: String, expected_domain: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u32 },

    #[error("download link not found on page (looked for {selector})")]
    MissingLink { selector: String },

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Unexpected(String),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidInputUrl { .. } => ErrorKind::InvalidInput,
            FetchError::Transport { .. } | FetchError::Status { .. } => ErrorKind::Network,
            FetchError::MissingLink { .. } => ErrorKind::Parse,
            FetchError::Io(_) | FetchError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    pub(crate) fn transport(url: &str) -> impl FnOnce(curl::Error) -> FetchError + '_ {
        move |source| FetchError::Transport {
            url: url.to_string(),
            source,
        }
    }
}
