//! Fetch outcomes for icytitle
//!
//! Every way a fetch can end without a title, using thiserror.
//! All of them collapse to "no title" at the output boundary.

use std::fmt;

use thiserror::Error;

/// Which fixed-size read of the ICY body came up short
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    /// The `metaint` audio bytes before the metadata block
    Audio,
    /// The single metadata length byte
    LengthByte,
    /// The metadata block itself
    Metadata,
}

impl fmt::Display for ReadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadStage::Audio => "audio data",
            ReadStage::LengthByte => "metadata length byte",
            ReadStage::Metadata => "metadata block",
        };
        f.write_str(name)
    }
}

/// Why a fetch produced no title
#[derive(Error, Debug)]
pub enum FetchOutcome {
    #[error("Server does not send ICY metadata (no icy-metaint header)")]
    NoMetadataSupport,

    #[error("Invalid icy-metaint header: {0:?}")]
    InvalidMetaInterval(String),

    #[error("Stream ended during {stage}: expected {expected} bytes, got {received}")]
    ShortRead {
        stage: ReadStage,
        expected: usize,
        received: usize,
    },

    #[error("Metadata block is empty")]
    EmptyBlock,

    #[error("No StreamTitle in metadata block")]
    MarkerNotFound,

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("{}", friendly_network_error(.0))]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchOutcome {
    /// Something went wrong, as opposed to the station simply having no title
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            FetchOutcome::NoMetadataSupport
                | FetchOutcome::EmptyBlock
                | FetchOutcome::MarkerNotFound
        )
    }

    /// Caller misuse rather than a stream or network condition
    pub fn is_usage_error(&self) -> bool {
        matches!(self, FetchOutcome::InvalidUrl(_))
    }

    /// Classify a request error, pulling timeouts out of the generic case
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchOutcome::Timeout(friendly_network_error(&e))
        } else {
            FetchOutcome::Network(e)
        }
    }

    /// Classify a body read error. reqwest wraps its own error inside the
    /// io::Error it returns from `Read`.
    pub(crate) fn from_io(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::TimedOut {
            return FetchOutcome::Timeout(e.to_string());
        }
        let wrapped_timeout = e
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
            .is_some_and(|inner| inner.is_timeout());
        if wrapped_timeout {
            return FetchOutcome::Timeout("Read timed out".to_string());
        }
        FetchOutcome::Io(e)
    }
}

/// Result type alias for icytitle
pub type Result<T> = std::result::Result<T, FetchOutcome>;

fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_builder() {
        if let Some(url) = e.url() {
            return format!("Invalid URL: {url}");
        }
        return "Invalid URL".to_string();
    }
    if e.is_connect() {
        if let Some(url) = e.url() {
            return format!("Could not connect to {}", url.host_str().unwrap_or("server"));
        }
        return "Could not connect to server".to_string();
    }
    if e.is_timeout() {
        return "Connection timed out".to_string();
    }
    if e.is_body() || e.is_decode() {
        return "Invalid response from server".to_string();
    }
    format!("Network error: {e}")
}
