//! Now-playing title fetcher
//!
//! One HTTP request per call: ask for ICY metadata, skip to the first
//! metadata block, read its StreamTitle, hang up.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;

use crate::config::icy::METADATA_REQUEST_HEADER;
use crate::config::network::{DEFAULT_TIMEOUT_SECS, USER_AGENT};
use crate::error::{FetchOutcome, Result};
use crate::stream::icy::{read_stream_title, IcyHeaders};

/// Fetches the current StreamTitle of Icecast/Shoutcast streams.
///
/// Holds no per-stream state, so one fetcher can serve any number of
/// threads. Each call owns its connection and closes it before returning.
#[derive(Debug, Clone)]
pub struct StreamTitleFetcher {
    client: Client,
    timeout: Duration,
}

impl StreamTitleFetcher {
    /// Create a fetcher whose calls are bounded by `timeout`, connect included.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout)
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(FetchOutcome::from_reqwest)?;

        Ok(Self { client, timeout })
    }

    /// Create a fetcher with the default timeout
    pub fn with_default_timeout() -> Result<Self> {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Bound on one whole call: connect, headers and every body read
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the current title, reporting exactly why there is none.
    ///
    /// `Ok("")` is a station explicitly announcing an empty title.
    pub fn fetch(&self, url: &str) -> Result<String> {
        let url = parse_stream_url(url)?;

        let response = self
            .client
            .get(url)
            .header(METADATA_REQUEST_HEADER, "1")
            // deadline for the whole exchange; the client timeout alone only
            // bounds each body read
            .timeout(self.timeout)
            .send()
            .map_err(FetchOutcome::from_reqwest)?;

        if !response.status().is_success() {
            return Err(FetchOutcome::HttpStatus(response.status().as_u16()));
        }

        let headers = IcyHeaders::from_headers(response.headers());
        tracing::debug!(
            metaint = ?headers.metaint,
            station = ?headers.station_name,
            content_type = ?headers.content_type,
            bitrate = ?headers.bitrate,
            "ICY headers"
        );

        let metaint = headers.metaint()?;
        read_stream_title(response, metaint)
    }

    /// Fetch the current title, folding every outcome into `None`.
    ///
    /// Failures are logged at warn level, stations that simply have no
    /// title at debug level.
    pub fn fetch_title(&self, url: &str) -> Option<String> {
        match self.fetch(url) {
            Ok(title) => {
                tracing::debug!(url, title = %title, "StreamTitle");
                Some(title)
            }
            Err(outcome) if outcome.is_failure() => {
                tracing::warn!(url, "No stream title: {outcome}");
                None
            }
            Err(outcome) => {
                tracing::debug!(url, "No stream title: {outcome}");
                None
            }
        }
    }
}

/// Only absolute http(s) URLs name a stream
fn parse_stream_url(raw: &str) -> Result<Url> {
    let url =
        Url::parse(raw.trim()).map_err(|e| FetchOutcome::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FetchOutcome::InvalidUrl(format!(
            "{raw}: unsupported scheme {scheme:?}"
        ))),
    }
}
