//! icytitle — now-playing titles from internet radio
//!
//! Speaks just enough of the ICY protocol (Icecast/Shoutcast in-band
//! metadata) to read the current `StreamTitle` of a stream.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::time::Duration;
//!
//! let title = icytitle::fetch_title("http://radio.example.com/live", Duration::from_secs(10));
//! println!("{}", title.unwrap_or_default());
//! ```

use std::time::Duration;

pub mod config;
pub mod error;
pub mod stream;

pub use error::{FetchOutcome, ReadStage, Result};
pub use stream::StreamTitleFetcher;

/// Fetch the current title of one stream, `None` when there is none.
///
/// Never fails: every problem is logged through `tracing` and reported as
/// `None`. Use [`StreamTitleFetcher::fetch`] to see why.
pub fn fetch_title(url: &str, timeout: Duration) -> Option<String> {
    match StreamTitleFetcher::new(timeout) {
        Ok(fetcher) => fetcher.fetch_title(url),
        Err(e) => {
            tracing::warn!("Could not create HTTP client: {e}");
            None
        }
    }
}
