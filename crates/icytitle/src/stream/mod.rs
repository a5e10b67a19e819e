//! Stream handling
//!
//! Connects to Icecast/Shoutcast streams, walks the interleaved ICY body
//! and extracts the now-playing title from the first metadata block.

pub mod fetcher;
pub mod icy;
pub mod metadata;

pub use fetcher::StreamTitleFetcher;
pub use icy::{read_stream_title, IcyHeaders};
pub use metadata::StreamMetadata;
