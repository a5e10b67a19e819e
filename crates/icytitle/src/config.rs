//! Configuration constants for icytitle

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("icytitle/", env!("CARGO_PKG_VERSION"));

    /// Default bound on a whole fetch (connect + reads) in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
}

/// ICY protocol constants
pub mod icy {
    /// Request header that opts in to in-band metadata
    pub const METADATA_REQUEST_HEADER: &str = "Icy-MetaData";

    /// Response header carrying the audio bytes between metadata blocks
    pub const METAINT_HEADER: &str = "icy-metaint";

    /// Bytes per unit of the metadata length byte
    pub const META_LENGTH_UNIT: usize = 16;

    /// Largest possible metadata block (255 units)
    pub const MAX_META_BLOCK_LEN: usize = u8::MAX as usize * META_LENGTH_UNIT;

    /// Key of the now-playing field inside a metadata block
    pub const STREAM_TITLE_MARKER: &str = "StreamTitle=";
}
