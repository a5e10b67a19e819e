//! ICY stream body reading
//!
//! Parses ICY response headers and walks the interleaved body of an
//! Icecast/Shoutcast stream up to the first metadata block:
//!
//! ```text
//! [ metaint audio bytes ][ len ][ len * 16 metadata bytes ][ audio ... ]
//! ```

use std::io::{self, Read};

use reqwest::header::{HeaderMap, CONTENT_TYPE};

use crate::config::icy::{META_LENGTH_UNIT, METAINT_HEADER};
use crate::error::{FetchOutcome, ReadStage, Result};
use crate::stream::metadata::{decode_metadata_block, extract_stream_title};

const SKIP_CHUNK_SIZE: usize = 8192;

/// Headers parsed from an ICY stream response
#[derive(Debug, Clone)]
pub struct IcyHeaders {
    /// Raw `icy-metaint` value, if the server sent one
    pub metaint: Option<String>,
    pub station_name: Option<String>,
    pub content_type: Option<String>,
    pub bitrate: Option<u32>,
}

impl IcyHeaders {
    /// Collect the ICY-related headers. Lookups are case-insensitive.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let text = |name: &str| {
            headers
                .get(name)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        };

        Self {
            metaint: text(METAINT_HEADER),
            station_name: text("icy-name"),
            content_type: headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string()),
            bitrate: text("icy-br").and_then(|v| v.trim().parse::<u32>().ok()),
        }
    }

    /// The metadata interval, validated.
    pub fn metaint(&self) -> Result<usize> {
        parse_metaint(self.metaint.as_deref())
    }
}

/// Validate an `icy-metaint` header value.
///
/// A missing header means the server does not interleave metadata. Anything
/// that is not a positive integer is a protocol violation; `0` would put a
/// length byte in front of every audio byte and is rejected as well.
pub fn parse_metaint(raw: Option<&str>) -> Result<usize> {
    let raw = raw.ok_or(FetchOutcome::NoMetadataSupport)?;
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(FetchOutcome::InvalidMetaInterval(raw.to_string())),
        Ok(n) => Ok(n),
    }
}

/// Read the first metadata block of an ICY body and return its StreamTitle.
///
/// Consumes exactly `metaint` audio bytes, one length byte and
/// `length * 16` metadata bytes, never more.
pub fn read_stream_title<R: Read>(mut body: R, metaint: usize) -> Result<String> {
    skip_audio(&mut body, metaint)?;

    let mut len_byte = [0u8; 1];
    read_full(&mut body, &mut len_byte, ReadStage::LengthByte)?;

    let meta_len = len_byte[0] as usize * META_LENGTH_UNIT;
    if meta_len == 0 {
        return Err(FetchOutcome::EmptyBlock);
    }

    let mut block = vec![0u8; meta_len];
    read_full(&mut body, &mut block, ReadStage::Metadata)?;

    let text = decode_metadata_block(&block);
    extract_stream_title(&text).ok_or(FetchOutcome::MarkerNotFound)
}

/// Discard exactly `count` audio bytes
fn skip_audio<R: Read>(body: &mut R, count: usize) -> Result<()> {
    let mut chunk = [0u8; SKIP_CHUNK_SIZE];
    let mut skipped = 0;

    while skipped < count {
        let want = chunk.len().min(count - skipped);
        match body.read(&mut chunk[..want]) {
            Ok(0) => {
                return Err(FetchOutcome::ShortRead {
                    stage: ReadStage::Audio,
                    expected: count,
                    received: skipped,
                })
            }
            Ok(n) => skipped += n,
            Err(e) => match read_error(e, ReadStage::Audio, count, skipped) {
                Some(outcome) => return Err(outcome),
                None => continue,
            },
        }
    }
    Ok(())
}

/// Fill `buf` completely, reporting how far we got if the stream ends
fn read_full<R: Read>(body: &mut R, buf: &mut [u8], stage: ReadStage) -> Result<()> {
    let mut filled = 0;

    while filled < buf.len() {
        match body.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(FetchOutcome::ShortRead {
                    stage,
                    expected: buf.len(),
                    received: filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) => match read_error(e, stage, buf.len(), filled) {
                Some(outcome) => return Err(outcome),
                None => continue,
            },
        }
    }
    Ok(())
}

/// Map a body read error; `None` means retry.
fn read_error(
    e: io::Error,
    stage: ReadStage,
    expected: usize,
    received: usize,
) -> Option<FetchOutcome> {
    match e.kind() {
        io::ErrorKind::Interrupted => None,
        io::ErrorKind::UnexpectedEof => Some(FetchOutcome::ShortRead {
            stage,
            expected,
            received,
        }),
        _ => Some(FetchOutcome::from_io(e)),
    }
}
