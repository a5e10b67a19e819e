//! ICY metadata block decoding
//!
//! Pure functions for turning a raw metadata block into text and pulling the
//! `StreamTitle` value out of it, plus the artist/song split of a title.

use crate::config::icy::STREAM_TITLE_MARKER;

/// Now-playing title split into artist and song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl StreamMetadata {
    /// Create metadata from an ICY title string.
    ///
    /// Splits on first ` - ` separator: "Artist - Title" → artist="Artist", title="Title".
    /// If no separator found, the whole string becomes the title.
    pub fn from_icy_title(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self {
                title: None,
                artist: None,
            };
        }

        match raw.split_once(" - ") {
            Some((artist, title)) => Self {
                title: non_empty(title),
                artist: non_empty(artist),
            },
            None => Self {
                title: Some(raw.to_string()),
                artist: None,
            },
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Decode a raw metadata block into text.
///
/// Blocks are null-padded to a multiple of 16 bytes; trailing nulls are
/// dropped. Invalid UTF-8 is replaced rather than rejected, since
/// broadcasters send whatever their playout software produces.
pub fn decode_metadata_block(raw_block: &[u8]) -> String {
    let end = raw_block
        .iter()
        .rposition(|&b| b != 0)
        .map(|p| p + 1)
        .unwrap_or(0);

    String::from_utf8_lossy(&raw_block[..end]).into_owned()
}

/// Extract the StreamTitle value from decoded metadata text.
///
/// ICY metadata format: `StreamTitle='Artist - Song';StreamUrl='...';`
///
/// The value starts after the opening quote and runs to the next `'`, or to
/// the end of the text when the quote is never closed. An explicit empty
/// title (`StreamTitle='';`) yields `Some("")`; `None` means the marker is
/// missing.
pub fn extract_stream_title(metadata: &str) -> Option<String> {
    let start = metadata.find(STREAM_TITLE_MARKER)?;
    let mut rest = metadata[start + STREAM_TITLE_MARKER.len()..].chars();
    // opening quote
    rest.next();
    let value = rest.as_str();
    let end = value.find('\'').unwrap_or(value.len());
    Some(value[..end].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- from_icy_title ---

    #[test]
    fn from_icy_title_with_separator() {
        let m = StreamMetadata::from_icy_title("Pink Floyd - Comfortably Numb");
        assert_eq!(m.artist, Some("Pink Floyd".to_string()));
        assert_eq!(m.title, Some("Comfortably Numb".to_string()));
    }

    #[test]
    fn from_icy_title_no_separator() {
        let m = StreamMetadata::from_icy_title("Just A Title");
        assert_eq!(m.artist, None);
        assert_eq!(m.title, Some("Just A Title".to_string()));
    }

    #[test]
    fn from_icy_title_empty() {
        let m = StreamMetadata::from_icy_title("   ");
        assert_eq!(m.artist, None);
        assert_eq!(m.title, None);
    }

    #[test]
    fn from_icy_title_multiple_separators() {
        let m = StreamMetadata::from_icy_title("A - B - C");
        assert_eq!(m.artist, Some("A".to_string()));
        assert_eq!(m.title, Some("B - C".to_string()));
    }

    #[test]
    fn from_icy_title_dash_without_spaces() {
        let m = StreamMetadata::from_icy_title("Artist-Title");
        assert_eq!(m.artist, None);
        assert_eq!(m.title, Some("Artist-Title".to_string()));
    }

    #[test]
    fn from_icy_title_separator_at_start() {
        let m = StreamMetadata::from_icy_title(" - Song");
        assert_eq!(m.artist, None);
        assert_eq!(m.title, Some("Song".to_string()));
    }

    #[test]
    fn from_icy_title_special_chars() {
        let m = StreamMetadata::from_icy_title("Motörhead - Ace of Spades (Live)");
        assert_eq!(m.artist, Some("Motörhead".to_string()));
        assert_eq!(m.title, Some("Ace of Spades (Live)".to_string()));
    }

    // --- decode_metadata_block ---

    #[test]
    fn decode_strips_trailing_nulls() {
        let mut block = b"StreamTitle='A';".to_vec();
        block.resize(32, 0);
        assert_eq!(decode_metadata_block(&block), "StreamTitle='A';");
    }

    #[test]
    fn decode_all_null_block_is_empty() {
        assert_eq!(decode_metadata_block(&[0u8; 16]), "");
        assert_eq!(decode_metadata_block(&[]), "");
    }

    #[test]
    fn decode_keeps_interior_nulls() {
        let block = b"ab\0cd\0\0";
        assert_eq!(decode_metadata_block(block), "ab\0cd");
    }

    #[test]
    fn decode_replaces_invalid_utf8() {
        let mut block = b"StreamTitle='Caf".to_vec();
        block.push(0xE9); // latin-1 'é'
        block.extend_from_slice(b"';");
        let text = decode_metadata_block(&block);
        assert!(text.starts_with("StreamTitle='Caf"));
        assert!(text.ends_with("';"));
        assert_eq!(extract_stream_title(&text), Some("Caf\u{FFFD}".to_string()));
    }

    // --- extract_stream_title ---

    #[test]
    fn extract_standard_metadata() {
        let raw = "StreamTitle='Pink Floyd - Comfortably Numb';StreamUrl='';";
        assert_eq!(
            extract_stream_title(raw),
            Some("Pink Floyd - Comfortably Numb".to_string())
        );
    }

    #[test]
    fn extract_empty_title_is_some_empty() {
        assert_eq!(extract_stream_title("StreamTitle='';"), Some(String::new()));
    }

    #[test]
    fn extract_missing_marker_is_none() {
        assert_eq!(extract_stream_title("StreamUrl='http://x';"), None);
        assert_eq!(extract_stream_title(""), None);
    }

    #[test]
    fn extract_unterminated_value_runs_to_end() {
        let mut block = b"StreamTitle='Artist - Song".to_vec();
        block.resize(48, 0);
        let text = decode_metadata_block(&block);
        assert_eq!(extract_stream_title(&text), Some("Artist - Song".to_string()));
    }

    #[test]
    fn extract_trims_whitespace() {
        assert_eq!(
            extract_stream_title("StreamTitle='  Spaced Out  ';"),
            Some("Spaced Out".to_string())
        );
    }

    #[test]
    fn extract_stops_at_first_quote() {
        // apostrophes inside titles end the value early, like every ICY client
        assert_eq!(
            extract_stream_title("StreamTitle='Guns N' Roses - Patience';"),
            Some("Guns N".to_string())
        );
    }

    #[test]
    fn extract_marker_in_middle_of_block() {
        let raw = "StreamUrl='http://example.com';StreamTitle='Daft Punk - Da Funk';";
        assert_eq!(
            extract_stream_title(raw),
            Some("Daft Punk - Da Funk".to_string())
        );
    }

    #[test]
    fn extract_marker_at_end_of_text() {
        assert_eq!(extract_stream_title("StreamTitle="), Some(String::new()));
    }

    #[test]
    fn extract_greek_title() {
        let raw = "StreamTitle='Μάνος Χατζιδάκις - Τα παιδιά του Πειραιά';";
        assert_eq!(
            extract_stream_title(raw),
            Some("Μάνος Χατζιδάκις - Τα παιδιά του Πειραιά".to_string())
        );
    }

    #[test]
    fn extract_first_of_multiple_titles() {
        let raw = "StreamTitle='First';StreamTitle='Second';";
        assert_eq!(extract_stream_title(raw), Some("First".to_string()));
    }
}
