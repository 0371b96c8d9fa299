// ICY metadata text grammar
//
// A decoded metadata block looks like:
//   StreamTitle='Artist - Song';StreamUrl='http://example.com';
//
// Segments are separated by ';' and split on their first '='. Values wrapped
// in single quotes are unwrapped; anything else is taken verbatim. Quotes are
// not an escaping mechanism: a ';' inside a quoted value still ends the segment.

use serde::{Deserialize, Serialize};

/// Key carrying the current track title
pub const STREAM_TITLE: &str = "StreamTitle";

const SEGMENT_SEPARATOR: char = ';';
const KEY_VALUE_SEPARATOR: char = '=';
const QUOTE: char = '\'';

/// A single key/value pair parsed from a metadata block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        MetadataEntry {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_stream_title(&self) -> bool {
        self.key == STREAM_TITLE
    }
}

/// Cut a raw block at its first zero byte (blocks are null-padded to 16 bytes)
pub fn trim_block(block: &[u8]) -> &[u8] {
    let end = block.iter().position(|&b| b == 0).unwrap_or(block.len());
    &block[..end]
}

/// Split one segment into key and value.
///
/// Returns `None` when the segment has no '=' or the key would be empty.
pub fn split_entry(segment: &str) -> Option<(&str, &str)> {
    let (key, rest) = segment.split_once(KEY_VALUE_SEPARATOR)?;
    if key.is_empty() {
        return None;
    }

    // A lone quote is too short to be a quoted value and is kept as-is
    let value = rest
        .strip_prefix(QUOTE)
        .and_then(|inner| inner.strip_suffix(QUOTE))
        .unwrap_or(rest);

    Some((key, value))
}

/// Parse one segment into an owned entry
pub fn parse_entry(segment: &str) -> Option<MetadataEntry> {
    split_entry(segment).map(|(key, value)| MetadataEntry::new(key, value))
}

/// Iterate the well-formed entries of a metadata string, left to right
pub fn entries(metadata: &str) -> impl Iterator<Item = (&str, &str)> + '_ {
    metadata
        .split(SEGMENT_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            let entry = split_entry(segment);
            if entry.is_none() {
                log::trace!("[ICY] Skipping malformed metadata segment {:?}", segment);
            }
            entry
        })
}

/// Parse a metadata string into owned entries
pub fn parse_metadata(metadata: &str) -> impl Iterator<Item = MetadataEntry> + '_ {
    entries(metadata).map(|(key, value)| MetadataEntry::new(key, value))
}
