// ICY (Shoutcast/Icecast) in-band metadata support
//
// Stream layout with `icy-metaint: N`:
// - N bytes of audio
// - Length byte L (block size is L * 16; 0 means "no metadata this time")
// - L * 16 bytes of text, null-padded, e.g. StreamTitle='...';StreamUrl='...';
// - N bytes of audio, and so on

pub mod config;
pub mod parser;
pub mod stream;

pub use config::IcyConfig;
pub use parser::{parse_entry, parse_metadata, MetadataEntry, STREAM_TITLE};
pub use stream::{IcyStreamFilter, MetadataListener};

/// Multiplier applied to the length byte of a metadata block
pub const METADATA_BLOCK_UNIT: usize = 16;

/// Largest possible metadata block (255 * 16 bytes)
pub const MAX_METADATA_SIZE: usize = u8::MAX as usize * METADATA_BLOCK_UNIT;

// Initial size of the metadata scratch buffer
pub(crate) const INITIAL_BUFFER_SIZE: usize = 128;
