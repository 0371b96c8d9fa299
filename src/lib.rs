//! icystream - A streaming decoder for ICY/Shoutcast in-band metadata
//!
//! Wrap the body of an HTTP response requested with `Icy-MetaData: 1` in an
//! [`IcyStreamFilter`], using the `icy-metaint` response header as the period.
//! Reading from the filter yields the plain audio stream while every metadata
//! block is parsed and reported to the listener:
//!
//! ```
//! use std::io::{Cursor, Read};
//! use icystream::IcyStreamFilter;
//!
//! let mut raw = b"abcd".to_vec();
//! raw.push(1);
//! raw.extend_from_slice(b"StreamTitle='x';");
//! raw.extend_from_slice(b"efgh");
//!
//! let mut titles = Vec::new();
//! let (tx, rx) = std::sync::mpsc::channel();
//! let mut filter = IcyStreamFilter::new(Cursor::new(raw), 4)?
//!     .with_listener(move |key: &str, value: &str| {
//!         let _ = tx.send((key.to_string(), value.to_string()));
//!     });
//!
//! let mut audio = Vec::new();
//! filter.read_to_end(&mut audio)?;
//! titles.extend(rx.try_iter());
//!
//! assert_eq!(audio, b"abcdefgh");
//! assert_eq!(titles, vec![("StreamTitle".to_string(), "x".to_string())]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod icy;
pub mod utils;

pub use error::{IcyError, IcyResult};
pub use icy::{
    parse_entry, parse_metadata, IcyConfig, IcyStreamFilter, MetadataEntry, MetadataListener,
    STREAM_TITLE,
};
pub use utils::encoding::{TextEncoding, DEFAULT_ENCODING};
