// ICY stream filter
//
// Servers that honour `Icy-MetaData: 1` interleave a metadata block after
// every `metaint` bytes of audio:
//
//   [metaint audio bytes][len][len * 16 bytes of text][metaint audio bytes]...
//
// The filter wraps the raw response body, hands the audio bytes through and
// reports the entries of every metadata block to a listener.

use std::fmt;
use std::io::{self, Read};

use crate::error::{IcyError, IcyResult};
use crate::icy::config::IcyConfig;
use crate::icy::parser::{entries, trim_block};
use crate::icy::{INITIAL_BUFFER_SIZE, METADATA_BLOCK_UNIT};
use crate::utils::encoding::TextEncoding;
use crate::utils::io::{read_fully, read_u8};

/// Receives the key/value pairs found in metadata blocks.
///
/// Called synchronously from inside the read that crossed the block, so slow
/// listeners stall the audio path. Any `FnMut(&str, &str)` closure is a
/// listener, including ones holding `Rc`/`RefCell` state.
pub trait MetadataListener {
    fn on_metadata(&mut self, key: &str, value: &str);
}

impl<F> MetadataListener for F
where
    F: FnMut(&str, &str),
{
    fn on_metadata(&mut self, key: &str, value: &str) {
        self(key, value)
    }
}

/// A reader that strips ICY metadata blocks from the stream it wraps.
///
/// Reads never cross a metadata boundary: a bulk read returns at most the
/// number of audio bytes left before the next block, and the block is
/// consumed as soon as that count is reached.
pub struct IcyStreamFilter<R> {
    inner: R,
    period: usize,
    remaining: usize,
    buffer: Vec<u8>,
    listener: Option<Box<dyn MetadataListener>>,
    encoding: TextEncoding,
}

impl<R: Read> IcyStreamFilter<R> {
    /// Create a filter for a stream with `period` audio bytes between blocks
    pub fn new(inner: R, period: usize) -> IcyResult<Self> {
        if period == 0 {
            return Err(IcyError::InvalidMetaInterval(period));
        }

        Ok(IcyStreamFilter {
            inner,
            period,
            remaining: period,
            buffer: vec![0u8; INITIAL_BUFFER_SIZE],
            listener: None,
            encoding: TextEncoding::default(),
        })
    }

    pub fn from_config(inner: R, config: &IcyConfig) -> IcyResult<Self> {
        config.validate()?;
        Ok(Self::new(inner, config.metaint)?.with_character_encoding(config.encoding_label()))
    }

    pub fn with_listener<L>(mut self, listener: L) -> Self
    where
        L: MetadataListener + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn with_character_encoding(mut self, label: &str) -> Self {
        self.set_character_encoding(label);
        self
    }

    pub fn character_encoding(&self) -> &str {
        self.encoding.label()
    }

    /// Change the encoding used for subsequent metadata blocks.
    ///
    /// Hosts often learn the charset only after the stream has started. An
    /// unknown label is accepted; blocks decoded with it are dropped.
    pub fn set_character_encoding(&mut self, label: &str) {
        self.encoding = TextEncoding::from_label(label);
        if self.encoding.encoding().is_none() {
            log::warn!("[ICY] Unknown character encoding {:?}, metadata will be dropped", label);
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Audio bytes left before the next metadata block
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Current size of the metadata scratch buffer; it never shrinks
    pub fn scratch_capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read one audio byte, returning `None` at end of stream
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = read_u8(&mut self.inner)?;

        if byte.is_some() {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.fetch_metadata()?;
            }
        }

        Ok(byte)
    }

    /// Consume the metadata block at the current boundary.
    ///
    /// Only I/O errors escape; a block that cannot be decoded is logged and
    /// dropped.
    fn fetch_metadata(&mut self) -> io::Result<()> {
        self.remaining = self.period;

        // Zero length (no change) or end of stream
        let size = match read_u8(&mut self.inner)? {
            Some(blocks) if blocks >= 1 => blocks as usize * METADATA_BLOCK_UNIT,
            _ => return Ok(()),
        };

        if self.buffer.len() < size {
            self.buffer.resize(size, 0);
            log::debug!("[ICY] Enlarged metadata buffer to {} bytes", size);
        }

        let read = read_fully(&mut self.inner, &mut self.buffer[..size])?;
        if read < size {
            log::debug!("[ICY] Stream ended inside metadata block ({} of {} bytes)", read, size);
        }

        let text = match self.encoding.decode(trim_block(&self.buffer[..read])) {
            Ok(text) => text,
            Err(e) => {
                log::error!("[ICY] Cannot convert metadata bytes to text: {}", e);
                return Ok(());
            }
        };

        log::debug!("[ICY] Metadata string: {}", text);

        if let Some(listener) = self.listener.as_mut() {
            for (key, value) in entries(&text) {
                listener.on_metadata(key, value);
            }
        }

        Ok(())
    }
}

impl<R: Read> Read for IcyStreamFilter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(self.remaining);
        let read = self.inner.read(&mut buf[..len])?;

        // Any read that reaches `remaining` ends the audio segment, whether
        // the cap or a short read from the source got it there
        if read == self.remaining {
            self.fetch_metadata()?;
        } else {
            self.remaining -= read;
        }

        Ok(read)
    }
}

impl<R: fmt::Debug> fmt::Debug for IcyStreamFilter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcyStreamFilter")
            .field("inner", &self.inner)
            .field("period", &self.period)
            .field("remaining", &self.remaining)
            .field("scratch_capacity", &self.buffer.len())
            .field("encoding", &self.encoding.label())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
