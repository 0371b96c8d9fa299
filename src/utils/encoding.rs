// Encoding utilities

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{IcyError, IcyResult};

/// Label used when no character encoding is configured
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// A character encoding selected by its label.
///
/// The label is kept verbatim so it can be reported back to the host. It is
/// resolved through the WHATWG label table of `encoding_rs`, which means
/// `"ISO-8859-1"` and `"latin1"` both select windows-1252. An unknown label is
/// not rejected here; it fails when text is decoded with it.
#[derive(Debug, Clone)]
pub struct TextEncoding {
    label: String,
    encoding: Option<&'static Encoding>,
}

impl TextEncoding {
    pub fn from_label(label: &str) -> Self {
        let encoding = Encoding::for_label(label.trim().as_bytes());
        TextEncoding {
            label: label.to_string(),
            encoding,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The resolved encoding, or `None` if the label is unknown
    pub fn encoding(&self) -> Option<&'static Encoding> {
        self.encoding
    }

    /// Decode text strictly: malformed sequences are an error, never replaced
    pub fn decode(&self, data: &[u8]) -> IcyResult<String> {
        let encoding = self
            .encoding
            .ok_or_else(|| IcyError::UnsupportedEncoding(self.label.clone()))?;
        decode_text(data, encoding)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding {
            label: DEFAULT_ENCODING.to_string(),
            encoding: Some(UTF_8),
        }
    }
}

/// Decode text with specified encoding
pub fn decode_text(data: &[u8], encoding: &'static Encoding) -> IcyResult<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(data)
        .map(Cow::into_owned)
        .ok_or(IcyError::MalformedText {
            encoding: encoding.name(),
            len: data.len(),
        })
}
