// Error types for the icystream library

use thiserror::Error;

/// Errors raised while configuring a filter or decoding a metadata block
#[derive(Debug, Error)]
pub enum IcyError {
    /// The metadata interval must be a positive byte count
    #[error("invalid metadata interval {0}: must be greater than zero")]
    InvalidMetaInterval(usize),

    /// The character encoding label is not known to `encoding_rs`
    #[error("unsupported character encoding: {0}")]
    UnsupportedEncoding(String),

    /// The metadata bytes are not valid in the configured encoding
    #[error("metadata is not valid {encoding} text ({len} bytes)")]
    MalformedText { encoding: &'static str, len: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type IcyResult<T> = Result<T, IcyError>;
