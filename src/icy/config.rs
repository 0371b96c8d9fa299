// Construction-time configuration for an ICY filter

use serde::{Deserialize, Serialize};

use crate::error::{IcyError, IcyResult};
use crate::utils::encoding::DEFAULT_ENCODING;

/// Stream parameters negotiated by the host, usually taken from the
/// `icy-metaint` response header and an optional charset hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcyConfig {
    /// Audio bytes between consecutive metadata blocks
    pub metaint: usize,
    /// Character encoding label of the metadata text (defaults to UTF-8)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl IcyConfig {
    pub fn new(metaint: usize) -> Self {
        IcyConfig {
            metaint,
            encoding: None,
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Parse a configuration from JSON and validate it
    pub fn from_json(json: &str) -> IcyResult<Self> {
        let config: IcyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> IcyResult<()> {
        if self.metaint == 0 {
            return Err(IcyError::InvalidMetaInterval(self.metaint));
        }
        Ok(())
    }

    pub fn encoding_label(&self) -> &str {
        self.encoding.as_deref().unwrap_or(DEFAULT_ENCODING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IcyConfig::new(16000);
        assert_eq!(config.encoding_label(), "UTF-8");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        assert!(matches!(
            IcyConfig::new(0).validate(),
            Err(IcyError::InvalidMetaInterval(0))
        ));
        assert!(IcyConfig::from_json(r#"{"metaint":0}"#).is_err());
    }

    #[test]
    fn test_from_json() {
        let config = IcyConfig::from_json(r#"{"metaint":8192,"encoding":"ISO-8859-1"}"#).unwrap();
        assert_eq!(config, IcyConfig::new(8192).with_encoding("ISO-8859-1"));
        assert_eq!(config.encoding_label(), "ISO-8859-1");

        let config = IcyConfig::from_json(r#"{"metaint":16000}"#).unwrap();
        assert_eq!(config.encoding, None);
    }
}
