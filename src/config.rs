//! Storefront configuration

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Fixed recipient identifier for outbound order messages.
const DEFAULT_RECIPIENT: &str = "5511999272632";

/// Base URL of the messaging deep-link service.
const DEFAULT_MESSAGE_BASE: &str = "https://wa.me";

/// Well-known cart persistence file, the local-storage-key equivalent.
const DEFAULT_CART_PATH: &str = "cart.json";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration content that does not parse.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_norway::Error),
}

/// Storefront settings.
///
/// Every field has a default, so a missing configuration file and a partial
/// one are both fine.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontConfig {
    /// Recipient identifier for the messaging service; fixed configuration,
    /// never user-supplied.
    pub recipient: String,

    /// Messaging deep-link base URL.
    pub message_base: String,

    /// Path of the persisted cart file.
    pub cart_path: PathBuf,

    /// Optional catalog fixture path; the bundled catalog is used when
    /// unset.
    pub catalog_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT.to_owned(),
            message_base: DEFAULT_MESSAGE_BASE.to_owned(),
            cart_path: PathBuf::from(DEFAULT_CART_PATH),
            catalog_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read for any reason
    /// other than absence, or if its content does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(error) => return Err(error.into()),
        };

        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML content.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::Parse`] if the content does not parse.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config = StorefrontConfig::default();

        assert_eq!(config.recipient, DEFAULT_RECIPIENT);
        assert_eq!(config.message_base, DEFAULT_MESSAGE_BASE);
        assert_eq!(config.cart_path, PathBuf::from(DEFAULT_CART_PATH));
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_omitted_fields() -> TestResult {
        let config = StorefrontConfig::from_yaml("recipient: \"123456\"\n")?;

        assert_eq!(config.recipient, "123456");
        assert_eq!(config.message_base, DEFAULT_MESSAGE_BASE);

        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = StorefrontConfig::from_yaml("recipinet: \"oops\"\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_loads_defaults() -> TestResult {
        let dir = tempfile::tempdir()?;

        let config = StorefrontConfig::load(&dir.path().join("vitrine.yml"))?;

        assert_eq!(config, StorefrontConfig::default());

        Ok(())
    }

    #[test]
    fn file_overrides_are_applied() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("vitrine.yml");
        fs::write(&path, "cart_path: \"/tmp/other-cart.json\"\n")?;

        let config = StorefrontConfig::load(&path)?;

        assert_eq!(config.cart_path, PathBuf::from("/tmp/other-cart.json"));

        Ok(())
    }
}
