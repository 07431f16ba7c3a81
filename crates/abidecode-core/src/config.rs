//! Decoder configuration and config-file loading.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// How the log decoder reacts when a single parameter fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Return the first malformed-input error to the caller.
    #[default]
    Strict,
    /// Record the failure in `DecodedLog::decode_errors` and keep going.
    Lenient,
}

/// Top-level decoder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    #[serde(default)]
    pub mode: DecodeMode,
}

impl DecoderConfig {
    pub fn lenient() -> Self {
        Self {
            mode: DecodeMode::Lenient,
        }
    }

    pub fn is_lenient(&self) -> bool {
        self.mode == DecodeMode::Lenient
    }
}

/// Load any serde config from a `.json`, `.yaml` or `.yml` file.
pub fn load_config_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "json" => Ok(serde_json::from_str(&content)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        _ => Err(ConfigError::UnknownFormat { extension }),
    }
}
