//! Error types for the abidecode pipeline.
//!
//! "No matching ABI entry" is never an error: decoders report it through
//! their return value. Everything here is a malformed-input failure that the
//! caller has to see.

use thiserror::Error;

/// Errors that can occur while decoding a log, a selector or a hex slot.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Empty hex value")]
    EmptyHex,

    #[error("Invalid hex '{input}': {reason}")]
    InvalidHex { input: String, reason: String },

    #[error("Hex value has {digits} digits, at most {max} allowed")]
    HexTooLong { digits: usize, max: usize },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Unsupported ABI type: {ty}")]
    UnsupportedType { ty: String },

    #[error("ABI decode failed for type {ty}: {reason}")]
    AbiDecodeFailed { ty: String, reason: String },

    #[error("Invalid ABI: {reason}")]
    InvalidAbi { reason: String },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DecodeError {
    /// Shorthand for an [`DecodeError::InvalidHex`] built from any displayable cause.
    pub fn invalid_hex(input: &str, reason: impl std::fmt::Display) -> Self {
        DecodeError::InvalidHex {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown config format '{extension}' (expected json, yaml or yml)")]
    UnknownFormat { extension: String },
}
