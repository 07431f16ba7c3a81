//! # abidecode-core
//!
//! Core types and primitives shared across the abidecode crates: the ABI
//! model, canonical signatures and selectors, the exact 256-bit hex decoder,
//! the indexed/non-indexed parameter split and the `ParameterCodec` seam the
//! EVM decoders plug a generic ABI codec into.

pub mod abi;
pub mod bighex;
pub mod codec;
pub mod config;
pub mod error;
pub mod log;
pub mod signature;
pub mod splitter;
pub mod types;

pub use abi::{parse_abi_json, AbiEntry, AbiParameter, EntryKind};
pub use bighex::{decode_uint256_hex, BigDecimalValue, Uint256};
pub use codec::ParameterCodec;
pub use config::{load_config_file, DecodeMode, DecoderConfig};
pub use error::{ConfigError, DecodeError};
pub use log::{DecodedLog, MatchedEvent, RawLog};
pub use signature::{
    canonical_signature, error_selector, event_selector, Keccak256, Selector, SignatureCodec,
    SignatureHasher,
};
pub use splitter::{split_parameters, SplitParameters};
pub use types::DecodedValue;

/// Strip a leading `0x` / `0X` if present.
pub fn strip_0x(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}
