//! # abidecode-evm
//!
//! EVM decoders for event logs and Solidity custom errors.
//!
//! ## Implementation notes
//! - Uses `alloy-core` dynamic ABI types for single-slot and error decoding
//! - Topics[0] → event selector (keccak256 of the canonical signature)
//! - Topics[1..] → indexed parameters, one 32-byte topic each
//! - `data` → non-indexed parameters, read as fixed 32-byte slots
//! - Custom errors resolve on the 4-byte selector; full revert data is
//!   decoded as an ABI tuple

pub mod codec;
pub mod error_decoder;
pub mod json_abi;
pub mod log_decoder;
pub mod normalizer;

pub use abidecode_core::{AbiEntry, AbiParameter, DecodeError, DecodedLog, DecodedValue, RawLog};
pub use codec::AlloyParameterCodec;
pub use error_decoder::{decode_error, DecodedCustomError, ErrorDecoder, MatchedError};
pub use json_abi::entries_from_json_abi;
pub use log_decoder::LogDecoder;

/// Decode one log against `abi` with a default (strict) decoder.
///
/// Builds a fresh [`LogDecoder`] per call; reuse a decoder when decoding many
/// logs against the same ABI.
pub fn decode_log(log: &RawLog, abi: &[AbiEntry]) -> Result<DecodedLog, DecodeError> {
    LogDecoder::new(abi).decode(log)
}
