//! `AlloyParameterCodec`: the default `ParameterCodec`, built on alloy's
//! dynamic ABI types.
//!
//! # Slot encoding rules
//! - **Value types** (uint, int, bool, address, bytes1–bytes32): left/right
//!   padded to 32 bytes and stored directly, so the value is recovered.
//! - **Reference types** (string, bytes, arrays, tuples): in a topic they are
//!   stored as the keccak256 of their encoding, and in a data slot the word is
//!   a head offset. Neither can be turned back into the value from one slot,
//!   so the raw 32-byte word is returned as `Bytes`.

use alloy_core::dyn_abi::DynSolType;
use abidecode_core::{
    codec::ParameterCodec, error::DecodeError, strip_0x, types::DecodedValue,
};

use crate::normalizer;

/// Width of one ABI word.
pub const SLOT_BYTES: usize = 32;

/// Decodes single-slot values through `DynSolType::abi_decode`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlloyParameterCodec;

impl AlloyParameterCodec {
    pub fn new() -> Self {
        Self
    }

    fn is_reference(ty: &DynSolType) -> bool {
        matches!(
            ty,
            DynSolType::String
                | DynSolType::Bytes
                | DynSolType::Array(_)
                | DynSolType::FixedArray(..)
                | DynSolType::Tuple(_)
        )
    }
}

impl ParameterCodec for AlloyParameterCodec {
    fn decode_parameter(&self, ty: &str, hex_slot: &str) -> Result<DecodedValue, DecodeError> {
        let dyn_type: DynSolType = ty.parse().map_err(|_| DecodeError::UnsupportedType {
            ty: ty.to_string(),
        })?;

        let bytes = hex::decode(strip_0x(hex_slot.trim()))
            .map_err(|e| DecodeError::invalid_hex(hex_slot, e))?;
        if bytes.len() != SLOT_BYTES {
            return Err(DecodeError::AbiDecodeFailed {
                ty: ty.to_string(),
                reason: format!("expected a {SLOT_BYTES}-byte slot, got {} bytes", bytes.len()),
            });
        }

        if Self::is_reference(&dyn_type) {
            return Ok(DecodedValue::Bytes(bytes));
        }

        dyn_type
            .abi_decode(&bytes)
            .map(normalizer::normalize)
            .map_err(|e| DecodeError::AbiDecodeFailed {
                ty: ty.to_string(),
                reason: e.to_string(),
            })
    }
}
