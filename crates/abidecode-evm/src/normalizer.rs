//! Converts alloy-core `DynSolValue` → abidecode `DecodedValue`.

use alloy_core::dyn_abi::DynSolValue;
use abidecode_core::types::DecodedValue;

/// Convert a decoded `DynSolValue` into a `DecodedValue`.
///
/// Integers narrow to `u128` / `i128` by value, not by declared width, so a
/// small `uint256` still comes back as `Uint`.
pub fn normalize(val: DynSolValue) -> DecodedValue {
    match val {
        DynSolValue::Bool(b) => DecodedValue::Bool(b),

        DynSolValue::Int(i, _bits) => match i128::try_from(i) {
            Ok(v) => DecodedValue::Int(v),
            Err(_) => DecodedValue::BigInt(i.to_string()),
        },

        DynSolValue::Uint(u, _bits) => match u128::try_from(u) {
            Ok(v) => DecodedValue::Uint(v),
            Err(_) => DecodedValue::BigUint(u.to_string()),
        },

        DynSolValue::FixedBytes(word, size) => DecodedValue::Bytes(word[..size].to_vec()),

        DynSolValue::Bytes(b) => DecodedValue::Bytes(b),

        DynSolValue::String(s) => DecodedValue::Str(s),

        // EIP-55 checksum encoding
        DynSolValue::Address(a) => DecodedValue::Address(a.to_checksum(None)),

        DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) => {
            DecodedValue::Array(vals.into_iter().map(normalize).collect())
        }

        DynSolValue::Tuple(fields) => {
            // Unnamed tuple fields get positional names "0", "1", ...
            let named: Vec<(String, DecodedValue)> = fields
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), normalize(v)))
                .collect();
            DecodedValue::Tuple(named)
        }

        // Function pointers (address ++ selector) fall back to bytes
        DynSolValue::Function(f) => DecodedValue::Bytes(f.to_vec()),
    }
}
