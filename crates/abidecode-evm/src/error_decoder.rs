//! Match Solidity 0.8.4+ custom errors against an ABI.
//!
//! Custom errors are ABI-encoded as:
//! `selector(4 bytes)` ++ `ABI-encoded arguments`
//!
//! Where `selector = keccak256("ErrorName(type1,type2,...)")[:4]`

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use abidecode_core::{
    abi::{parse_abi_json, AbiEntry},
    error::DecodeError,
    signature::{Selector, SignatureCodec, ERROR_SELECTOR_LEN},
    strip_0x,
    types::DecodedValue,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::normalizer;

/// The ABI error a selector resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedError {
    pub name: String,
    pub signature: String,
}

/// A custom error with its arguments decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedCustomError {
    pub name: String,
    pub signature: String,
    pub selector: Selector,
    /// Decoded arguments: (param_name, value), declaration order
    pub inputs: Vec<(String, DecodedValue)>,
}

impl fmt::Display for DecodedCustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<_> = self.inputs.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{}({})", self.name, args.join(", "))
    }
}

#[derive(Debug, Clone)]
struct PreparedError {
    entry: AbiEntry,
    signature: String,
    selector: Selector,
}

/// Resolves 4-byte error selectors to the ABI's custom errors.
#[derive(Debug, Clone)]
pub struct ErrorDecoder {
    errors: Vec<PreparedError>,
}

impl ErrorDecoder {
    /// Create a decoder for the errors in `abi`; other entries are ignored.
    pub fn new(abi: &[AbiEntry]) -> Self {
        let signatures = SignatureCodec::new();
        let errors = abi
            .iter()
            .filter(|e| e.is_error())
            .map(|e| {
                let signature = signatures.signature_of(e);
                let selector = signatures.error_selector(&signature);
                PreparedError {
                    entry: e.with_positional_names(),
                    signature,
                    selector,
                }
            })
            .collect();
        Self { errors }
    }

    /// Create a decoder from a standard Ethereum ABI JSON string.
    pub fn from_abi_json(abi_json: &str) -> Result<Self, DecodeError> {
        Ok(Self::new(&parse_abi_json(abi_json)?))
    }

    /// Number of error entries known to this decoder.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn find(&self, selector_hex: &str) -> Option<&PreparedError> {
        self.errors.iter().find(|e| e.selector.matches(selector_hex))
    }

    /// Resolve a `0x`-prefixed 4-byte selector (10 characters) to an error name.
    ///
    /// Returns `Ok(None)` when no error in the ABI has this selector, whether
    /// or not the ABI has any errors at all.
    pub fn decode(&self, selector: &str) -> Result<Option<MatchedError>, DecodeError> {
        let digits = strip_0x(selector.trim());
        if digits.len() != ERROR_SELECTOR_LEN * 2 {
            return Err(DecodeError::InvalidSelector {
                selector: selector.to_string(),
                reason: format!(
                    "expected {} hex digits, got {}",
                    ERROR_SELECTOR_LEN * 2,
                    digits.len()
                ),
            });
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(DecodeError::InvalidSelector {
                selector: selector.to_string(),
                reason: format!("invalid digit '{bad}'"),
            });
        }

        let found = self.find(digits).map(|e| MatchedError {
            name: e.entry.name.clone(),
            signature: e.signature.clone(),
        });
        match &found {
            Some(m) => debug!(selector = digits, error = %m.signature, "matched error"),
            None => debug!(selector = digits, "no ABI error matches selector"),
        }
        Ok(found)
    }

    /// Decode full revert data: the selector plus its ABI-encoded arguments.
    ///
    /// Returns `Ok(None)` for data shorter than a selector or an unknown
    /// selector. Arguments that do not decode against the matched entry are
    /// an error.
    pub fn decode_revert(&self, data: &[u8]) -> Result<Option<DecodedCustomError>, DecodeError> {
        if data.len() < ERROR_SELECTOR_LEN {
            return Ok(None);
        }
        let selector_hex = hex::encode(&data[..ERROR_SELECTOR_LEN]);
        let Some(prepared) = self.find(&selector_hex) else {
            debug!(selector = %selector_hex, "no ABI error matches revert selector");
            return Ok(None);
        };

        let inputs = decode_arguments(&prepared.entry, &data[ERROR_SELECTOR_LEN..])?;
        Ok(Some(DecodedCustomError {
            name: prepared.entry.name.clone(),
            signature: prepared.signature.clone(),
            selector: prepared.selector.clone(),
            inputs,
        }))
    }

    /// Convenience: `decode_revert` from a hex string (with or without `0x`).
    pub fn decode_revert_hex(
        &self,
        hex_str: &str,
    ) -> Result<Option<DecodedCustomError>, DecodeError> {
        let bytes = hex::decode(strip_0x(hex_str.trim()))
            .map_err(|e| DecodeError::invalid_hex(hex_str, e))?;
        self.decode_revert(&bytes)
    }
}

fn decode_arguments(
    entry: &AbiEntry,
    payload: &[u8],
) -> Result<Vec<(String, DecodedValue)>, DecodeError> {
    if entry.inputs.is_empty() {
        return Ok(vec![]);
    }

    let type_list = entry.type_names().join(",");
    let types = entry
        .inputs
        .iter()
        .map(|p| {
            let ty = p.canonical_type();
            ty.parse::<DynSolType>()
                .map_err(|_| DecodeError::UnsupportedType { ty })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let tuple_type = DynSolType::Tuple(types);
    let decoded = tuple_type
        .abi_decode_params(payload)
        .map_err(|e| DecodeError::AbiDecodeFailed {
            ty: format!("({type_list})"),
            reason: e.to_string(),
        })?;

    let values = match decoded {
        DynSolValue::Tuple(vals) => vals,
        single => vec![single],
    };

    Ok(entry
        .inputs
        .iter()
        .zip(values)
        .map(|(param, val)| (param.name.clone(), normalizer::normalize(val)))
        .collect())
}

/// Resolve `selector` against the errors in `abi`.
pub fn decode_error(selector: &str, abi: &[AbiEntry]) -> Result<Option<MatchedError>, DecodeError> {
    ErrorDecoder::new(abi).decode(selector)
}
