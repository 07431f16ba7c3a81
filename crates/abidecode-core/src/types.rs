//! Decoded value representation.
//!
//! Every parameter codec, and the 256-bit topic path in the log decoder,
//! produces a `DecodedValue`. Consumers never see alloy or other codec types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded, normalized ABI value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DecodedValue {
    Uint(u128),
    /// Unsigned values above `u128::MAX`, as exact decimal digits
    BigUint(String),
    Int(i128),
    /// Signed values outside the `i128` range, as exact decimal digits
    BigInt(String),
    Bool(bool),
    Bytes(Vec<u8>),
    Str(String),
    /// 20-byte address, `0x`-prefixed (EIP-55 checksummed when it comes from alloy)
    Address(String),
    Array(Vec<DecodedValue>),
    Tuple(Vec<(String, DecodedValue)>),
}

impl DecodedValue {
    /// Returns the inner string if this is an Address value.
    pub fn as_address(&self) -> Option<&str> {
        match self {
            DecodedValue::Address(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Coerce to a u128 if this is a small Uint.
    pub fn as_u128(&self) -> Option<u128> {
        match self {
            DecodedValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Decimal digits of an unsigned value, whichever width it was stored in.
    pub fn as_uint_string(&self) -> Option<String> {
        match self {
            DecodedValue::Uint(v) => Some(v.to_string()),
            DecodedValue::BigUint(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Uint(v) => write!(f, "{v}"),
            DecodedValue::BigUint(v) => write!(f, "{v}"),
            DecodedValue::Int(v) => write!(f, "{v}"),
            DecodedValue::BigInt(v) => write!(f, "{v}"),
            DecodedValue::Bool(v) => write!(f, "{v}"),
            DecodedValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            DecodedValue::Str(s) => write!(f, "{s}"),
            DecodedValue::Address(a) => write!(f, "{a}"),
            DecodedValue::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            DecodedValue::Tuple(fields) => {
                let parts: Vec<_> = fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nested() {
        let v = DecodedValue::Tuple(vec![
            ("0".into(), DecodedValue::Bool(true)),
            (
                "1".into(),
                DecodedValue::Array(vec![DecodedValue::Uint(1), DecodedValue::Uint(2)]),
            ),
        ]);
        assert_eq!(v.to_string(), "{0: true, 1: [1, 2]}");
        assert_eq!(DecodedValue::Bytes(vec![0xde, 0xad]).to_string(), "0xdead");
    }

    #[test]
    fn uint_string_covers_both_widths() {
        assert_eq!(DecodedValue::Uint(7).as_uint_string().as_deref(), Some("7"));
        assert_eq!(
            DecodedValue::BigUint("340282366920938463463374607431768211456".into())
                .as_uint_string()
                .as_deref(),
            Some("340282366920938463463374607431768211456")
        );
        assert_eq!(DecodedValue::Bool(false).as_uint_string(), None);
    }

    #[test]
    fn serde_roundtrip() {
        let val = DecodedValue::Address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".into());
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(
            json,
            r#"{"type":"address","value":"0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"}"#
        );
        let back: DecodedValue = serde_json::from_str(&json).unwrap();
        assert_eq!(val, back);
    }
}
