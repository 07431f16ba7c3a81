//! Exact hex → decimal conversion for 256-bit unsigned topic values.
//!
//! A topic slot holds up to 64 hex digits. Values that fit in 32 significant
//! digits (128 bits) are parsed straight into a `u128`; wider values go
//! through [`Uint256`], a four-limb integer with carrying arithmetic, and are
//! rendered as a decimal string.

use serde::Serialize;
use std::fmt;

use crate::error::DecodeError;
use crate::strip_0x;
use crate::types::DecodedValue;

/// Maximum hex digits in a 32-byte slot.
pub const MAX_HEX_DIGITS: usize = 64;

/// Significant hex digits that always fit a `u128` (4 bits each).
pub const NATIVE_HEX_DIGITS: usize = 32;

/// 10^19, the largest power of ten below 2^64.
const DECIMAL_CHUNK: u64 = 10_000_000_000_000_000_000;
const DECIMAL_CHUNK_DIGITS: usize = 19;

/// A 256-bit unsigned integer stored as four little-endian `u64` limbs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uint256 {
    limbs: [u64; 4],
}

impl Uint256 {
    pub const ZERO: Self = Self { limbs: [0; 4] };

    pub const MAX: Self = Self {
        limbs: [u64::MAX; 4],
    };

    pub fn from_u128(v: u128) -> Self {
        Self {
            limbs: [v as u64, (v >> 64) as u64, 0, 0],
        }
    }

    /// Parse hex digits (optional `0x`, at most 64 digits).
    pub fn from_hex(hex: &str) -> Result<Self, DecodeError> {
        let digits = validate_hex_slot(hex)?;
        let mut value = Self::ZERO;
        // Horner form of Σ digit·16^(len-i-1), most significant digit first.
        for c in digits.chars() {
            let digit = c
                .to_digit(16)
                .ok_or_else(|| DecodeError::invalid_hex(hex, format!("invalid digit '{c}'")))?;
            value = value
                .checked_mul_add(16, u64::from(digit))
                .ok_or(DecodeError::HexTooLong {
                    digits: digits.len(),
                    max: MAX_HEX_DIGITS,
                })?;
        }
        Ok(value)
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    /// `self * mul + add`, or `None` on overflow past 256 bits.
    pub fn checked_mul_add(self, mul: u64, add: u64) -> Option<Self> {
        let mut limbs = [0u64; 4];
        let mut carry = u128::from(add);
        for (out, &limb) in limbs.iter_mut().zip(self.limbs.iter()) {
            // (2^64-1)^2 + (2^64-1) < 2^128, so this never overflows u128.
            let wide = u128::from(limb) * u128::from(mul) + carry;
            *out = wide as u64;
            carry = wide >> 64;
        }
        if carry != 0 {
            return None;
        }
        Some(Self { limbs })
    }

    /// Divide in place by a non-zero `u64`, returning the remainder.
    fn div_rem_small(&mut self, div: u64) -> u64 {
        let div = u128::from(div);
        let mut rem: u128 = 0;
        for limb in self.limbs.iter_mut().rev() {
            let cur = (rem << 64) | u128::from(*limb);
            *limb = (cur / div) as u64;
            rem = cur % div;
        }
        rem as u64
    }

    /// The value as a `u128`, if the upper two limbs are empty.
    pub fn to_u128(&self) -> Option<u128> {
        if self.limbs[2] != 0 || self.limbs[3] != 0 {
            return None;
        }
        Some(u128::from(self.limbs[0]) | (u128::from(self.limbs[1]) << 64))
    }

    /// Exact base-10 rendering.
    pub fn to_decimal_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut n = *self;
        let mut chunks = Vec::new();
        while !n.is_zero() {
            chunks.push(n.div_rem_small(DECIMAL_CHUNK));
        }
        let mut out = String::with_capacity(chunks.len() * DECIMAL_CHUNK_DIGITS);
        let mut iter = chunks.iter().rev();
        if let Some(head) = iter.next() {
            out.push_str(&head.to_string());
        }
        for chunk in iter {
            out.push_str(&format!("{chunk:0width$}", width = DECIMAL_CHUNK_DIGITS));
        }
        out
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal_string())
    }
}

/// A decoded unsigned value: native when it fits, exact decimal digits otherwise.
///
/// The representation is canonical: `Big` is only produced for values above
/// `u128::MAX`, so equal numbers always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BigDecimalValue {
    Native(u128),
    Big(String),
}

impl BigDecimalValue {
    pub fn as_u128(&self) -> Option<u128> {
        match self {
            BigDecimalValue::Native(v) => Some(*v),
            BigDecimalValue::Big(_) => None,
        }
    }

    pub fn to_decimal_string(&self) -> String {
        match self {
            BigDecimalValue::Native(v) => v.to_string(),
            BigDecimalValue::Big(s) => s.clone(),
        }
    }
}

impl fmt::Display for BigDecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BigDecimalValue::Native(v) => write!(f, "{v}"),
            BigDecimalValue::Big(s) => write!(f, "{s}"),
        }
    }
}

impl From<BigDecimalValue> for DecodedValue {
    fn from(v: BigDecimalValue) -> Self {
        match v {
            BigDecimalValue::Native(n) => DecodedValue::Uint(n),
            BigDecimalValue::Big(s) => DecodedValue::BigUint(s),
        }
    }
}

/// Strip `0x` and check length and alphabet; returns the bare digits.
fn validate_hex_slot(hex: &str) -> Result<&str, DecodeError> {
    let digits = strip_0x(hex);
    if digits.is_empty() {
        return Err(DecodeError::EmptyHex);
    }
    if digits.len() > MAX_HEX_DIGITS {
        return Err(DecodeError::HexTooLong {
            digits: digits.len(),
            max: MAX_HEX_DIGITS,
        });
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(DecodeError::invalid_hex(hex, format!("invalid digit '{bad}'")));
    }
    Ok(digits)
}

/// Decode a big-endian hex slot (optional `0x`, up to 64 digits) into its
/// exact decimal value.
pub fn decode_uint256_hex(hex: &str) -> Result<BigDecimalValue, DecodeError> {
    let digits = validate_hex_slot(hex)?;

    if digits.bytes().all(|b| b == b'0') {
        return Ok(BigDecimalValue::Native(0));
    }

    let significant = digits.trim_start_matches('0');
    if significant.len() <= NATIVE_HEX_DIGITS {
        return u128::from_str_radix(significant, 16)
            .map(BigDecimalValue::Native)
            .map_err(|e| DecodeError::invalid_hex(hex, e));
    }

    let value = Uint256::from_hex(significant)?;
    Ok(BigDecimalValue::Big(value.to_decimal_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(v: u128) -> String {
        format!("0x{v:064x}")
    }

    #[test]
    fn zero_fast_path() {
        assert_eq!(decode_uint256_hex(&slot(0)).unwrap(), BigDecimalValue::Native(0));
        assert_eq!(decode_uint256_hex("0").unwrap(), BigDecimalValue::Native(0));
    }

    #[test]
    fn small_values_are_native() {
        assert_eq!(decode_uint256_hex(&slot(1000)).unwrap(), BigDecimalValue::Native(1000));
        assert_eq!(
            decode_uint256_hex(&slot(u128::MAX)).unwrap(),
            BigDecimalValue::Native(u128::MAX)
        );
        // Prefix is optional.
        assert_eq!(decode_uint256_hex("3e8").unwrap(), BigDecimalValue::Native(1000));
    }

    #[test]
    fn two_to_the_128_goes_big() {
        let hex = format!("0x{}1{}", "0".repeat(31), "0".repeat(32));
        assert_eq!(
            decode_uint256_hex(&hex).unwrap(),
            BigDecimalValue::Big("340282366920938463463374607431768211456".into())
        );
    }

    #[test]
    fn max_value() {
        let hex = format!("0x{}", "f".repeat(64));
        assert_eq!(
            decode_uint256_hex(&hex).unwrap().to_decimal_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
        assert_eq!(Uint256::from_hex(&hex).unwrap(), Uint256::MAX);
    }

    #[test]
    fn uppercase_digits_accepted() {
        assert_eq!(
            decode_uint256_hex("0xFF").unwrap(),
            BigDecimalValue::Native(255)
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(decode_uint256_hex("0x"), Err(DecodeError::EmptyHex)));
        assert!(matches!(decode_uint256_hex("0xzz"), Err(DecodeError::InvalidHex { .. })));
        let too_long = format!("0x{}", "1".repeat(65));
        assert!(matches!(
            decode_uint256_hex(&too_long),
            Err(DecodeError::HexTooLong { digits: 65, .. })
        ));
    }

    #[test]
    fn checked_mul_add_overflows_at_256_bits() {
        assert!(Uint256::MAX.checked_mul_add(1, 1).is_none());
        assert!(Uint256::MAX.checked_mul_add(2, 0).is_none());
        assert_eq!(Uint256::ZERO.checked_mul_add(16, 7), Some(Uint256::from_u128(7)));
    }

    #[test]
    fn decimal_rendering_pads_inner_chunks() {
        // 10^19 exactly: one leading chunk "1" followed by a zero-padded chunk.
        let v = Uint256::from_u128(10_000_000_000_000_000_000);
        assert_eq!(v.to_decimal_string(), "10000000000000000000");
        let v = Uint256::from_u128(10_000_000_000_000_000_007);
        assert_eq!(v.to_string(), "10000000000000000007");
        assert_eq!(Uint256::ZERO.to_string(), "0");
    }

    #[test]
    fn to_u128_only_when_it_fits() {
        assert_eq!(Uint256::from_u128(u128::MAX).to_u128(), Some(u128::MAX));
        assert_eq!(Uint256::MAX.to_u128(), None);
    }
}
