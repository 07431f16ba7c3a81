//! The `ParameterCodec` trait: the seam to a generic ABI value decoder.
//!
//! The log decoder only knows how to turn a 256-bit unsigned topic into a
//! number. Every other declared type is handed to a codec together with the
//! raw `0x`-prefixed 32-byte slot.

use crate::error::DecodeError;
use crate::types::DecodedValue;

/// Decodes one statically-sized ABI value from a single 32-byte hex slot.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a decoder holding one can be
/// shared across threads without locking.
pub trait ParameterCodec: Send + Sync {
    fn decode_parameter(&self, ty: &str, hex_slot: &str) -> Result<DecodedValue, DecodeError>;
}

/// Blanket impl so closures can be used as codecs.
impl<F> ParameterCodec for F
where
    F: Fn(&str, &str) -> Result<DecodedValue, DecodeError> + Send + Sync,
{
    fn decode_parameter(&self, ty: &str, hex_slot: &str) -> Result<DecodedValue, DecodeError> {
        self(ty, hex_slot)
    }
}
