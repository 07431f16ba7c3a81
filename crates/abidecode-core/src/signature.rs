//! Canonical signatures and their keccak256 selectors.
//!
//! The selector of an event is the full keccak256 hash of its canonical
//! signature string, e.g.:
//!   keccak256("Transfer(address,address,uint256)")
//!   → 0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef
//!
//! The selector of a custom error is the first 4 bytes of the same hash:
//!   keccak256("InsufficientBalance()")[..4]

use serde::{Deserialize, Serialize};
use tiny_keccak::{Hasher, Keccak};

use crate::abi::{AbiEntry, EntryKind};
use crate::strip_0x;

/// Byte length of an error selector.
pub const ERROR_SELECTOR_LEN: usize = 4;

/// The 256-bit hash primitive selectors are derived from.
///
/// Implementations must be reentrant; decoders share one across threads.
pub trait SignatureHasher: Send + Sync {
    fn hash256(&self, input: &[u8]) -> [u8; 32];
}

/// Ethereum's keccak256 (the pre-NIST variant of SHA-3).
#[derive(Debug, Default, Clone, Copy)]
pub struct Keccak256;

impl SignatureHasher for Keccak256 {
    fn hash256(&self, input: &[u8]) -> [u8; 32] {
        let mut hasher = Keccak::v256();
        let mut output = [0u8; 32];
        hasher.update(input);
        hasher.finalize(&mut output);
        output
    }
}

/// A `0x`-prefixed lowercase hex selector: 32 bytes for events, 4 for errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selector(String);

impl Selector {
    fn from_bytes(bytes: &[u8]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Number of bytes this selector encodes.
    pub fn byte_len(&self) -> usize {
        strip_0x(&self.0).len() / 2
    }

    /// Compare against caller-supplied hex: ASCII case is ignored and the
    /// `0x` prefix is optional on the other side.
    pub fn matches(&self, other: &str) -> bool {
        strip_0x(&self.0).eq_ignore_ascii_case(strip_0x(other.trim()))
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build `name(type1,type2,...)`. Types are not validated.
pub fn canonical_signature<S: AsRef<str>>(name: &str, types: &[S]) -> String {
    let types: Vec<&str> = types.iter().map(|t| t.as_ref()).collect();
    format!("{}({})", name, types.join(","))
}

/// Derives signatures and selectors with a pluggable hash primitive.
#[derive(Debug, Default, Clone)]
pub struct SignatureCodec<H = Keccak256> {
    hasher: H,
}

impl SignatureCodec<Keccak256> {
    pub fn new() -> Self {
        Self { hasher: Keccak256 }
    }
}

impl<H: SignatureHasher> SignatureCodec<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self { hasher }
    }

    /// Full 32-byte digest of the signature.
    pub fn event_selector(&self, signature: &str) -> Selector {
        Selector::from_bytes(&self.hasher.hash256(signature.as_bytes()))
    }

    /// First 4 bytes of the digest.
    pub fn error_selector(&self, signature: &str) -> Selector {
        let digest = self.hasher.hash256(signature.as_bytes());
        Selector::from_bytes(&digest[..ERROR_SELECTOR_LEN])
    }

    pub fn signature_of(&self, entry: &AbiEntry) -> String {
        canonical_signature(&entry.name, &entry.type_names())
    }

    /// Event or error selector, depending on the entry's kind.
    pub fn selector_of(&self, entry: &AbiEntry) -> Selector {
        let signature = self.signature_of(entry);
        match entry.kind {
            EntryKind::Event => self.event_selector(&signature),
            EntryKind::Error => self.error_selector(&signature),
        }
    }
}

/// keccak256 event selector of a canonical signature.
pub fn event_selector(signature: &str) -> Selector {
    SignatureCodec::new().event_selector(signature)
}

/// keccak256 error selector (first 4 bytes) of a canonical signature.
pub fn error_selector(signature: &str) -> Selector {
    SignatureCodec::new().error_selector(signature)
}
