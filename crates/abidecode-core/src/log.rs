//! Raw and decoded log types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::signature::Selector;
use crate::strip_0x;
use crate::types::DecodedValue;

/// A raw, undecoded EVM log as returned by `eth_getLogs`.
/// Other RPC fields (address, blockNumber, ...) are ignored on deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLog {
    /// topics[0] is the event selector; topics[1..] are indexed params
    #[serde(default)]
    pub topics: Vec<String>,
    /// Concatenated 32-byte slots of the non-indexed params, `0x`-prefixed hex
    #[serde(default)]
    pub data: String,
}

impl RawLog {
    pub fn new(topics: Vec<String>, data: impl Into<String>) -> Self {
        Self {
            topics,
            data: data.into(),
        }
    }

    /// topics[0], if present.
    pub fn event_selector(&self) -> Option<&str> {
        self.topics.first().map(|s| s.as_str())
    }

    /// The data blob without its `0x` prefix.
    pub fn data_hex(&self) -> &str {
        strip_0x(self.data.trim())
    }
}

/// The ABI event a log was matched to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedEvent {
    pub name: String,
    /// Canonical signature, e.g. `"Transfer(address,address,uint256)"`
    pub signature: String,
    pub selector: Selector,
}

/// The result of decoding one log.
///
/// Decoding is best effort: a log that matches no event yields an empty
/// result with `event == None`, and a matched log whose topics or data run
/// short lists the affected parameters in `unresolved` instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedLog {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub event: Option<MatchedEvent>,
    /// Decoded values keyed by parameter name: indexed params first (topic
    /// order), then non-indexed params (data order)
    pub fields: IndexMap<String, DecodedValue>,
    /// Parameters of the matched event that had no topic or data slot
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unresolved: Vec<String>,
    /// Lenient mode only: parameters whose value failed to decode
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub decode_errors: IndexMap<String, String>,
}

impl DecodedLog {
    /// The result for a log that matched no event.
    pub fn unmatched() -> Self {
        Self::default()
    }

    pub fn matched(event: MatchedEvent) -> Self {
        Self {
            event: Some(event),
            ..Self::default()
        }
    }

    pub fn is_match(&self) -> bool {
        self.event.is_some()
    }

    /// Matched, and every parameter of the event was decoded.
    pub fn is_complete(&self) -> bool {
        self.is_match() && self.unresolved.is_empty() && self.decode_errors.is_empty()
    }

    /// Get a field value by name.
    pub fn field(&self, name: &str) -> Option<&DecodedValue> {
        self.fields.get(name)
    }

    /// Returns `true` if any fields failed to decode.
    pub fn has_errors(&self) -> bool {
        !self.decode_errors.is_empty()
    }

    pub fn event_name(&self) -> Option<&str> {
        self.event.as_ref().map(|e| e.name.as_str())
    }
}
