//! `LogDecoder`: matches an EVM log against ABI events and decodes it.
//!
//! - topics[0] → event selector (keccak256 of the canonical signature)
//! - topics[1..] → indexed params, one topic each, in declaration order
//! - `data` → non-indexed params, one 32-byte slot each, in declaration order
//!
//! The data blob is read as fixed slots with no offset indirection, so only
//! statically-sized non-indexed params decode correctly. A `string`, `bytes`
//! or dynamic array in the data blob comes back as its raw head word.

use std::sync::Arc;

use abidecode_core::{
    abi::{parse_abi_json, AbiEntry, AbiParameter},
    bighex::decode_uint256_hex,
    codec::ParameterCodec,
    config::DecoderConfig,
    error::DecodeError,
    log::{DecodedLog, MatchedEvent, RawLog},
    signature::{Selector, SignatureCodec},
    splitter::split_parameters,
    types::DecodedValue,
};
use tracing::{debug, trace, warn};

use crate::codec::AlloyParameterCodec;

/// Hex characters per 32-byte data slot.
pub const SLOT_HEX_LEN: usize = 64;

/// Key under which a malformed data blob is reported in lenient mode.
pub const DATA_ERROR_KEY: &str = "__data__";

/// An ABI event with its signature and selector computed once.
#[derive(Debug, Clone)]
struct PreparedEvent {
    entry: AbiEntry,
    signature: String,
    selector: Selector,
}

/// The EVM log decoder.
///
/// Holds the ABI's events (selectors precomputed, declaration order kept) and
/// a parameter codec. `decode` keeps no state between calls, so one decoder
/// can be shared behind an `Arc` across threads.
pub struct LogDecoder {
    events: Vec<PreparedEvent>,
    codec: Arc<dyn ParameterCodec>,
    config: DecoderConfig,
}

impl LogDecoder {
    /// Create a decoder for the events in `abi`, using the alloy codec.
    pub fn new(abi: &[AbiEntry]) -> Self {
        Self::with_codec(abi, Arc::new(AlloyParameterCodec::new()))
    }

    /// Create a decoder with a custom parameter codec.
    pub fn with_codec(abi: &[AbiEntry], codec: Arc<dyn ParameterCodec>) -> Self {
        let signatures = SignatureCodec::new();
        let events = abi
            .iter()
            .filter(|e| e.is_event())
            .map(|e| {
                let signature = signatures.signature_of(e);
                let selector = signatures.event_selector(&signature);
                PreparedEvent {
                    entry: e.with_positional_names(),
                    signature,
                    selector,
                }
            })
            .collect();
        Self {
            events,
            codec,
            config: DecoderConfig::default(),
        }
    }

    /// Create a decoder from a standard Ethereum ABI JSON string.
    pub fn from_abi_json(abi_json: &str) -> Result<Self, DecodeError> {
        Ok(Self::new(&parse_abi_json(abi_json)?))
    }

    /// Builder-style: replace the decoder configuration.
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// `(signature, selector)` of every event this decoder can match.
    pub fn events(&self) -> impl Iterator<Item = (&str, &Selector)> {
        self.events
            .iter()
            .map(|e| (e.signature.as_str(), &e.selector))
    }

    /// First event, in ABI declaration order, whose selector equals `topic0`.
    fn find_event(&self, topic0: &str) -> Option<&PreparedEvent> {
        self.events.iter().find(|e| e.selector.matches(topic0))
    }

    /// Decode one log.
    ///
    /// A log with no topics[0], or one matching no event, gives
    /// `DecodedLog::unmatched()`. Missing topics and short data leave the
    /// affected parameters in `unresolved`. Malformed hex and codec failures
    /// are returned as errors, or recorded per parameter in lenient mode.
    pub fn decode(&self, log: &RawLog) -> Result<DecodedLog, DecodeError> {
        let Some(topic0) = log.event_selector() else {
            debug!("log has no topics, nothing to match");
            return Ok(DecodedLog::unmatched());
        };
        let Some(event) = self.find_event(topic0) else {
            debug!(topic0, "no ABI event matches topics[0]");
            return Ok(DecodedLog::unmatched());
        };
        debug!(event = %event.signature, "matched event");

        let mut out = DecodedLog::matched(MatchedEvent {
            name: event.entry.name.clone(),
            signature: event.signature.clone(),
            selector: event.selector.clone(),
        });
        let split = split_parameters(&event.entry.inputs);

        // Indexed fields → topics[1..]
        for (i, param) in split.indexed.iter().enumerate() {
            let topic_idx = i + 1; // topics[0] is the event selector
            match log.topics.get(topic_idx) {
                Some(topic) => {
                    let result = self.decode_topic(param, topic);
                    self.record(&mut out, param, result)?;
                }
                None => {
                    trace!(param = %param.name, topic_idx, "topic missing");
                    out.unresolved.push(param.name.clone());
                }
            }
        }

        // Non-indexed fields → fixed 32-byte data slots
        if split.non_indexed.is_empty() {
            return Ok(out);
        }
        let data = log.data_hex();
        if let Some(bad) = data.chars().find(|c| !c.is_ascii_hexdigit()) {
            let err = DecodeError::invalid_hex(&log.data, format!("invalid digit '{bad}'"));
            if !self.config.is_lenient() {
                return Err(err);
            }
            warn!(error = %err, "log data is not hex, skipping non-indexed params");
            out.decode_errors.insert(DATA_ERROR_KEY.to_string(), err.to_string());
            out.unresolved
                .extend(split.non_indexed.iter().map(|p| p.name.clone()));
            return Ok(out);
        }

        for (k, param) in split.non_indexed.iter().enumerate() {
            let start = k * SLOT_HEX_LEN;
            match data.get(start..start + SLOT_HEX_LEN) {
                Some(slot) => {
                    let result = self
                        .codec
                        .decode_parameter(&param.canonical_type(), &format!("0x{slot}"));
                    self.record(&mut out, param, result)?;
                }
                None => {
                    trace!(param = %param.name, slot = k, "data slot missing or truncated");
                    out.unresolved.push(param.name.clone());
                }
            }
        }

        Ok(out)
    }

    /// `uint256` topics are converted exactly by the core; the rest go to the codec.
    fn decode_topic(&self, param: &AbiParameter, topic: &str) -> Result<DecodedValue, DecodeError> {
        if is_uint256(&param.ty) {
            decode_uint256_hex(topic).map(DecodedValue::from)
        } else {
            self.codec.decode_parameter(&param.canonical_type(), topic)
        }
    }

    /// Store a decoded value, or handle its failure according to the mode.
    /// A repeated name keeps its first position and takes the newer value.
    fn record(
        &self,
        out: &mut DecodedLog,
        param: &AbiParameter,
        result: Result<DecodedValue, DecodeError>,
    ) -> Result<(), DecodeError> {
        match result {
            Ok(value) => {
                trace!(param = %param.name, value = %value, "decoded");
                out.fields.insert(param.name.clone(), value);
                Ok(())
            }
            Err(e) if self.config.is_lenient() => {
                warn!(param = %param.name, error = %e, "parameter failed to decode");
                out.decode_errors.insert(param.name.clone(), e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// `uint` is the ABI alias of `uint256`.
fn is_uint256(ty: &str) -> bool {
    matches!(ty, "uint256" | "uint")
}
