//! ABI model: the event and error entries the decoders match against.
//!
//! A standard JSON ABI is a loosely typed array of objects. It is parsed once
//! into [`AbiEntry`] values whose [`EntryKind`] is fixed at load time; entries
//! the decoders never look at (functions, constructors, fallbacks) are dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DecodeError;

/// Which kind of ABI entry this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Event,
    Error,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Event => write!(f, "event"),
            EntryKind::Error => write!(f, "error"),
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A single input of an event or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParameter {
    /// Parameter name; may be empty in hand-written ABIs
    #[serde(default)]
    pub name: String,
    /// Solidity type string as declared, e.g. `"address"`, `"uint256"`, `"tuple[]"`
    #[serde(rename = "type")]
    pub ty: String,
    /// Events only: carried in a topic slot instead of the data blob
    #[serde(default, skip_serializing_if = "is_false")]
    pub indexed: bool,
    /// Members of a `tuple` type, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParameter>,
}

impl AbiParameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            indexed: false,
            components: Vec::new(),
        }
    }

    /// Builder-style: mark this parameter as indexed.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Builder-style: attach tuple components.
    pub fn with_components(mut self, components: Vec<AbiParameter>) -> Self {
        self.components = components;
        self
    }

    /// The type as it appears in a canonical signature.
    ///
    /// `tuple`, `tuple[]`, `tuple[3][]` ... expand to `(c1,c2,...)` plus the
    /// array suffix, recursively. Anything else is returned verbatim, so an
    /// unknown type string still yields a well-formed (if meaningless) signature.
    pub fn canonical_type(&self) -> String {
        match self.ty.strip_prefix("tuple") {
            Some(suffix)
                if !self.components.is_empty()
                    && (suffix.is_empty() || suffix.starts_with('[')) =>
            {
                let inner: Vec<String> =
                    self.components.iter().map(|c| c.canonical_type()).collect();
                format!("({}){}", inner.join(","), suffix)
            }
            _ => self.ty.clone(),
        }
    }
}

/// An event or error definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
}

impl AbiEntry {
    pub fn event(name: impl Into<String>, inputs: Vec<AbiParameter>) -> Self {
        Self {
            kind: EntryKind::Event,
            name: name.into(),
            inputs,
        }
    }

    pub fn error(name: impl Into<String>, inputs: Vec<AbiParameter>) -> Self {
        Self {
            kind: EntryKind::Error,
            name: name.into(),
            inputs,
        }
    }

    pub fn is_event(&self) -> bool {
        self.kind == EntryKind::Event
    }

    pub fn is_error(&self) -> bool {
        self.kind == EntryKind::Error
    }

    /// Canonical input types in declaration order.
    pub fn type_names(&self) -> Vec<String> {
        self.inputs.iter().map(AbiParameter::canonical_type).collect()
    }

    /// A copy where every unnamed input is called `arg{position}`.
    pub fn with_positional_names(&self) -> Self {
        let mut entry = self.clone();
        for (i, input) in entry.inputs.iter_mut().enumerate() {
            if input.name.trim().is_empty() {
                input.name = format!("arg{i}");
            }
        }
        entry
    }
}

/// Shape of one element of a JSON ABI array, before filtering.
///
/// `type` may be omitted, in which case the item is a function. Inputs stay
/// raw until the item is known to be an event or error.
#[derive(Deserialize)]
struct RawAbiItem {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: serde_json::Value,
}

impl RawAbiItem {
    fn into_entry(self) -> Result<Option<AbiEntry>, DecodeError> {
        let kind = match self.kind.as_deref() {
            Some("event") => EntryKind::Event,
            Some("error") => EntryKind::Error,
            _ => return Ok(None),
        };
        if self.name.is_empty() {
            return Ok(None);
        }
        let inputs: Vec<AbiParameter> = if self.inputs.is_null() {
            Vec::new()
        } else {
            serde_json::from_value(self.inputs).map_err(|e| DecodeError::InvalidAbi {
                reason: format!("{kind} {}: {e}", self.name),
            })?
        };
        Ok(Some(AbiEntry {
            kind,
            name: self.name,
            inputs,
        }))
    }
}

/// Parse a standard JSON ABI array into its event and error entries.
///
/// Declaration order is kept. Entries of any other type (including items with
/// no `type`, which default to functions), and events or errors without a
/// name, are skipped.
pub fn parse_abi_json(json: &str) -> Result<Vec<AbiEntry>, DecodeError> {
    let items: Vec<RawAbiItem> =
        serde_json::from_str(json).map_err(|e| DecodeError::InvalidAbi {
            reason: e.to_string(),
        })?;

    let mut entries = Vec::new();
    for item in items {
        if let Some(entry) = item.into_entry()? {
            entries.push(entry);
        }
    }
    Ok(entries)
}
