//! Interop with `alloy-json-abi`: build [`AbiEntry`] lists from a `JsonAbi`.

use alloy_json_abi::{EventParam, JsonAbi, Param};
use abidecode_core::abi::{AbiEntry, AbiParameter};

fn from_param(p: &Param) -> AbiParameter {
    AbiParameter::new(p.name.clone(), p.ty.clone())
        .with_components(p.components.iter().map(from_param).collect())
}

fn from_event_param(p: &EventParam) -> AbiParameter {
    let param = AbiParameter::new(p.name.clone(), p.ty.clone())
        .with_components(p.components.iter().map(from_param).collect());
    if p.indexed {
        param.indexed()
    } else {
        param
    }
}

/// Events, then errors, of a parsed `JsonAbi`.
///
/// `JsonAbi` groups items by name, so the order is alloy's (alphabetical,
/// overloads in declaration order), not the order of the source JSON. Use
/// `abidecode_core::parse_abi_json` when first-match-by-declaration matters.
pub fn entries_from_json_abi(abi: &JsonAbi) -> Vec<AbiEntry> {
    let events = abi.events().map(|e| {
        AbiEntry::event(e.name.clone(), e.inputs.iter().map(from_event_param).collect())
    });
    let errors = abi.errors().map(|e| {
        AbiEntry::error(e.name.clone(), e.inputs.iter().map(from_param).collect())
    });
    events.chain(errors).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use abidecode_core::signature::SignatureCodec;

    const ABI: &str = r#"[
        {"type":"event","name":"Swap","anonymous":false,"inputs":[
            {"name":"sender","type":"address","indexed":true},
            {"name":"recipient","type":"address","indexed":true},
            {"name":"amount0","type":"int256","indexed":false},
            {"name":"amount1","type":"int256","indexed":false},
            {"name":"sqrtPriceX96","type":"uint160","indexed":false},
            {"name":"liquidity","type":"uint128","indexed":false},
            {"name":"tick","type":"int24","indexed":false}
        ]},
        {"type":"event","name":"OrderFilled","anonymous":false,"inputs":[
            {"name":"order","type":"tuple","indexed":false,"components":[
                {"name":"maker","type":"address"},
                {"name":"amount","type":"uint256"}
            ]}
        ]},
        {"type":"error","name":"InsufficientBalance","inputs":[
            {"name":"available","type":"uint256"},
            {"name":"required","type":"uint256"}
        ]}
    ]"#;

    #[test]
    fn selectors_agree_with_alloy() {
        let json_abi: JsonAbi = serde_json::from_str(ABI).unwrap();
        let entries = entries_from_json_abi(&json_abi);
        assert_eq!(entries.len(), 3);

        let codec = SignatureCodec::new();
        for event in json_abi.events() {
            let entry = entries
                .iter()
                .find(|e| e.is_event() && e.name == event.name)
                .unwrap();
            assert_eq!(codec.signature_of(entry), event.signature());
            assert_eq!(
                codec.selector_of(entry).as_hex(),
                format!("{:#x}", event.selector())
            );
        }
        for error in json_abi.errors() {
            let entry = entries
                .iter()
                .find(|e| e.is_error() && e.name == error.name)
                .unwrap();
            assert_eq!(codec.signature_of(entry), error.signature());
            assert_eq!(
                codec.selector_of(entry).as_hex(),
                format!("{:#x}", error.selector())
            );
        }
    }

    #[test]
    fn indexed_flags_survive() {
        let json_abi: JsonAbi = serde_json::from_str(ABI).unwrap();
        let entries = entries_from_json_abi(&json_abi);
        let swap = entries.iter().find(|e| e.name == "Swap").unwrap();
        let indexed: Vec<_> = swap.inputs.iter().filter(|p| p.indexed).map(|p| &p.name).collect();
        assert_eq!(indexed, ["sender", "recipient"]);
    }
}
