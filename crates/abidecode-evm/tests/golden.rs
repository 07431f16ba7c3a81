//! Golden fixture integration tests.
//!
//! Each test loads a recorded log or revert payload from `fixtures/evm/`,
//! decodes it against the ABI named in the fixture, and compares the result
//! with the expected values recorded alongside it.

use abidecode_core::{
    abi::{parse_abi_json, AbiEntry},
    config::DecoderConfig,
    log::RawLog,
};
use abidecode_evm::{decode_log, ErrorDecoder, LogDecoder};

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// The fixtures live two levels above the crate root.
fn fixture_path(name: &str) -> std::path::PathBuf {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures/evm");
    p.push(name);
    p
}

fn load_fixture(name: &str) -> serde_json::Value {
    let text = std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {name} not found: {e}"));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("fixture {name} is not JSON: {e}"))
}

fn load_abi(f: &serde_json::Value) -> Vec<AbiEntry> {
    let name = f["abi"].as_str().unwrap();
    let text = std::fs::read_to_string(fixture_path(name)).expect("abi fixture not found");
    parse_abi_json(&text).expect("abi fixture must parse")
}

fn raw_log_from_fixture(f: &serde_json::Value) -> RawLog {
    RawLog::new(
        f["topics"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect(),
        f["data"].as_str().unwrap(),
    )
}

/// `[["name", "value"], ...]` from a fixture, in recorded order.
fn expected_pairs(v: &serde_json::Value) -> Vec<(String, String)> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            (
                pair[0].as_str().unwrap().to_string(),
                pair[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

/// Decode a log fixture and check event, fields (in order) and unresolved params.
fn assert_log_golden(name: &str) {
    let f = load_fixture(name);
    let abi = load_abi(&f);
    let decoded = decode_log(&raw_log_from_fixture(&f), &abi)
        .unwrap_or_else(|e| panic!("{name}: decode failed: {e}"));

    assert_eq!(decoded.event_name(), f["expectedEvent"].as_str(), "{name}: event");
    assert_eq!(
        decoded.event.as_ref().map(|e| e.signature.as_str()),
        f["expectedSignature"].as_str(),
        "{name}: signature"
    );

    let got: Vec<(String, String)> = decoded
        .fields
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect();
    assert_eq!(got, expected_pairs(&f["expectedFields"]), "{name}: fields");

    let unresolved: Vec<&str> = f["expectedUnresolved"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(decoded.unresolved, unresolved, "{name}: unresolved");
    assert!(!decoded.has_errors(), "{name}: unexpected decode errors");
}

// ─── Event logs ───────────────────────────────────────────────────────────────

#[test]
fn erc20_transfer_golden() {
    assert_log_golden("erc20-transfer.json");
}

#[test]
fn erc721_transfer_big_token_id_golden() {
    assert_log_golden("erc721-transfer.json");
}

#[test]
fn uniswap_v3_swap_golden() {
    assert_log_golden("uniswap-v3-swap.json");
}

#[test]
fn short_data_reports_unresolved() {
    assert_log_golden("erc20-transfer-short-data.json");
}

#[test]
fn unknown_event_is_empty() {
    assert_log_golden("unknown-event.json");

    let f = load_fixture("unknown-event.json");
    let decoded = decode_log(&raw_log_from_fixture(&f), &load_abi(&f)).unwrap();
    assert!(!decoded.is_match());
    assert!(decoded.fields.is_empty());
}

#[test]
fn lenient_decoder_matches_strict_on_clean_logs() {
    for name in ["erc20-transfer.json", "uniswap-v3-swap.json"] {
        let f = load_fixture(name);
        let abi = load_abi(&f);
        let log = raw_log_from_fixture(&f);
        let strict = LogDecoder::new(&abi).decode(&log).unwrap();
        let lenient = LogDecoder::new(&abi)
            .with_config(DecoderConfig::lenient())
            .decode(&log)
            .unwrap();
        assert_eq!(strict, lenient, "{name}");
    }
}

#[test]
fn decoder_is_shareable_across_threads() {
    let f = load_fixture("erc20-transfer.json");
    let decoder = std::sync::Arc::new(LogDecoder::new(&load_abi(&f)));
    let log = raw_log_from_fixture(&f);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let decoder = decoder.clone();
            let log = log.clone();
            std::thread::spawn(move || decoder.decode(&log).unwrap())
        })
        .collect();
    for h in handles {
        let decoded = h.join().unwrap();
        assert_eq!(decoded.field("value").and_then(|v| v.as_u128()), Some(1000));
    }
}

// ─── Custom errors ────────────────────────────────────────────────────────────

#[test]
fn erc20_insufficient_balance_golden() {
    let f = load_fixture("erc20-insufficient-balance.json");
    let decoder = ErrorDecoder::new(&load_abi(&f));

    let matched = decoder
        .decode(f["selector"].as_str().unwrap())
        .unwrap()
        .expect("selector should resolve");
    assert_eq!(matched.name, f["expectedError"].as_str().unwrap());
    assert_eq!(matched.signature, f["expectedSignature"].as_str().unwrap());

    let decoded = decoder
        .decode_revert_hex(f["revertData"].as_str().unwrap())
        .unwrap()
        .expect("revert data should resolve");
    let got: Vec<(String, String)> = decoded
        .inputs
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect();
    assert_eq!(got, expected_pairs(&f["expectedInputs"]));
    assert_eq!(decoded.to_string(), f["expectedDisplay"].as_str().unwrap());
}

#[test]
fn error_selector_is_case_insensitive() {
    let f = load_fixture("erc20-insufficient-balance.json");
    let decoder = ErrorDecoder::new(&load_abi(&f));
    let upper = decoder.decode("0xE450D38C").unwrap().unwrap();
    assert_eq!(upper.name, "ERC20InsufficientBalance");
    let bare = decoder.decode("e450d38c").unwrap().unwrap();
    assert_eq!(bare, upper);
}

#[test]
fn function_entries_are_ignored() {
    let f = load_fixture("erc20-transfer.json");
    let abi = load_abi(&f);
    assert_eq!(abi.len(), 4, "the function entry is skipped when parsing");
    assert_eq!(LogDecoder::new(&abi).events().count(), 2);
    assert_eq!(ErrorDecoder::new(&abi).len(), 2);
}
