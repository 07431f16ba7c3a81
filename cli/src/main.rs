//! abidecode CLI: decode EVM event logs and custom errors against an ABI.
//!
//! # Commands
//! ```text
//! abidecode decode-log   --abi <abi.json> --topics <hex>... [--data <hex>] [--lenient]
//! abidecode decode-error --abi <abi.json> --selector <hex> | --data <hex>
//! abidecode selector     --signature <Name(type,...)>
//! abidecode uint256      <hex>
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use abidecode_core::{
    abi::{parse_abi_json, AbiEntry},
    bighex::decode_uint256_hex,
    config::{load_config_file, DecoderConfig},
    log::RawLog,
    signature::SignatureCodec,
};
use abidecode_evm::{ErrorDecoder, LogDecoder};
use abidecode_observability::{init_tracing, LogConfig};

#[derive(Parser)]
#[command(
    name = "abidecode",
    about = "Decode EVM event logs and custom errors against a contract ABI",
    long_about = "
abidecode: match EVM logs and revert selectors against a JSON ABI and decode
their parameters. Built on alloy-rs.

ENVIRONMENT VARIABLES:
  RUST_LOG    Log filter directives; overrides --verbose and the config file
",
    version
)]
struct Cli {
    /// Config file (.json, .yaml or .yml) with `decoder` and `log` sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an EVM event log from raw topics + data
    #[command(name = "decode-log")]
    DecodeLog {
        /// Path to the ABI JSON file
        #[arg(long)]
        abi: PathBuf,
        /// topics[0] = event selector, topics[1..] = indexed params
        #[arg(long, num_args = 1..)]
        topics: Vec<String>,
        /// Non-indexed params (hex, 0x-prefixed)
        #[arg(long, default_value = "0x")]
        data: String,
        /// Record per-parameter failures instead of aborting
        #[arg(long)]
        lenient: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a custom error selector, or decode full revert data
    #[command(name = "decode-error")]
    DecodeError {
        /// Path to the ABI JSON file
        #[arg(long)]
        abi: PathBuf,
        /// 4-byte selector, e.g. 0xe450d38c
        #[arg(long, conflicts_with = "data", required_unless_present = "data")]
        selector: Option<String>,
        /// Full revert data: selector followed by ABI-encoded arguments
        #[arg(long)]
        data: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the event and error selectors of a canonical signature
    Selector {
        /// e.g. "Transfer(address,address,uint256)"
        #[arg(long)]
        signature: String,
    },

    /// Print the exact decimal value of a hex uint256
    Uint256 {
        /// Up to 64 hex digits, with or without 0x
        hex: String,
    },
}

/// Contents of the `--config` file.
#[derive(Debug, Default, Deserialize)]
struct CliConfig {
    #[serde(default)]
    decoder: DecoderConfig,
    #[serde(default)]
    log: LogConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: CliConfig = match &cli.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("cannot load config '{}'", path.display()))?,
        None => CliConfig::default(),
    };
    let log = config.log.clone().with_verbosity(cli.verbose);
    init_tracing(&log).context("cannot initialise logging")?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::DecodeLog {
            abi,
            topics,
            data,
            lenient,
            json,
        } => {
            let mut decoder_config = config.decoder;
            if lenient {
                decoder_config = DecoderConfig::lenient();
            }
            cmd_decode_log(&abi, topics, data, decoder_config, json)
        }
        Commands::DecodeError {
            abi,
            selector,
            data,
            json,
        } => cmd_decode_error(&abi, selector.as_deref(), data.as_deref(), json),
        Commands::Selector { signature } => cmd_selector(&signature),
        Commands::Uint256 { hex } => cmd_uint256(&hex),
    }
}

fn load_abi(path: &Path) -> Result<Vec<AbiEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read ABI '{}'", path.display()))?;
    parse_abi_json(&text).with_context(|| format!("invalid ABI '{}'", path.display()))
}

fn cmd_decode_log(
    abi_path: &Path,
    topics: Vec<String>,
    data: String,
    config: DecoderConfig,
    as_json: bool,
) -> Result<()> {
    let abi = load_abi(abi_path)?;
    let decoder = LogDecoder::new(&abi).with_config(config);
    let decoded = decoder
        .decode(&RawLog::new(topics, data))
        .context("log decoding failed")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&decoded)?);
        return Ok(());
    }

    let Some(event) = &decoded.event else {
        println!("No matching event in '{}'", abi_path.display());
        return Ok(());
    };
    println!("Event:     {}", event.name);
    println!("Signature: {}", event.signature);
    println!("Fields:");
    for (name, val) in &decoded.fields {
        println!("  {}: {}", name, val);
    }
    if !decoded.unresolved.is_empty() {
        println!("Unresolved: {}", decoded.unresolved.join(", "));
    }
    if !decoded.decode_errors.is_empty() {
        println!("Errors:");
        for (k, v) in &decoded.decode_errors {
            println!("  {}: {}", k, v);
        }
    }
    Ok(())
}

fn cmd_decode_error(
    abi_path: &Path,
    selector: Option<&str>,
    data: Option<&str>,
    as_json: bool,
) -> Result<()> {
    let decoder = ErrorDecoder::new(&load_abi(abi_path)?);

    if let Some(data) = data {
        let decoded = decoder
            .decode_revert_hex(data)
            .context("revert data decoding failed")?;
        match (decoded, as_json) {
            (decoded, true) => println!("{}", serde_json::to_string_pretty(&decoded)?),
            (Some(err), false) => {
                println!("Error:     {}", err.name);
                println!("Signature: {}", err.signature);
                println!("Decoded:   {}", err);
            }
            (None, false) => println!("No matching error in '{}'", abi_path.display()),
        }
        return Ok(());
    }

    let selector = selector.unwrap_or_default();
    let matched = decoder.decode(selector).context("invalid error selector")?;
    match (matched, as_json) {
        (matched, true) => println!("{}", serde_json::to_string_pretty(&matched)?),
        (Some(m), false) => println!("{} ({})", m.name, m.signature),
        (None, false) => println!("No error with selector {selector} in '{}'", abi_path.display()),
    }
    Ok(())
}

fn cmd_selector(signature: &str) -> Result<()> {
    let signature: String = signature.chars().filter(|c| !c.is_whitespace()).collect();
    anyhow::ensure!(
        signature.contains('(') && signature.ends_with(')'),
        "'{signature}' is not a canonical signature like Name(type1,type2)"
    );
    let codec = SignatureCodec::new();
    println!("Signature: {}", signature);
    println!("Event:     {}", codec.event_selector(&signature));
    println!("Error:     {}", codec.error_selector(&signature));
    Ok(())
}

fn cmd_uint256(hex: &str) -> Result<()> {
    let value = decode_uint256_hex(hex).with_context(|| format!("cannot decode '{hex}'"))?;
    println!("{}", value);
    Ok(())
}
