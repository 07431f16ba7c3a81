//! Tracing / logging initialisation helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// Level used when none is configured or the configured one is invalid.
const FALLBACK_LEVEL: &str = "warn";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: crate name → level, e.g. `abidecode-evm = "trace"`
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    FALLBACK_LEVEL.to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Raise the global level by `verbosity` steps above the configured one
    /// (`-v` → info, `-vv` → debug, `-vvv` → trace when starting from warn).
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
        if verbosity == 0 {
            return self;
        }
        let current = LEVELS
            .iter()
            .position(|l| l.eq_ignore_ascii_case(&self.level))
            .unwrap_or(1);
        let raised = (current + verbosity as usize).min(LEVELS.len() - 1);
        self.level = LEVELS[raised].to_string();
        self
    }

    /// The `EnvFilter` directive string, e.g. `"warn,abidecode_evm=trace"`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }
}

/// Initialise tracing with the given log config.
///
/// `RUST_LOG`, when set, takes precedence over the configured directives.
/// Call once at startup; a second call returns an error instead of
/// replacing the installed subscriber.
pub fn init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    let directives = config.directives();
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(env) => (env, None),
        Err(_) => match EnvFilter::try_new(&directives) {
            Ok(f) => (f, None),
            Err(e) => (EnvFilter::new(FALLBACK_LEVEL), Some(e)),
        },
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    if let Some(e) = rejected {
        tracing::warn!(%directives, fallback = FALLBACK_LEVEL, error = %e, "invalid log directives");
    }
    Ok(())
}
