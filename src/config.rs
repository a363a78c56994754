//! Server configuration (spec.md §6/§9 ambient config).

use anyhow::Result;
use serde::Deserialize;

fn default_idle_timeout_secs() -> u64 {
    600
}

fn default_max_line_length() -> usize {
    crate::wire::MAX_LINE_LENGTH
}

/// Log format: human-readable text, or structured JSON.
fn default_log_format() -> String {
    "text".to_string()
}

pub const DEFAULT_LOG_FILTER: &str = "nntpd=info";

/// Top-level server configuration, loaded from a TOML file.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Plain-TCP listen address, e.g. `":119"` or `"0.0.0.0:119"`.
    pub addr: String,
    #[serde(default)]
    pub tls_addr: Option<String>,
    #[serde(default)]
    pub tls_cert: Option<String>,
    #[serde(default)]
    pub tls_key: Option<String>,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `"text"` or `"json"`.
    #[serde(default = "default_log_format")]
    pub format: String,
    /// `tracing_subscriber::EnvFilter` directive; falls back to `RUST_LOG`
    /// or [`DEFAULT_LOG_FILTER`] when unset.
    #[serde(default)]
    pub level: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => anyhow::anyhow!(
                "configuration file not found: '{path}'\n\n\
                 create a configuration file at '{path}', or pass a different path"
            ),
            std::io::ErrorKind::PermissionDenied => anyhow::anyhow!(
                "permission denied reading configuration file: '{path}'"
            ),
            _ => anyhow::anyhow!("failed to read configuration file '{path}': {e}"),
        })?;

        let cfg: Config = toml::from_str(&text).map_err(|e| {
            anyhow::anyhow!("failed to parse configuration file '{path}': {e}")
        })?;

        Ok(cfg)
    }

    /// Sets up `tracing_subscriber` per [`LoggingConfig`]. Call once at
    /// process start.
    pub fn init_logging(&self) {
        let filter = self
            .logging
            .level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        if self.logging.format == "json" {
            builder.json().init();
        } else {
            builder.init();
        }
    }
}
