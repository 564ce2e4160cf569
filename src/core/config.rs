//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.advisor/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub greeting: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/query";

pub const DEFAULT_GREETING: &str = "Hello! I'm your AI Financial Advisor. \
    Ask me about budgeting, saving, investing, or taxes and I'll help you plan your next step.";

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    /// `None` means requests may run indefinitely.
    pub timeout: Option<Duration>,
    pub greeting: String,
}

/// Values that came from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides<'a> {
    pub endpoint: Option<&'a str>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.advisor/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".advisor").join("config.toml"))
}

/// Load config from `~/.advisor/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AdvisorConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AdvisorConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AdvisorConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path (same rules as [`load_config`]).
pub fn load_config_from(path: &Path) -> Result<AdvisorConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AdvisorConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AdvisorConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# AI Financial Advisor Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# greeting = "Hello! How can I help with your finances today?"   # Or ADVISOR_GREETING

# [service]
# endpoint = "http://localhost:8000/query"   # Or ADVISOR_ENDPOINT / --endpoint
# timeout_secs = 60                          # Or ADVISOR_TIMEOUT_SECS / --timeout (unset = wait forever)
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AdvisorConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with(
    config: &AdvisorConfig,
    cli: &CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .map(|s| s.to_string())
        .or_else(|| env("ADVISOR_ENDPOINT"))
        .or_else(|| config.service.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Timeout: CLI → env → config → none. Zero disables it too.
    let timeout_secs = cli
        .timeout_secs
        .or_else(|| {
            env("ADVISOR_TIMEOUT_SECS").and_then(|v| match v.parse() {
                Ok(secs) => Some(secs),
                Err(e) => {
                    warn!("Ignoring ADVISOR_TIMEOUT_SECS={:?}: {}", v, e);
                    None
                }
            })
        })
        .or(config.service.timeout_secs);
    let timeout = timeout_secs
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs);

    // Greeting: env → config → default
    let greeting = env("ADVISOR_GREETING")
        .or_else(|| config.general.greeting.clone())
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GREETING.to_string());

    ResolvedConfig {
        endpoint,
        timeout,
        greeting,
    }
}
