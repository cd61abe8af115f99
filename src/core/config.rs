//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.legion/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::inference::exchange::{DEFAULT_MODEL, SYSTEM_INSTRUCTION};
use crate::inference::providers::gemini::DEFAULT_GEMINI_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LegionConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_model: Option<String>,
    pub system_instruction: Option<String>,
    pub system_instruction_file: Option<String>,
    /// Seconds to wait for a reply; 0 waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model_name: String,
    pub system_instruction: String,
    pub request_timeout: Option<Duration>,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
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

/// Returns the `~/.legion` directory.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".legion"))
}

/// Returns the path to `~/.legion/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.legion/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LegionConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LegionConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LegionConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LegionConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LegionConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LegionConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // The API key stays out of the log
    debug!(
        "Config: model={:?}, timeout={:?}, base_url={:?}, api_key set={}",
        config.general.default_model,
        config.general.request_timeout_secs,
        config.gemini.base_url,
        config.gemini.api_key.is_some()
    );
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Electronic Legion Hub Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_model = "gemini-3-flash-preview"   # Or set LEGION_MODEL
# system_instruction = "You are an expert Analog Circuit Design Engineer..."
# system_instruction_file = "instruction.md" # Path relative to ~/.legion/
# request_timeout_secs = 120                 # 0 waits indefinitely

# [gemini]
# api_key = "AIza..."                        # Or set GEMINI_API_KEY / API_KEY
# base_url = "https://generativelanguage.googleapis.com/v1beta"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_model` is from the `--model` flag (None = not specified).
pub fn resolve(config: &LegionConfig, cli_model: Option<&str>) -> ResolvedConfig {
    resolve_with(config, cli_model, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with(
    config: &LegionConfig,
    cli_model: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    // Model: CLI → env → config → default
    let model_name = cli_model
        .map(|s| s.to_string())
        .or_else(|| non_empty("LEGION_MODEL"))
        .or_else(|| config.general.default_model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // API key: env (GEMINI_API_KEY, then API_KEY) → config
    let gemini_api_key = non_empty("GEMINI_API_KEY")
        .or_else(|| non_empty("API_KEY"))
        .or_else(|| config.gemini.api_key.clone());

    // Base URL: env → config → default
    let gemini_base_url = non_empty("GEMINI_BASE_URL")
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    let timeout_secs = config
        .general
        .request_timeout_secs
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

    ResolvedConfig {
        model_name,
        system_instruction: resolve_system_instruction(config, config_dir().as_deref()),
        request_timeout,
        gemini_api_key,
        gemini_base_url,
    }
}

/// Resolves the system instruction: inline wins over file, both win over default.
/// `base_dir` is where a relative `system_instruction_file` is looked up.
fn resolve_system_instruction(config: &LegionConfig, base_dir: Option<&Path>) -> String {
    if let Some(ref instruction) = config.general.system_instruction {
        return instruction.clone();
    }

    if let Some(ref file) = config.general.system_instruction_file {
        let instruction_path = match base_dir {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        };
        match fs::read_to_string(&instruction_path) {
            Ok(contents) => {
                let trimmed = contents.trim().to_string();
                if !trimmed.is_empty() {
                    info!("Loaded system instruction from {}", instruction_path.display());
                    return trimmed;
                }
                warn!("System instruction file is empty: {}", instruction_path.display());
            }
            Err(e) => {
                warn!(
                    "Failed to read system instruction file {}: {}",
                    instruction_path.display(),
                    e
                );
            }
        }
    }

    SYSTEM_INSTRUCTION.to_string()
}
