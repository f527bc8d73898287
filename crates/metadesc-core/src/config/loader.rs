//! Config loader: reads `~/.metadesc/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.metadesc/config.json` (or an explicit path)
//! 3. Environment variables `METADESC_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Provider names that accept env overrides.
const PROVIDER_NAMES: &[&str] = &["gemini", "mistral", "openai", "anthropic", "cohere"];

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path (or `path`) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `METADESC_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `METADESC_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
/// - `METADESC_PROVIDERS__<NAME>__MODEL` → `providers.<name>.model`
/// - `METADESC_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
/// - `METADESC_HTTP__TIMEOUT_SECS` → `http.timeout_secs`
/// - `METADESC_SUMMARY__MAX_CONTENT_CHARS` → `summary.max_content_chars`
fn apply_env_overrides(mut config: Config) -> Config {
    for name in PROVIDER_NAMES {
        if let Some(provider) = config.providers.get_by_name_mut(name) {
            apply_provider_env(provider, &name.to_uppercase());
        }
    }

    if let Ok(val) = std::env::var("METADESC_HTTP__TIMEOUT_SECS") {
        match val.parse::<u64>() {
            Ok(n) if n > 0 => config.http.timeout_secs = n,
            _ => warn!("Ignoring invalid METADESC_HTTP__TIMEOUT_SECS={}", val),
        }
    }
    if let Ok(val) = std::env::var("METADESC_SUMMARY__MAX_CONTENT_CHARS") {
        if let Ok(n) = val.parse::<usize>() {
            config.summary.max_content_chars = n;
        }
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env(provider: &mut ProviderConfig, name: &str) {
    if let Ok(val) = std::env::var(format!("METADESC_PROVIDERS__{name}__API_KEY")) {
        provider.api_key = val;
    }
    if let Ok(val) = std::env::var(format!("METADESC_PROVIDERS__{name}__MODEL")) {
        provider.model = val;
    }
    if let Ok(val) = std::env::var(format!("METADESC_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
