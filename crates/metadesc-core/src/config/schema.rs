//! Configuration schema.
//!
//! Hierarchy: `Config` → `ProvidersConfig`, `HttpConfig`, `SummaryConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration: loaded from `~/.metadesc/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub providers: ProvidersConfig,
    pub http: HttpConfig,
    pub summary: SummaryConfig,
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Settings for a single AI provider (API key, selected model, base URL).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Selected model. Empty means the provider's default model.
    pub model: String,
    /// Custom API base URL (overrides provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// All provider settings, one entry per supported vendor.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub gemini: ProviderConfig,
    pub mistral: ProviderConfig,
    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
    pub cohere: ProviderConfig,
}

impl ProvidersConfig {
    /// Get a provider config by name (e.g. `"anthropic"`).
    pub fn get_by_name(&self, name: &str) -> Option<&ProviderConfig> {
        match name {
            "gemini" => Some(&self.gemini),
            "mistral" => Some(&self.mistral),
            "openai" => Some(&self.openai),
            "anthropic" => Some(&self.anthropic),
            "cohere" => Some(&self.cohere),
            _ => None,
        }
    }

    /// Mutable lookup by name, used by env overrides.
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut ProviderConfig> {
        match name {
            "gemini" => Some(&mut self.gemini),
            "mistral" => Some(&mut self.mistral),
            "openai" => Some(&mut self.openai),
            "anthropic" => Some(&mut self.anthropic),
            "cohere" => Some(&mut self.cohere),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// HTTP
// ─────────────────────────────────────────────

/// Outbound HTTP settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds. Applies to every vendor call.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

// ─────────────────────────────────────────────
// Summary prompt
// ─────────────────────────────────────────────

/// Placeholder replaced with the cleaned page content.
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Default instruction wrapped around page content.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Write a single meta description for the following web page content. \
Keep it under 160 characters, in the same language as the content, with no quotes, \
labels or surrounding commentary.\n\nContent:\n{content}";

/// How page content is turned into a summary prompt.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryConfig {
    /// Content longer than this (in characters, after tag stripping) is truncated.
    pub max_content_chars: usize,
    /// Prompt template; `{content}` is replaced by the cleaned content.
    pub prompt_template: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_content_chars: 4000,
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
