//! Provider registry: static identities for the five supported vendors and
//! the name → provider mapping built at startup.
//!
//! Registration is explicit: [`BUILTIN_PROVIDERS`] is a fixed constructor
//! table, and [`ProviderRegistry::from_config`] walks it once.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use metadesc_core::config::{ProviderConfig, ProvidersConfig};

use crate::providers::{anthropic, cohere, gemini, mistral, openai};
use crate::providers::{
    AnthropicProvider, CohereProvider, GeminiProvider, MistralProvider, OpenAiProvider,
};
use crate::traits::Provider;

// ─────────────────────────────────────────────
// ProviderIdentity: static metadata for one provider
// ─────────────────────────────────────────────

/// Immutable per-provider constants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderIdentity {
    /// Unique lowercase key (e.g. `"gemini"`).
    pub name: &'static str,
    /// Display name (e.g. `"Google Gemini"`).
    pub title: &'static str,
    /// Default API base URL.
    pub api_base: &'static str,
    /// Model used when none is selected.
    pub default_model: &'static str,
    /// Where users create an API key.
    pub key_acquisition_url: &'static str,
}

/// All supported provider identities, in registration order.
pub static PROVIDERS: &[&ProviderIdentity] = &[
    &gemini::IDENTITY,
    &mistral::IDENTITY,
    &openai::IDENTITY,
    &anthropic::IDENTITY,
    &cohere::IDENTITY,
];

// ─────────────────────────────────────────────
// ProviderCredentials
// ─────────────────────────────────────────────

/// Runtime settings owned by one provider instance.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub api_key: String,
    /// Selected model; empty means the provider default.
    pub model: String,
    /// Base URL override (proxies, tests).
    pub api_base: Option<String>,
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl ProviderCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl From<&ProviderConfig> for ProviderCredentials {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_base: config.api_base.clone().filter(|b| !b.is_empty()),
        }
    }
}

// ─────────────────────────────────────────────
// Built-in constructor table
// ─────────────────────────────────────────────

/// Builds one provider from its credentials.
pub type ProviderConstructor = fn(ProviderCredentials) -> Arc<dyn Provider>;

fn new_gemini(credentials: ProviderCredentials) -> Arc<dyn Provider> {
    Arc::new(GeminiProvider::new(credentials))
}

fn new_mistral(credentials: ProviderCredentials) -> Arc<dyn Provider> {
    Arc::new(MistralProvider::new(credentials))
}

fn new_openai(credentials: ProviderCredentials) -> Arc<dyn Provider> {
    Arc::new(OpenAiProvider::new(credentials))
}

fn new_anthropic(credentials: ProviderCredentials) -> Arc<dyn Provider> {
    Arc::new(AnthropicProvider::new(credentials))
}

fn new_cohere(credentials: ProviderCredentials) -> Arc<dyn Provider> {
    Arc::new(CohereProvider::new(credentials))
}

/// Every known provider, keyed by name, in registration order.
pub static BUILTIN_PROVIDERS: &[(&str, ProviderConstructor)] = &[
    ("gemini", new_gemini),
    ("mistral", new_mistral),
    ("openai", new_openai),
    ("anthropic", new_anthropic),
    ("cohere", new_cohere),
];

// ─────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────

/// Name → provider mapping, iterated in insertion order.
///
/// Built once and handed to the facade; it is never mutated while calls
/// are in flight.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn Provider>>,
    index: HashMap<String, usize>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every built-in provider with its settings from `config`.
    pub fn from_config(config: &ProvidersConfig) -> Self {
        let mut registry = Self::new();
        for (name, constructor) in BUILTIN_PROVIDERS {
            let credentials = config
                .get_by_name(name)
                .map(ProviderCredentials::from)
                .unwrap_or_default();
            registry.register(constructor(credentials));
        }
        registry
    }

    /// Register a provider under its `name()`.
    ///
    /// A duplicate name replaces the earlier provider but keeps its position.
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        let name = provider.name().to_string();
        match self.index.get(&name) {
            Some(&pos) => {
                warn!(provider = %name, "replacing already registered provider");
                self.providers[pos] = provider;
            }
            None => {
                info!(provider = %name, "registered provider");
                self.index.insert(name, self.providers.len());
                self.providers.push(provider);
            }
        }
    }

    /// Look up a provider by name.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.index
            .get(name)
            .map(|&pos| Arc::clone(&self.providers[pos]))
    }

    /// All providers in insertion order.
    pub fn all(&self) -> Vec<Arc<dyn Provider>> {
        self.providers.clone()
    }

    /// Names of all registered providers, in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Check if a provider is registered.
    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
