//! Provider trait: the capability set every vendor adapter implements.
//!
//! A provider only describes its vendor: endpoints, header tweaks, request
//! bodies, and response parsing. It never performs I/O itself; the request
//! orchestration in [`crate::client`] drives the hooks and the gateway.

use reqwest::header::HeaderMap;
use serde_json::Value;

use metadesc_core::{ApiResult, ModelDescriptor};

use crate::gateway::Endpoint;
use crate::registry::{ProviderCredentials, ProviderIdentity};

/// One vendor-specific adapter.
pub trait Provider: Send + Sync {
    /// Static metadata (name, title, base URL, default model, key URL).
    fn identity(&self) -> &'static ProviderIdentity;

    /// Runtime API key, selected model, and optional base-URL override.
    fn credentials(&self) -> &ProviderCredentials;

    /// Unique lowercase identifier (e.g. `"gemini"`).
    fn name(&self) -> &str {
        self.identity().name
    }

    /// Human-readable label for UIs and logs.
    fn title(&self) -> &str {
        self.identity().title
    }

    fn default_model(&self) -> &str {
        self.identity().default_model
    }

    /// Where users obtain an API key.
    fn key_acquisition_url(&self) -> &str {
        self.identity().key_acquisition_url
    }

    /// The selected model, or the default when none was configured.
    fn model(&self) -> &str {
        let model = self.credentials().model.as_str();
        if model.is_empty() {
            self.default_model()
        } else {
            model
        }
    }

    /// Base URL: the configured override, else the vendor default.
    fn api_base(&self) -> &str {
        self.credentials()
            .api_base
            .as_deref()
            .unwrap_or(self.identity().api_base)
    }

    /// "List models" endpoint (GET).
    fn models_endpoint(&self) -> Endpoint {
        Endpoint::new(self.api_base(), "models")
    }

    /// Summary endpoint (POST) for `model`.
    fn summary_endpoint(&self, model: &str) -> Endpoint;

    /// Adjust the default header set (`Content-Type` + Bearer auth).
    fn prepare_headers(&self, _headers: &mut HeaderMap) -> ApiResult<()> {
        Ok(())
    }

    /// Vendor-shaped JSON body for a summary request.
    fn build_summary_request_body(&self, prompt: &str, model: &str) -> Value;

    /// Locate, filter, and map the vendor's model array.
    ///
    /// Fails with `parse_error` when the expected array key is missing.
    fn parse_model_list(&self, json: &Value) -> ApiResult<Vec<ModelDescriptor>>;

    /// Extract the generated text, trimmed.
    ///
    /// Fails with `parse_error` when the field is absent, null, or not a string.
    fn parse_summary(&self, json: &Value) -> ApiResult<String>;

    /// Best-effort human-readable message from a failed response body.
    /// Returns an empty string when nothing usable is found.
    fn extract_error_message(&self, raw_body: &str) -> String;
}
