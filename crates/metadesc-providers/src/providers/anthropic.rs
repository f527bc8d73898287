//! Anthropic Messages API (`api.anthropic.com/v1`).
//!
//! Authenticates with `x-api-key` + `anthropic-version` instead of a bearer token.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

use metadesc_core::types::ChatMessage;
use metadesc_core::{ApiError, ApiResult, ModelDescriptor};

use super::{error_message_at, first_text_block, require_array, str_field};
use crate::gateway::{sensitive_value, Endpoint};
use crate::registry::{ProviderCredentials, ProviderIdentity};
use crate::traits::Provider;

pub static IDENTITY: ProviderIdentity = ProviderIdentity {
    name: "anthropic",
    title: "Anthropic",
    api_base: "https://api.anthropic.com/v1/",
    default_model: "claude-3-5-haiku-latest",
    key_acquisition_url: "https://console.anthropic.com/settings/keys",
};

pub const MAX_TOKENS: u32 = 150;
pub const TEMPERATURE: f64 = 0.6;
pub const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    credentials: ProviderCredentials,
}

impl AnthropicProvider {
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self { credentials }
    }
}

impl Provider for AnthropicProvider {
    fn identity(&self) -> &'static ProviderIdentity {
        &IDENTITY
    }

    fn credentials(&self) -> &ProviderCredentials {
        &self.credentials
    }

    fn summary_endpoint(&self, _model: &str) -> Endpoint {
        Endpoint::new(self.api_base(), "messages")
    }

    fn prepare_headers(&self, headers: &mut HeaderMap) -> ApiResult<()> {
        headers.remove(AUTHORIZATION);
        headers.insert(
            HeaderName::from_static("x-api-key"),
            sensitive_value(&self.credentials.api_key)?,
        );
        headers.insert(
            HeaderName::from_static("anthropic-version"),
            HeaderValue::from_static(API_VERSION),
        );
        Ok(())
    }

    fn build_summary_request_body(&self, prompt: &str, model: &str) -> Value {
        json!({
            "model": model,
            "messages": [ChatMessage::user(prompt)],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        })
    }

    fn parse_model_list(&self, json: &Value) -> ApiResult<Vec<ModelDescriptor>> {
        let entries = require_array(json, "data", IDENTITY.title)?;

        Ok(entries
            .iter()
            .filter_map(|entry| {
                let id = str_field(entry, "id")?;
                let display_name = str_field(entry, "display_name").unwrap_or(id);
                Some(ModelDescriptor::new(id, display_name))
            })
            .collect())
    }

    fn parse_summary(&self, json: &Value) -> ApiResult<String> {
        first_text_block(json.get("content"))
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ApiError::parse("Anthropic response has no text content block"))
    }

    fn extract_error_message(&self, raw_body: &str) -> String {
        error_message_at(raw_body, &["/error/message"])
    }
}
