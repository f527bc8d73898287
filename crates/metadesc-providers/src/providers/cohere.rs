//! Cohere (`api.cohere.ai/v2`).
//!
//! Chat lives on v2; the model list is only served by v1, so the models
//! endpoint is derived from the v1 sibling of the configured base.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde_json::{json, Value};

use metadesc_core::types::ChatMessage;
use metadesc_core::{ApiError, ApiResult, ModelDescriptor};

use super::{error_message_at, first_text_block, require_array, str_field};
use crate::gateway::Endpoint;
use crate::registry::{ProviderCredentials, ProviderIdentity};
use crate::traits::Provider;

pub static IDENTITY: ProviderIdentity = ProviderIdentity {
    name: "cohere",
    title: "Cohere",
    api_base: "https://api.cohere.ai/v2/",
    default_model: "command-r",
    key_acquisition_url: "https://dashboard.cohere.com/api-keys",
};

pub const API_VERSION: &str = "2022-12-06";

/// Endpoint name a model must support to be listed.
const CHAT_ENDPOINT: &str = "chat";

pub struct CohereProvider {
    credentials: ProviderCredentials,
}

impl CohereProvider {
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self { credentials }
    }

    /// `…/v2` → `…/v1`; any other base is used as-is.
    fn models_base(&self) -> String {
        let base = self.api_base().trim_end_matches('/');
        match base.strip_suffix("/v2") {
            Some(root) => format!("{}/v1/", root),
            None => format!("{}/", base),
        }
    }
}

impl Provider for CohereProvider {
    fn identity(&self) -> &'static ProviderIdentity {
        &IDENTITY
    }

    fn credentials(&self) -> &ProviderCredentials {
        &self.credentials
    }

    fn models_endpoint(&self) -> Endpoint {
        Endpoint::new(self.models_base(), "models").with_query("endpoint", CHAT_ENDPOINT)
    }

    fn summary_endpoint(&self, _model: &str) -> Endpoint {
        Endpoint::new(self.api_base(), "chat")
    }

    fn prepare_headers(&self, headers: &mut HeaderMap) -> ApiResult<()> {
        headers.insert(
            HeaderName::from_static("cohere-version"),
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(())
    }

    fn build_summary_request_body(&self, prompt: &str, model: &str) -> Value {
        json!({
            "model": model,
            "messages": [ChatMessage::user(prompt)],
            "stream": false,
        })
    }

    fn parse_model_list(&self, json: &Value) -> ApiResult<Vec<ModelDescriptor>> {
        let entries = require_array(json, "models", IDENTITY.title)?;

        Ok(entries
            .iter()
            .filter(|entry| supports_chat(entry))
            .filter_map(|entry| str_field(entry, "name"))
            .map(ModelDescriptor::from_id)
            .collect())
    }

    fn parse_summary(&self, json: &Value) -> ApiResult<String> {
        first_text_block(json.pointer("/message/content"))
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ApiError::parse("Cohere response has no text in message.content"))
    }

    fn extract_error_message(&self, raw_body: &str) -> String {
        error_message_at(raw_body, &["/message"])
    }
}

/// Entries without an `endpoints` list are kept.
fn supports_chat(entry: &Value) -> bool {
    match entry.get("endpoints").and_then(Value::as_array) {
        Some(endpoints) => endpoints.iter().any(|e| e.as_str() == Some(CHAT_ENDPOINT)),
        None => true,
    }
}
