//! OpenAI (`api.openai.com/v1`).

use serde_json::Value;

use metadesc_core::{ApiResult, ModelDescriptor};

use super::{chat_completion_body, error_message_at, parse_choice_content, require_array, str_field};
use crate::gateway::Endpoint;
use crate::registry::{ProviderCredentials, ProviderIdentity};
use crate::traits::Provider;

pub static IDENTITY: ProviderIdentity = ProviderIdentity {
    name: "openai",
    title: "OpenAI",
    api_base: "https://api.openai.com/v1/",
    default_model: "gpt-4o-mini",
    key_acquisition_url: "https://platform.openai.com/api-keys",
};

pub const MAX_TOKENS: u32 = 70;
pub const TEMPERATURE: f64 = 0.6;

/// Only chat models with these id prefixes are offered.
const CHAT_MODEL_PREFIXES: &[&str] = &["gpt-3.5", "gpt-4"];

pub struct OpenAiProvider {
    credentials: ProviderCredentials,
}

impl OpenAiProvider {
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self { credentials }
    }
}

impl Provider for OpenAiProvider {
    fn identity(&self) -> &'static ProviderIdentity {
        &IDENTITY
    }

    fn credentials(&self) -> &ProviderCredentials {
        &self.credentials
    }

    fn summary_endpoint(&self, _model: &str) -> Endpoint {
        Endpoint::new(self.api_base(), "chat/completions")
    }

    fn build_summary_request_body(&self, prompt: &str, model: &str) -> Value {
        chat_completion_body(model, prompt, MAX_TOKENS, TEMPERATURE)
    }

    fn parse_model_list(&self, json: &Value) -> ApiResult<Vec<ModelDescriptor>> {
        let entries = require_array(json, "data", IDENTITY.title)?;

        Ok(entries
            .iter()
            .filter_map(|entry| str_field(entry, "id"))
            .filter(|id| CHAT_MODEL_PREFIXES.iter().any(|p| id.starts_with(p)))
            .map(ModelDescriptor::from_id)
            .collect())
    }

    fn parse_summary(&self, json: &Value) -> ApiResult<String> {
        parse_choice_content(json, IDENTITY.title)
    }

    fn extract_error_message(&self, raw_body: &str) -> String {
        error_message_at(raw_body, &["/error/message"])
    }
}
