//! Google Gemini (`generativelanguage.googleapis.com/v1beta`).
//!
//! The API key travels in the `key` query parameter, so the bearer header
//! is dropped.

use reqwest::header::{HeaderMap, AUTHORIZATION};
use serde_json::{json, Value};

use metadesc_core::{ApiError, ApiResult, ModelDescriptor};

use super::{error_message_at, require_array, str_field};
use crate::gateway::Endpoint;
use crate::registry::{ProviderCredentials, ProviderIdentity};
use crate::traits::Provider;

pub static IDENTITY: ProviderIdentity = ProviderIdentity {
    name: "gemini",
    title: "Google Gemini",
    api_base: "https://generativelanguage.googleapis.com/v1beta/",
    default_model: "gemini-1.5-flash",
    key_acquisition_url: "https://aistudio.google.com/app/apikey",
};

/// `generationConfig.maxOutputTokens`.
pub const MAX_OUTPUT_TOKENS: u32 = 40;
/// `generationConfig.temperature`.
pub const TEMPERATURE: f64 = 0.6;

/// Generation method a model must support to be listed.
const GENERATE_CONTENT: &str = "generateContent";
/// Models whose display name starts with this are retired and hidden.
const RETIRED_DISPLAY_PREFIX: &str = "Gemini 1.0";

pub struct GeminiProvider {
    credentials: ProviderCredentials,
}

impl GeminiProvider {
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self { credentials }
    }
}

impl Provider for GeminiProvider {
    fn identity(&self) -> &'static ProviderIdentity {
        &IDENTITY
    }

    fn credentials(&self) -> &ProviderCredentials {
        &self.credentials
    }

    fn models_endpoint(&self) -> Endpoint {
        Endpoint::new(self.api_base(), "models").with_query("key", &self.credentials.api_key)
    }

    fn summary_endpoint(&self, model: &str) -> Endpoint {
        let model = model.trim_start_matches("models/");
        Endpoint::new(self.api_base(), format!("models/{}:{}", model, GENERATE_CONTENT))
            .with_query("key", &self.credentials.api_key)
    }

    fn prepare_headers(&self, headers: &mut HeaderMap) -> ApiResult<()> {
        headers.remove(AUTHORIZATION);
        Ok(())
    }

    fn build_summary_request_body(&self, prompt: &str, _model: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
                "temperature": TEMPERATURE,
            },
        })
    }

    fn parse_model_list(&self, json: &Value) -> ApiResult<Vec<ModelDescriptor>> {
        let entries = require_array(json, "models", IDENTITY.title)?;

        Ok(entries
            .iter()
            .filter(|entry| supports_generate_content(entry))
            .filter_map(|entry| {
                let id = str_field(entry, "name")?.trim_start_matches("models/");
                if id.is_empty() {
                    return None;
                }
                let display_name = str_field(entry, "displayName").unwrap_or(id);
                if display_name.starts_with(RETIRED_DISPLAY_PREFIX) {
                    return None;
                }
                Some(ModelDescriptor::new(id, display_name))
            })
            .collect())
    }

    fn parse_summary(&self, json: &Value) -> ApiResult<String> {
        if let Some(text) = json
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
        {
            return Ok(text.trim().to_string());
        }

        let message = match json
            .pointer("/promptFeedback/blockReason")
            .and_then(Value::as_str)
        {
            Some(reason) => format!("Gemini returned no text (prompt blocked: {})", reason),
            None => "Gemini response has no text at candidates[0].content.parts[0].text".to_string(),
        };
        Err(ApiError::parse(message))
    }

    fn extract_error_message(&self, raw_body: &str) -> String {
        error_message_at(raw_body, &["/error/message"])
    }
}

fn supports_generate_content(entry: &Value) -> bool {
    entry
        .get("supportedGenerationMethods")
        .and_then(Value::as_array)
        .is_some_and(|methods| methods.iter().any(|m| m.as_str() == Some(GENERATE_CONTENT)))
}
