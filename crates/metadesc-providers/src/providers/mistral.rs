//! Mistral (`api.mistral.ai/v1`): OpenAI-compatible chat completions.

use serde_json::Value;

use metadesc_core::{ApiResult, ModelDescriptor};

use super::{chat_completion_body, error_message_at, parse_choice_content, require_array, str_field};
use crate::gateway::Endpoint;
use crate::registry::{ProviderCredentials, ProviderIdentity};
use crate::traits::Provider;

pub static IDENTITY: ProviderIdentity = ProviderIdentity {
    name: "mistral",
    title: "Mistral",
    api_base: "https://api.mistral.ai/v1/",
    default_model: "mistral-small-latest",
    key_acquisition_url: "https://console.mistral.ai/api-keys/",
};

pub const MAX_TOKENS: u32 = 70;
pub const TEMPERATURE: f64 = 0.6;

pub struct MistralProvider {
    credentials: ProviderCredentials,
}

impl MistralProvider {
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self { credentials }
    }
}

impl Provider for MistralProvider {
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

    /// Embedding / moderation models report `capabilities.completion_chat: false`
    /// and are skipped. Entries without capabilities are kept.
    fn parse_model_list(&self, json: &Value) -> ApiResult<Vec<ModelDescriptor>> {
        let entries = require_array(json, "data", IDENTITY.title)?;

        Ok(entries
            .iter()
            .filter(|entry| {
                entry
                    .pointer("/capabilities/completion_chat")
                    .and_then(Value::as_bool)
                    != Some(false)
            })
            .filter_map(|entry| {
                let id = str_field(entry, "id")?;
                let display_name = str_field(entry, "name").unwrap_or(id);
                Some(ModelDescriptor::new(id, display_name))
            })
            .collect())
    }

    fn parse_summary(&self, json: &Value) -> ApiResult<String> {
        parse_choice_content(json, IDENTITY.title)
    }

    fn extract_error_message(&self, raw_body: &str) -> String {
        error_message_at(raw_body, &["/error/message", "/message", "/detail"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> MistralProvider {
        MistralProvider::new(ProviderCredentials::new("ms-key"))
    }

    #[test]
    fn test_endpoints() {
        let p = provider();
        assert_eq!(p.models_endpoint().url().unwrap(), "https://api.mistral.ai/v1/models");
        assert_eq!(
            p.summary_endpoint("mistral-small-latest").url().unwrap(),
            "https://api.mistral.ai/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_uses_selected_model() {
        let body = provider().build_summary_request_body("text", "open-mistral-nemo");
        assert_eq!(body["model"], "open-mistral-nemo");
        assert_eq!(body["max_tokens"], MAX_TOKENS);
        assert_eq!(body["messages"][0]["content"], "text");
    }

    #[test]
    fn test_model_list() {
        let json = json!({
            "object": "list",
            "data": [
                {
                    "id": "mistral-large-latest",
                    "name": "mistral-large-2411",
                    "capabilities": {"completion_chat": true}
                },
                {
                    "id": "mistral-embed",
                    "name": "mistral-embed",
                    "capabilities": {"completion_chat": false}
                },
                {"id": "open-mistral-nemo", "name": null}
            ]
        });
        let models = provider().parse_model_list(&json).unwrap();
        assert_eq!(
            models,
            vec![
                ModelDescriptor::new("mistral-large-latest", "mistral-large-2411"),
                ModelDescriptor::from_id("open-mistral-nemo"),
            ]
        );
    }

    #[test]
    fn test_model_list_missing_key() {
        let err = provider().parse_model_list(&json!({"object": "list"})).unwrap_err();
        assert_eq!(err.code(), "parse_error");
    }

    #[test]
    fn test_parse_summary() {
        let json = json!({"choices": [{"index": 0, "message": {"role": "assistant", "content": "Short.\n"}}]});
        assert_eq!(provider().parse_summary(&json).unwrap(), "Short.");
        assert_eq!(
            provider().parse_summary(&json!({"choices": []})).unwrap_err().code(),
            "parse_error"
        );
    }

    #[test]
    fn test_extract_error_message_variants() {
        let p = provider();
        assert_eq!(
            p.extract_error_message(r#"{"message": "Unauthorized", "request_id": "x"}"#),
            "Unauthorized"
        );
        assert_eq!(
            p.extract_error_message(r#"{"object": "error", "detail": "Invalid model"}"#),
            "Invalid model"
        );
        // Validation errors put an array in `detail`; nothing usable
        assert_eq!(p.extract_error_message(r#"{"detail": [{"loc": ["body"]}]}"#), "");
    }
}
