//! Vendor adapters.
//!
//! Helpers here cover the shapes several vendors share: OpenAI-style chat
//! bodies and choices, typed content blocks, and JSON error bodies.

pub mod anthropic;
pub mod cohere;
pub mod gemini;
pub mod mistral;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use cohere::CohereProvider;
pub use gemini::GeminiProvider;
pub use mistral::MistralProvider;
pub use openai::OpenAiProvider;

use serde_json::{json, Value};

use metadesc_core::types::ChatMessage;
use metadesc_core::{ApiError, ApiResult};

/// `{model, messages: [{role: "user", content}], max_tokens, temperature}`.
pub(crate) fn chat_completion_body(
    model: &str,
    prompt: &str,
    max_tokens: u32,
    temperature: f64,
) -> Value {
    json!({
        "model": model,
        "messages": [ChatMessage::user(prompt)],
        "max_tokens": max_tokens,
        "temperature": temperature,
    })
}

/// `choices[0].message.content`, trimmed.
pub(crate) fn parse_choice_content(json: &Value, vendor: &str) -> ApiResult<String> {
    json.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| {
            ApiError::parse(format!(
                "{} response has no text at choices[0].message.content",
                vendor
            ))
        })
}

/// Text of the first `{"type": "text", "text": ...}` block in `blocks`.
pub(crate) fn first_text_block(blocks: Option<&Value>) -> Option<&str> {
    blocks?
        .as_array()?
        .iter()
        .find(|block| block.get("type").and_then(Value::as_str) == Some("text"))?
        .get("text")?
        .as_str()
}

/// The array at `key`, or a `parse_error` naming the vendor and key.
pub(crate) fn require_array<'a>(json: &'a Value, key: &str, vendor: &str) -> ApiResult<&'a Vec<Value>> {
    json.get(key).and_then(Value::as_array).ok_or_else(|| {
        ApiError::parse(format!(
            "{} model list is missing the '{}' array",
            vendor, key
        ))
    })
}

/// Non-empty string field of a JSON object.
pub(crate) fn str_field<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// First non-empty string found at any of `pointers` in a raw JSON body.
pub(crate) fn error_message_at(raw_body: &str, pointers: &[&str]) -> String {
    let Ok(json) = serde_json::from_str::<Value>(raw_body) else {
        return String::new();
    };
    pointers
        .iter()
        .filter_map(|p| json.pointer(p).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_completion_body_shape() {
        let body = chat_completion_body("gpt-4o", "Summarize", 70, 0.6);
        assert_eq!(
            body,
            json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "Summarize"}],
                "max_tokens": 70,
                "temperature": 0.6
            })
        );
    }

    #[test]
    fn test_parse_choice_content_non_string() {
        let err = parse_choice_content(
            &json!({"choices": [{"message": {"content": 42}}]}),
            "OpenAI",
        )
        .unwrap_err();
        assert_eq!(err.code(), "parse_error");
    }

    #[test]
    fn test_first_text_block_skips_other_types() {
        let blocks = json!([
            {"type": "thinking", "thinking": "hmm"},
            {"type": "text", "text": "answer"},
            {"type": "text", "text": "second"}
        ]);
        assert_eq!(first_text_block(Some(&blocks)), Some("answer"));
        assert_eq!(first_text_block(Some(&json!([]))), None);
        assert_eq!(first_text_block(Some(&json!("text"))), None);
        assert_eq!(first_text_block(None), None);
    }

    #[test]
    fn test_require_array() {
        let json = json!({"data": [{"id": "a"}], "models": "nope"});
        assert_eq!(require_array(&json, "data", "X").unwrap().len(), 1);
        let err = require_array(&json, "models", "X").unwrap_err();
        assert_eq!(err.code(), "parse_error");
        assert!(err.to_string().contains("'models'"));
    }

    #[test]
    fn test_str_field() {
        let entry = json!({"id": " gpt-4 ", "name": "", "n": null});
        assert_eq!(str_field(&entry, "id"), Some("gpt-4"));
        assert_eq!(str_field(&entry, "name"), None);
        assert_eq!(str_field(&entry, "n"), None);
        assert_eq!(str_field(&entry, "missing"), None);
    }

    #[test]
    fn test_error_message_at() {
        let raw = r#"{"error": {"message": "  bad key  "}, "message": "other"}"#;
        assert_eq!(error_message_at(raw, &["/error/message", "/message"]), "bad key");
        assert_eq!(error_message_at(raw, &["/nope", "/message"]), "other");
        assert_eq!(error_message_at("not json", &["/message"]), "");
        assert_eq!(error_message_at(r#"{"message": ""}"#, &["/message"]), "");
    }
}
