//! Core types for Metadesc: model descriptors, summary requests, and the
//! JSON shapes handed back to callers.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

// ─────────────────────────────────────────────
// Models
// ─────────────────────────────────────────────

/// One model offered by a provider.
///
/// Serialized as `{"id": ..., "displayName": ...}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: String,
    pub display_name: String,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// A descriptor whose display name is just its id.
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
        }
    }
}

// ─────────────────────────────────────────────
// Summary requests
// ─────────────────────────────────────────────

/// A single summarization call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryRequest {
    /// Full prompt sent to the model.
    pub prompt: String,
    /// Model to use for this call only. `None` keeps the provider's configured model.
    pub model: Option<String>,
}

impl SummaryRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
        }
    }

    /// Override the model for this request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// A chat message in the `{role, content}` shape shared by the
/// OpenAI, Mistral, Anthropic, and Cohere chat APIs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Wire responses
// ─────────────────────────────────────────────

/// `{"code": ..., "message": ...}`: the failure half of every response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// `{"models": [...]}` or `{"error": {...}}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ModelsResponse {
    Models { models: Vec<ModelDescriptor> },
    Error { error: ErrorBody },
}

impl From<ApiResult<Vec<ModelDescriptor>>> for ModelsResponse {
    fn from(result: ApiResult<Vec<ModelDescriptor>>) -> Self {
        match result {
            Ok(models) => ModelsResponse::Models { models },
            Err(e) => ModelsResponse::Error { error: (&e).into() },
        }
    }
}

/// `{"summary": "..."}` or `{"error": {...}}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SummaryResponse {
    Summary { summary: String },
    Error { error: ErrorBody },
}

impl From<ApiResult<String>> for SummaryResponse {
    fn from(result: ApiResult<String>) -> Self {
        match result {
            Ok(summary) => SummaryResponse::Summary { summary },
            Err(e) => SummaryResponse::Error { error: (&e).into() },
        }
    }
}

impl ModelsResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, ModelsResponse::Error { .. })
    }
}

impl SummaryResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, SummaryResponse::Error { .. })
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
