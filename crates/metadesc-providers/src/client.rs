//! Request orchestration shared by every provider.
//!
//! Builds the URL and headers from the provider's hooks, performs one
//! gateway call, enriches failures with the vendor's own error text, and
//! hands successful payloads back to the provider for parsing.

use reqwest::header::HeaderMap;
use tracing::{debug, warn};

use metadesc_core::{ApiError, ApiResult, ModelDescriptor, SummaryRequest};

use crate::gateway::{default_headers, redact_url, Gateway, GatewayRequest};
use crate::traits::Provider;

/// Default headers with the provider's adjustments applied.
pub fn request_headers(provider: &dyn Provider) -> ApiResult<HeaderMap> {
    let mut headers = default_headers(&provider.credentials().api_key)?;
    provider.prepare_headers(&mut headers)?;
    Ok(headers)
}

/// List the models `provider` offers.
pub async fn fetch_models(
    provider: &dyn Provider,
    gateway: &dyn Gateway,
) -> ApiResult<Vec<ModelDescriptor>> {
    let url = provider.models_endpoint().url()?;
    let headers = request_headers(provider)?;

    debug!(provider = provider.name(), url = redact_url(&url), "Fetching models");

    let json = gateway
        .request(GatewayRequest::get(url).with_headers(headers))
        .await
        .map_err(|e| enrich_error(provider, e))?;

    let models = provider.parse_model_list(&json).inspect_err(|e| {
        warn!(provider = provider.name(), error = %e, "Unexpected model list shape");
    })?;

    debug!(provider = provider.name(), count = models.len(), "Models received");
    Ok(models)
}

/// Ask `provider` for a summary of `request.prompt`.
///
/// `request.model` overrides the configured model for this call only.
pub async fn generate_summary(
    provider: &dyn Provider,
    gateway: &dyn Gateway,
    request: &SummaryRequest,
) -> ApiResult<String> {
    let model = request
        .model
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| provider.model());

    let url = provider.summary_endpoint(model).url()?;
    let headers = request_headers(provider)?;
    let body = provider.build_summary_request_body(&request.prompt, model);

    debug!(
        provider = provider.name(),
        model = %model,
        url = redact_url(&url),
        prompt_chars = request.prompt.chars().count(),
        "Requesting summary"
    );

    let json = gateway
        .request(GatewayRequest::post(url, body).with_headers(headers))
        .await
        .map_err(|e| enrich_error(provider, e))?;

    let summary = provider.parse_summary(&json).inspect_err(|e| {
        warn!(provider = provider.name(), error = %e, "Unexpected summary shape");
    })?;

    debug!(provider = provider.name(), chars = summary.chars().count(), "Summary received");
    Ok(summary)
}

/// Prefix HTTP failures with the provider title and, when the vendor sent
/// a readable error body, replace the generic status text with it.
fn enrich_error(provider: &dyn Provider, err: ApiError) -> ApiError {
    let (status, message, body) = match err {
        ApiError::Http {
            status,
            message,
            body,
        } => (status, message, body),
        other => return other,
    };

    let detail = body
        .as_deref()
        .map(|raw| provider.extract_error_message(raw))
        .unwrap_or_default();

    let message = match (status, detail.is_empty()) {
        (Some(code), false) => format!("{} API error ({}): {}", provider.title(), code, detail),
        (Some(_), true) => format!("{} API error: {}", provider.title(), message),
        (None, _) => format!("{} request failed: {}", provider.title(), message),
    };

    warn!(provider = provider.name(), status = ?status, error = %message, "Provider call failed");

    ApiError::Http {
        status,
        message,
        body,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
