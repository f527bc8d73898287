//! `ApiClient`: the single entry point collaborators use.
//!
//! Resolves providers by name through an explicitly constructed
//! [`ProviderRegistry`] and delegates to the shared request orchestration.

use std::sync::Arc;

use tracing::warn;

use metadesc_core::config::{Config, SummaryConfig};
use metadesc_core::types::{ModelsResponse, SummaryResponse};
use metadesc_core::{ApiError, ApiResult, ModelDescriptor, SummaryRequest};

use crate::client;
use crate::gateway::{Gateway, HttpGateway};
use crate::prompt::build_summary_prompt;
use crate::registry::ProviderRegistry;
use crate::traits::Provider;

/// Facade over the registry and gateway.
///
/// Holds no mutable state, so one instance can serve concurrent calls.
pub struct ApiClient {
    registry: ProviderRegistry,
    gateway: Arc<dyn Gateway>,
    summary: SummaryConfig,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("registry", &self.registry)
            .field("summary", &self.summary)
            .finish()
    }
}

impl ApiClient {
    pub fn new(registry: ProviderRegistry, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            registry,
            gateway,
            summary: SummaryConfig::default(),
        }
    }

    /// Build every built-in provider plus an HTTP gateway from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ProviderRegistry::from_config(&config.providers),
            Arc::new(HttpGateway::from_config(&config.http)),
        )
        .with_summary_config(config.summary.clone())
    }

    /// Replace the prompt settings used by [`ApiClient::generate_summary`].
    pub fn with_summary_config(mut self, summary: SummaryConfig) -> Self {
        self.summary = summary;
        self
    }

    /// All providers in registration order.
    pub fn list_providers(&self) -> Vec<Arc<dyn Provider>> {
        self.registry.all()
    }

    /// Resolve a provider by name (case and surrounding whitespace ignored).
    pub fn provider(&self, provider_name: &str) -> ApiResult<Arc<dyn Provider>> {
        let name = provider_name.trim().to_lowercase();
        self.registry.resolve(&name).ok_or_else(|| {
            warn!(provider = %provider_name, "Unknown provider requested");
            ApiError::ProviderNotFound(provider_name.to_string())
        })
    }

    /// List the models a provider offers.
    pub async fn fetch_models(&self, provider_name: &str) -> ApiResult<Vec<ModelDescriptor>> {
        let provider = self.provider(provider_name)?;
        client::fetch_models(provider.as_ref(), self.gateway.as_ref()).await
    }

    /// Summarize page `content` with a provider.
    ///
    /// The content is cleaned and wrapped in the configured prompt template first.
    pub async fn generate_summary(&self, provider_name: &str, content: &str) -> ApiResult<String> {
        self.generate_summary_with(provider_name, &self.summary_request(content))
            .await
    }

    /// Clean `content` and wrap it in the configured prompt template.
    pub fn summary_request(&self, content: &str) -> SummaryRequest {
        SummaryRequest::new(build_summary_prompt(content, &self.summary))
    }

    /// Send an already-built prompt, optionally with a per-call model.
    pub async fn generate_summary_with(
        &self,
        provider_name: &str,
        request: &SummaryRequest,
    ) -> ApiResult<String> {
        let provider = self.provider(provider_name)?;
        client::generate_summary(provider.as_ref(), self.gateway.as_ref(), request).await
    }

    /// [`ApiClient::fetch_models`] in its `{models}` / `{error}` wire shape.
    pub async fn list_models_response(&self, provider_name: &str) -> ModelsResponse {
        self.fetch_models(provider_name).await.into()
    }

    /// [`ApiClient::generate_summary`] in its `{summary}` / `{error}` wire shape.
    pub async fn summary_response(&self, provider_name: &str, content: &str) -> SummaryResponse {
        self.generate_summary(provider_name, content).await.into()
    }

    /// [`ApiClient::generate_summary_with`] in its `{summary}` / `{error}` wire shape.
    pub async fn summary_response_with(
        &self,
        provider_name: &str,
        request: &SummaryRequest,
    ) -> SummaryResponse {
        self.generate_summary_with(provider_name, request).await.into()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayRequest;
    use async_trait::async_trait;
    use metadesc_core::config::ProvidersConfig;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Gateway that returns a canned response and records every request.
    struct FakeGateway {
        response: ApiResult<Value>,
        calls: AtomicUsize,
        last: Mutex<Option<GatewayRequest>>,
    }

    impl FakeGateway {
        fn new(response: ApiResult<Value>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Gateway for FakeGateway {
        async fn request(&self, request: GatewayRequest) -> ApiResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request);
            self.response.clone()
        }
    }

    fn client_with(gateway: Arc<FakeGateway>) -> ApiClient {
        let mut providers = ProvidersConfig::default();
        providers.openai.api_key = "sk-test".into();
        ApiClient::new(ProviderRegistry::from_config(&providers), gateway)
    }

    #[tokio::test]
    async fn test_unknown_provider_makes_no_http_call() {
        let gateway = FakeGateway::new(Ok(json!({})));
        let client = client_with(gateway.clone());

        let err = client.fetch_models("unknown").await.unwrap_err();
        assert_eq!(err.code(), "provider_not_found");

        let err = client.generate_summary("unknown", "text").await.unwrap_err();
        assert_eq!(err.code(), "provider_not_found");

        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_models_delegates() {
        let gateway = FakeGateway::new(Ok(json!({"data": [{"id": "gpt-4o"}]})));
        let client = client_with(gateway.clone());

        let models = client.fetch_models("openai").await.unwrap();
        assert_eq!(models, vec![ModelDescriptor::from_id("gpt-4o")]);
        assert_eq!(gateway.calls(), 1);

        let last = gateway.last.lock().unwrap().clone().unwrap();
        assert_eq!(last.url, "https://api.openai.com/v1/models");
        assert_eq!(last.method, reqwest::Method::GET);
        assert!(last.body.is_none());
    }

    #[tokio::test]
    async fn test_provider_name_is_normalized() {
        let gateway = FakeGateway::new(Ok(json!({"data": []})));
        let client = client_with(gateway.clone());
        assert!(client.fetch_models("  OpenAI ").await.is_ok());
    }

    #[tokio::test]
    async fn test_generate_summary_builds_prompt() {
        let gateway = FakeGateway::new(Ok(json!({
            "choices": [{"message": {"content": " Great page. "}}]
        })));
        let client = client_with(gateway.clone()).with_summary_config(SummaryConfig {
            max_content_chars: 100,
            prompt_template: "Describe: {content}".to_string(),
        });

        let summary = client
            .generate_summary("openai", "<p>Rust &amp; WebAssembly</p>")
            .await
            .unwrap();
        assert_eq!(summary, "Great page.");

        let last = gateway.last.lock().unwrap().clone().unwrap();
        let body = last.body.unwrap();
        assert_eq!(body["messages"][0]["content"], "Describe: Rust & WebAssembly");
        assert_eq!(body["model"], "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_generate_summary_with_raw_prompt_and_model() {
        let gateway = FakeGateway::new(Ok(json!({
            "choices": [{"message": {"content": "ok"}}]
        })));
        let client = client_with(gateway.clone());

        let request = SummaryRequest::new("<b>kept as-is</b>").with_model("gpt-4-turbo");
        client.generate_summary_with("openai", &request).await.unwrap();

        let body = gateway.last.lock().unwrap().clone().unwrap().body.unwrap();
        assert_eq!(body["messages"][0]["content"], "<b>kept as-is</b>");
        assert_eq!(body["model"], "gpt-4-turbo");
    }

    #[test]
    fn test_summary_request_uses_configured_template() {
        let client = client_with(FakeGateway::new(Ok(json!({})))).with_summary_config(
            SummaryConfig {
                max_content_chars: 100,
                prompt_template: "Meta: {content}".to_string(),
            },
        );
        let request = client.summary_request("<h2>Tea</h2> <p>Green &amp; black</p>");
        assert_eq!(request.prompt, "Meta: Tea Green & black");
        assert!(request.model.is_none());
    }

    #[tokio::test]
    async fn test_failures_leave_client_usable() {
        let failing = FakeGateway::new(Err(ApiError::transport("connection refused")));
        let client = client_with(failing.clone());

        let err = client.fetch_models("openai").await.unwrap_err();
        assert_eq!(err.code(), "http_error");
        let err = client.fetch_models("openai").await.unwrap_err();
        assert_eq!(err.code(), "http_error");
        assert_eq!(client.list_providers().len(), 5);
        assert_eq!(failing.calls(), 2);
    }

    #[tokio::test]
    async fn test_wire_responses() {
        let gateway = FakeGateway::new(Ok(json!({"data": [{"id": "gpt-4"}]})));
        let client = client_with(gateway);

        let ok = serde_json::to_value(client.list_models_response("openai").await).unwrap();
        assert_eq!(ok, json!({"models": [{"id": "gpt-4", "displayName": "gpt-4"}]}));

        let err = serde_json::to_value(client.list_models_response("nope").await).unwrap();
        assert_eq!(err["error"]["code"], "provider_not_found");

        let err = serde_json::to_value(client.summary_response("openai", "x").await).unwrap();
        assert_eq!(err["error"]["code"], "parse_error");
    }

    #[test]
    fn test_list_providers_order() {
        let client = client_with(FakeGateway::new(Ok(json!({}))));
        let names: Vec<String> = client
            .list_providers()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["gemini", "mistral", "openai", "anthropic", "cohere"]);
    }

    #[tokio::test]
    async fn test_from_config_end_to_end() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("Pancakes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "Fluffy pancakes in 10 minutes."}}]
            })))
            .mount(&mock_server)
            .await;

        let mut config = Config::default();
        config.providers.mistral.api_key = "ms-key".into();
        config.providers.mistral.api_base = Some(mock_server.uri());
        config.http.timeout_secs = 5;

        let client = ApiClient::from_config(&config);
        let resp = client
            .summary_response("mistral", "<h1>Pancakes</h1><p>Quick recipe.</p>")
            .await;
        assert_eq!(
            serde_json::to_value(resp).unwrap(),
            json!({"summary": "Fluffy pancakes in 10 minutes."})
        );
    }
}
