//! AI provider layer for Metadesc.
//!
//! # Architecture
//!
//! - [`traits::Provider`]: capability set each vendor adapter implements
//! - [`providers`]: Gemini, Mistral, OpenAI, Anthropic, and Cohere adapters
//! - [`gateway`]: the single outbound HTTP choke point
//! - [`client`]: request orchestration shared by all providers
//! - [`registry`]: static identities + the name → provider registry
//! - [`facade::ApiClient`]: entry point for model listing and summaries

pub mod client;
pub mod facade;
pub mod gateway;
pub mod prompt;
pub mod providers;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use facade::ApiClient;
pub use gateway::{Gateway, GatewayRequest, HttpGateway};
pub use prompt::build_summary_prompt;
pub use registry::{ProviderCredentials, ProviderIdentity, ProviderRegistry, PROVIDERS};
pub use traits::Provider;
