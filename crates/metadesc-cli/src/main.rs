//! Metadesc CLI entry point.
//!
//! # Commands
//!
//! - `metadesc providers` lists built-in providers and key status
//! - `metadesc models <provider>` lists a provider's models as JSON
//! - `metadesc summarize <provider>` generates a meta description as JSON
//! - `metadesc status` shows configuration

mod helpers;
mod status;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use metadesc_core::config::{load_config, Config};
use metadesc_core::types::SummaryResponse;
use metadesc_core::SummaryRequest;
use metadesc_providers::ApiClient;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Generate HTML meta descriptions with AI providers
#[derive(Parser)]
#[command(name = "metadesc", version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.metadesc/config.json)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in providers, their models, and API key status
    Providers,

    /// List the models a provider offers
    Models {
        /// Provider name (gemini, mistral, openai, anthropic, cohere)
        provider: String,
    },

    /// Generate a meta description for page content
    Summarize {
        /// Provider name (gemini, mistral, openai, anthropic, cohere)
        provider: String,

        /// Page content given inline
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,

        /// Read page content from a file
        #[arg(short, long)]
        file: Option<String>,

        /// Model to use for this call only
        #[arg(short, long)]
        model: Option<String>,

        /// Send the content as the prompt, without cleaning or templating
        #[arg(long, default_value_t = false)]
        raw: bool,
    },

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let config_path = cli.config.as_deref().map(helpers::expand_tilde);
    let config = load_config(config_path.as_deref());

    match cli.command {
        Commands::Providers => {
            status::list(&ApiClient::from_config(&config))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Status => {
            status::run(&config, config_path.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Models { provider } => {
            let client = ApiClient::from_config(&config);
            let response = client.list_models_response(&provider).await;
            helpers::print_json(&response)?;
            Ok(exit_code(response.is_error()))
        }
        Commands::Summarize {
            provider,
            content,
            file,
            model,
            raw,
        } => {
            let content = helpers::read_content(content, file.as_deref())?;
            let response = run_summarize(&config, &provider, &content, model, raw).await;
            helpers::print_json(&response)?;
            Ok(exit_code(response.is_error()))
        }
    }
}

// ─────────────────────────────────────────────
// Summarize command
// ─────────────────────────────────────────────

async fn run_summarize(
    config: &Config,
    provider: &str,
    content: &str,
    model: Option<String>,
    raw: bool,
) -> SummaryResponse {
    let client = ApiClient::from_config(config);
    debug!(provider = %provider, raw, model = ?model, "Summarizing content");

    if !raw && model.is_none() {
        return client.summary_response(provider, content).await;
    }
    let request = summary_request(&client, content, model, raw);
    client.summary_response_with(provider, &request).await
}

/// The prompt as sent: templated unless `raw`, with an optional per-call model.
fn summary_request(
    client: &ApiClient,
    content: &str,
    model: Option<String>,
    raw: bool,
) -> SummaryRequest {
    let request = if raw {
        SummaryRequest::new(content)
    } else {
        client.summary_request(content)
    };
    match model {
        Some(model) => request.with_model(model),
        None => request,
    }
}

fn exit_code(is_error: bool) -> ExitCode {
    if is_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// ─────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────

/// Logs go to stderr so stdout carries only JSON.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("metadesc=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_summarize_flags() {
        let cli = Cli::try_parse_from([
            "metadesc",
            "--logs",
            "summarize",
            "openai",
            "--content",
            "<p>Hi</p>",
            "--model",
            "gpt-4o",
            "--raw",
        ])
        .unwrap();
        assert!(cli.logs);
        match cli.command {
            Commands::Summarize {
                provider,
                content,
                file,
                model,
                raw,
            } => {
                assert_eq!(provider, "openai");
                assert_eq!(content.as_deref(), Some("<p>Hi</p>"));
                assert!(file.is_none());
                assert_eq!(model.as_deref(), Some("gpt-4o"));
                assert!(raw);
            }
            _ => panic!("expected summarize"),
        }
    }

    #[test]
    fn content_and_file_conflict() {
        let result = Cli::try_parse_from([
            "metadesc", "summarize", "gemini", "--content", "x", "--file", "page.html",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["metadesc", "models", "cohere", "--config", "/tmp/c.json"])
            .unwrap();
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.json"));
    }

    #[test]
    fn summary_request_raw_keeps_content() {
        let client = ApiClient::from_config(&Config::default());
        let request = summary_request(&client, "<b>as is</b>", None, true);
        assert_eq!(request.prompt, "<b>as is</b>");
        assert!(request.model.is_none());
    }

    #[test]
    fn summary_request_builds_prompt_and_model() {
        let client = ApiClient::from_config(&Config::default());
        let request = summary_request(
            &client,
            "<h1>Title</h1>",
            Some("mistral-large-latest".into()),
            false,
        );
        assert!(request.prompt.contains("Title"));
        assert!(!request.prompt.contains("<h1>"));
        assert_eq!(request.model.as_deref(), Some("mistral-large-latest"));
    }

    #[tokio::test]
    async fn unknown_provider_with_model_is_error_response() {
        let response = run_summarize(
            &Config::default(),
            "nope",
            "text",
            Some("any-model".into()),
            true,
        )
        .await;
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"]["code"], "provider_not_found");
    }

    #[tokio::test]
    async fn unknown_provider_is_error_response() {
        let response = run_summarize(&Config::default(), "nope", "text", None, false).await;
        assert!(response.is_error());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"]["code"], "provider_not_found");
    }
}
