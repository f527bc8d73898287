//! `metadesc status` and `metadesc providers`: configuration and provider overview.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use metadesc_core::config::{get_config_path, Config};
use metadesc_providers::ApiClient;

/// Run the status command.
pub fn run(config: &Config, config_path: Option<&Path>) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    println!();
    println!("{}", "Metadesc Status".cyan().bold());
    println!();

    let config_exists = config_path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );
    println!(
        "  {:<18} {}s",
        "Timeout:".bold(),
        config.http.timeout_secs
    );
    println!(
        "  {:<18} {} chars",
        "Content limit:".bold(),
        config.summary.max_content_chars
    );

    println!();
    println!("  {}", "Providers:".bold());
    for (name, status) in key_statuses(config) {
        println!("    {:<20} {}", name, status);
    }
    println!();

    Ok(())
}

/// Run the providers command: one line per registered provider.
pub fn list(client: &ApiClient) -> Result<()> {
    println!();
    println!(
        "  {:<11} {:<11} {:<26} {:<26} {}",
        "NAME".bold(),
        "TITLE".bold(),
        "DEFAULT MODEL".bold(),
        "MODEL".bold(),
        "API KEY".bold()
    );
    for provider in client.list_providers() {
        let key = if provider.credentials().is_configured() {
            "✓ set".green().to_string()
        } else {
            format!("· get one at {}", provider.key_acquisition_url())
                .dimmed()
                .to_string()
        };
        println!(
            "  {:<11} {:<11} {:<26} {:<26} {}",
            provider.name(),
            provider.title(),
            provider.default_model(),
            provider.model(),
            key
        );
    }
    println!();
    Ok(())
}

/// `(title, status)` per provider, in registry order.
fn key_statuses(config: &Config) -> Vec<(&'static str, String)> {
    metadesc_providers::PROVIDERS
        .iter()
        .map(|id| {
            let configured = config
                .providers
                .get_by_name(id.name)
                .is_some_and(|p| p.is_configured());
            let status = if configured {
                format!("{} (key set)", "✓".green())
            } else {
                format!("{}", "· not configured".dimmed())
            };
            (id.title, status)
        })
        .collect()
}
