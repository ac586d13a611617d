//! `recapbot status`: show configuration and provider status.
//!
//! - Shows config path and Zulip connection settings
//! - Shows the active provider, which keys each provider is missing and
//!   which optional keys are set

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use recapbot_bot::BOT_NAME;
use recapbot_core::config::{get_config_path, load_config, BotConfigMap};
use recapbot_providers::registry::{self, ProviderSpec, PROVIDERS};

/// Run the status command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    println!();
    println!("{}", "📝 Recapbot Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Zulip
    let zulip = &config.zulip;
    let site = if zulip.site.is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        zulip.site.clone()
    };
    println!("  {:<18} {}", "Zulip site:".bold(), site);
    let zulip_status = if zulip.is_configured() {
        format!("{} {}", "✓".green(), zulip.email)
    } else {
        format!("{}", "· not configured".dimmed())
    };
    println!("  {:<18} {}", "Zulip account:".bold(), zulip_status);

    // Providers
    let bot_config = config.bot(BOT_NAME);
    let selected = registry::selected_name(&bot_config);
    println!();
    println!("  {:<18} {}", "Active provider:".bold(), selected);
    if registry::find_by_name(selected).is_none() {
        println!(
            "  {:<18} {} (supported: {})",
            "",
            "✗ unknown provider".red(),
            registry::supported_names().join(", ")
        );
    }

    println!();
    println!("  {}", "Providers:".bold());
    for spec in PROVIDERS {
        let marker = if spec.name == selected { "▸" } else { " " };
        println!(
            "  {} {:<10} {:<22} {}",
            marker,
            spec.name,
            spec.display_name,
            provider_status(spec, &bot_config)
        );
    }

    println!();

    Ok(())
}

/// One-line readiness summary for a provider.
fn provider_status(spec: &ProviderSpec, config: &BotConfigMap) -> String {
    let missing = spec.missing_keys(config);
    let mut status = if missing.is_empty() {
        format!("{}", "✓ ready".green())
    } else {
        format!("{} {}", "· missing".dimmed(), missing.join(", ").dimmed())
    };

    let optional_set = optional_keys_set(spec, config);
    if !optional_set.is_empty() {
        let also = format!("(also set: {})", optional_set.join(", "));
        status.push_str(&format!(" {}", also.dimmed()));
    }
    status
}

/// Optional keys of `spec` that carry a value in `config`.
fn optional_keys_set(spec: &ProviderSpec, config: &BotConfigMap) -> Vec<&'static str> {
    spec.optional_keys
        .iter()
        .copied()
        .filter(|key| config.get(*key).is_some_and(|v| !v.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_provider_always_ready() {
        let spec = registry::find_by_name("debug").unwrap();
        let status = provider_status(spec, &BotConfigMap::new());
        assert!(status.contains("ready"));
    }

    #[test]
    fn vicuna_lists_optional_keys_that_are_set() {
        let spec = registry::find_by_name("vicuna").unwrap();
        let mut config = BotConfigMap::new();
        config.insert("vicuna_api_base".into(), "http://gpu:8000/v1".into());
        config.insert("vicuna_model".into(), "vicuna-13b-v1.5".into());
        config.insert("vicuna_api_key".into(), String::new());

        assert_eq!(optional_keys_set(spec, &config), vec!["vicuna_model"]);
        let status = provider_status(spec, &config);
        assert!(status.contains("ready"));
        assert!(status.contains("also set: vicuna_model"));
    }

    #[test]
    fn openai_reports_missing_key() {
        let spec = registry::find_by_name("openai").unwrap();
        let status = provider_status(spec, &BotConfigMap::new());
        assert!(status.contains("openai_api_key"));
    }
}
