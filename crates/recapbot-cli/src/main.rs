//! Recapbot CLI: entry point.
//!
//! # Commands
//!
//! - `recapbot handle TEXT --stream-id N --topic T`: run one message through the bot
//! - `recapbot repl --stream-id N --topic T`: interactive session with console replies
//! - `recapbot status`: show configuration and provider status
//! - `recapbot onboard`: write a starter config

mod console_host;
mod helpers;
mod onboard;
mod repl;
mod status;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use recapbot_bot::LlmHandler;
use recapbot_core::config::load_config;
use recapbot_core::types::ChatMessage;
use recapbot_zulip::{BotHost, ExternalHost};

use crate::console_host::ConsoleHost;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 📝 Recapbot: LLM topic summaries for Zulip
#[derive(Parser)]
#[command(name = "recapbot", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.recapbot/config.json)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle a single message addressed to the bot
    Handle {
        /// Message text, e.g. "summarize" or "help"
        text: String,

        /// Stream the message was posted in
        #[arg(long)]
        stream_id: u64,

        /// Topic the message was posted under
        #[arg(long)]
        topic: String,

        /// Display name of the sender
        #[arg(long, default_value = "cli")]
        sender: String,

        /// Print the reply instead of posting it to Zulip
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Interactive session; replies are printed, not posted
    Repl {
        /// Stream to read history from
        #[arg(long)]
        stream_id: u64,

        /// Topic to read history from
        #[arg(long)]
        topic: String,

        /// Display name of the sender
        #[arg(long, default_value = "cli")]
        sender: String,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status,

    /// Write a starter configuration
    Onboard,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref().map(helpers::expand_tilde);

    match cli.command {
        Commands::Handle {
            text,
            stream_id,
            topic,
            sender,
            dry_run,
            logs,
        } => {
            init_logging(logs);
            let message = ChatMessage::stream(stream_id, topic, sender, text);
            run_handle(config_path.as_deref(), &message, dry_run).await
        }
        Commands::Repl {
            stream_id,
            topic,
            sender,
            logs,
        } => {
            init_logging(logs);
            let config = load_config(config_path.as_deref());
            let host = ConsoleHost::new(config);
            let handler = start_handler(&host)?;
            repl::run(&handler, &host, stream_id, &topic, &sender).await
        }
        Commands::Status => status::run(config_path.as_deref()),
        Commands::Onboard => onboard::run(config_path),
    }
}

// ─────────────────────────────────────────────
// Handle command
// ─────────────────────────────────────────────

async fn run_handle(config_path: Option<&Path>, message: &ChatMessage, dry_run: bool) -> Result<()> {
    let config = load_config(config_path);

    if dry_run {
        let host = ConsoleHost::new(config);
        let handler = start_handler(&host)?;
        handler.handle_message(message, &host).await
    } else {
        let host = ExternalHost::new(config)?;
        let handler = start_handler(&host)?;
        handler
            .handle_message(message, &host)
            .await
            .context("failed to deliver reply")?;
        println!("  {} reply posted to topic \"{}\"", "✓".green(), message.subject);
        Ok(())
    }
}

/// Resolve the configured provider for the `llm` bot on `host`.
fn start_handler(host: &dyn BotHost) -> Result<LlmHandler> {
    let handler = LlmHandler::initialize(host).context("failed to start the llm bot")?;
    info!(provider = handler.provider_name(), "llm bot ready");
    Ok(handler)
}

/// Initialize tracing/logging. `RUST_LOG` wins when set.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(
                "recapbot_core=debug,recapbot_providers=debug,recapbot_zulip=debug,recapbot_bot=debug,info",
            )
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
