//! LLM handler: maps chat commands to summary provider calls.
//!
//! Lifecycle: [`LlmHandler::initialize`] reads the `llm` bot config from the
//! host and builds the provider once. The returned handler is ready; each
//! message passed to [`LlmHandler::handle_message`] is handled on its own,
//! with no state carried between messages.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use recapbot_core::types::{ChatMessage, MessageQuery};
use recapbot_core::utils::redacted_keys;
use recapbot_providers::registry::{self, find_by_name, supported_names};
use recapbot_providers::SummaryProvider;
use recapbot_zulip::{BotHost, HostKind};

use crate::command::Command;
use crate::error::{StartupError, SummarizeError};
use crate::transcript::build_transcript;

/// Config section this bot reads.
pub const BOT_NAME: &str = "llm";

/// Messages fetched per summary.
pub const HISTORY_LIMIT: u32 = 20;

/// Reply to `help` and to empty input.
pub const USAGE: &str = "\
A basic LLM conversational bot.

Commands:
* `help`: show this message
* `summarize`: summarize the last 20 messages of this topic
* `summarize <topic>`: summarize the last 20 messages of `<topic>` in this stream
* `config`: show the active summary provider";

// ─────────────────────────────────────────────
// LlmHandler
// ─────────────────────────────────────────────

/// A ready handler. Owns the provider chosen at startup.
pub struct LlmHandler {
    provider_name: String,
    provider: Box<dyn SummaryProvider>,
}

impl std::fmt::Debug for LlmHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmHandler")
            .field("provider", &self.provider_name)
            .finish()
    }
}

impl LlmHandler {
    /// Bring the handler up from the host's `llm` config.
    ///
    /// Fails if the host is not an external one, if `default_llm_provider`
    /// names an unregistered provider, or if the provider rejects the config.
    pub fn initialize(host: &dyn BotHost) -> Result<Self, StartupError> {
        if host.kind() != HostKind::External {
            return Err(StartupError::UnsupportedHost);
        }

        let config = host
            .get_config_info(BOT_NAME)
            .map_err(|e| StartupError::Config(format!("{e:#}")))?;
        let provider_name = registry::selected_name(&config).to_string();

        info!(
            provider = %provider_name,
            keys = ?redacted_keys(&config),
            "Loaded config"
        );

        let spec = find_by_name(&provider_name).ok_or_else(|| StartupError::UnknownProvider {
            name: provider_name.clone(),
            supported: supported_names().join(", "),
        })?;
        let provider = spec.build(&config)?;

        info!(provider = spec.display_name, "LLM handler ready");
        Ok(Self::with_provider(provider_name, provider))
    }

    /// A handler around an already-initialized provider.
    pub fn with_provider(name: impl Into<String>, provider: Box<dyn SummaryProvider>) -> Self {
        Self {
            provider_name: name.into(),
            provider,
        }
    }

    /// Registry name of the active provider.
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn usage(&self) -> &'static str {
        USAGE
    }

    /// Handle one inbound message and send exactly one reply.
    ///
    /// Only a failure to deliver the reply is returned as `Err`; every
    /// other failure is reported in the reply text.
    pub async fn handle_message(&self, message: &ChatMessage, host: &dyn BotHost) -> Result<()> {
        let reply = self.respond(message, host).await;
        host.send_reply(message, &reply)
            .await
            .context("failed to send reply")
    }

    /// Compute the reply text for one inbound message.
    pub async fn respond(&self, message: &ChatMessage, host: &dyn BotHost) -> String {
        let command = Command::parse(&message.content);
        debug!(?command, message_id = message.id, "dispatching command");

        match command {
            Command::Help => self.usage().to_string(),
            Command::Summarize { topic } => {
                let Some(stream_id) = message.stream_id else {
                    return "Summaries are only available in streams.".to_string();
                };
                let topic = topic.unwrap_or_else(|| message.subject.clone());
                match self.handle_summarization(stream_id, &topic, host).await {
                    Ok(summary) => summary,
                    Err(e) => {
                        warn!(error = %e, stream_id, topic = %topic, "summarize failed");
                        e.to_string()
                    }
                }
            }
            Command::Config => format!(
                "Active provider: `{}` ({}). Change `default_llm_provider` in the `{}` bot config and restart to switch.",
                self.provider_name,
                self.provider.display_name(),
                BOT_NAME,
            ),
            Command::Unknown(word) => {
                format!("Unknown command `{word}`. Send `help` for the list of commands.")
            }
        }
    }

    /// Fetch the recent history of `(stream_id, topic)` and summarize it.
    async fn handle_summarization(
        &self,
        stream_id: u64,
        topic: &str,
        host: &dyn BotHost,
    ) -> Result<String, SummarizeError> {
        let query = MessageQuery::recent_in_topic(stream_id, topic, HISTORY_LIMIT);
        let history = host
            .client()
            .get_messages(&query)
            .await
            .map_err(SummarizeError::Fetch)?;

        if history.messages.is_empty() {
            return Ok(format!("No messages found in topic `{topic}`."));
        }

        let transcript = build_transcript(&history.messages);
        debug!(
            provider = self.provider.display_name(),
            messages = history.messages.len(),
            chars = transcript.len(),
            "summarizing transcript"
        );

        Ok(self.provider.summarize(&transcript).await?)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
