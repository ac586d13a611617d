//! Bot host runtime: what a bot handler can ask of the process running it.
//!
//! A host hands out per-bot configuration, exposes a [`ChatClient`] for
//! history reads, and delivers replies. The handler is written against the
//! [`BotHost`] trait only.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use recapbot_core::config::{BotConfigMap, Config};
use recapbot_core::types::ChatMessage;

use crate::client::{ChatClient, OutgoingMessage, ZulipClient};

/// How the host runs the bot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostKind {
    /// A standalone process talking to the server over the REST API.
    External,
    /// Running inside the chat server itself, without API access.
    Embedded,
}

/// Every bot host implements this trait.
#[async_trait]
pub trait BotHost: Send + Sync {
    fn kind(&self) -> HostKind;

    /// The settings map for `bot_name` (e.g. `"llm"`).
    fn get_config_info(&self, bot_name: &str) -> Result<BotConfigMap>;

    /// Client for history reads.
    fn client(&self) -> &dyn ChatClient;

    /// Reply to `message` in place (same topic, or privately to the sender).
    async fn send_reply(&self, message: &ChatMessage, text: &str) -> Result<()>;
}

// ─────────────────────────────────────────────
// ExternalHost
// ─────────────────────────────────────────────

/// External host that posts replies back to Zulip.
#[derive(Debug)]
pub struct ExternalHost {
    config: Config,
    client: ZulipClient,
}

impl ExternalHost {
    /// Build a host from loaded config. Fails if the Zulip section is incomplete.
    pub fn new(config: Config) -> Result<Self> {
        let client = ZulipClient::new(&config.zulip).context("invalid zulip config")?;
        info!(site = client.site(), "external host ready");
        Ok(Self { config, client })
    }
}

#[async_trait]
impl BotHost for ExternalHost {
    fn kind(&self) -> HostKind {
        HostKind::External
    }

    fn get_config_info(&self, bot_name: &str) -> Result<BotConfigMap> {
        Ok(self.config.bot(bot_name))
    }

    fn client(&self) -> &dyn ChatClient {
        &self.client
    }

    async fn send_reply(&self, message: &ChatMessage, text: &str) -> Result<()> {
        self.client
            .send_message(&OutgoingMessage::reply_to(message, text))
            .await
            .map(|_| ())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use recapbot_core::config::ZulipConfig;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(site: &str) -> Config {
        let mut config = Config {
            zulip: ZulipConfig {
                site: site.to_string(),
                email: "bot@example.com".into(),
                api_key: "k".into(),
            },
            ..Default::default()
        };
        config
            .bots
            .entry("llm".into())
            .or_default()
            .insert("default_llm_provider".into(), "debug".into());
        config
    }

    #[test]
    fn test_new_rejects_missing_zulip_config() {
        assert!(ExternalHost::new(Config::default()).is_err());
    }

    #[test]
    fn test_external_kind_and_config() {
        let host = ExternalHost::new(config("https://z.example.com")).unwrap();
        assert_eq!(host.kind(), HostKind::External);
        let llm = host.get_config_info("llm").unwrap();
        assert_eq!(llm.get("default_llm_provider").unwrap(), "debug");
        assert!(host.get_config_info("other").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_reply_posts_to_same_topic() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/messages"))
            .and(body_string_contains("to=9"))
            .and(body_string_contains("topic=standup"))
            .and(body_string_contains("content=ok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": "success", "msg": "", "id": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let host = ExternalHost::new(config(&server.uri())).unwrap();
        let original = ChatMessage::stream(9, "standup", "Ann", "help");
        host.send_reply(&original, "ok").await.unwrap();
    }
}
