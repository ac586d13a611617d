//! Console host: reads history from Zulip, prints replies to the terminal.
//!
//! Used by `recapbot repl` and `recapbot handle --dry-run`. Without a Zulip
//! section in the config it still runs: `help` and `config` work, and
//! `summarize` reports that the server is not configured.

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::warn;

use recapbot_core::config::{BotConfigMap, Config};
use recapbot_core::types::{ChatMessage, MessageQuery, MessagesResponse};
use recapbot_zulip::{BotHost, ChatClient, HostKind, ZulipClient};

use crate::helpers;

/// Stand-in client when no Zulip server is configured.
struct OfflineClient;

#[async_trait]
impl ChatClient for OfflineClient {
    async fn get_messages(&self, _query: &MessageQuery) -> Result<MessagesResponse> {
        bail!("zulip is not configured (run `recapbot onboard` and fill in the zulip section)")
    }
}

pub struct ConsoleHost {
    config: Config,
    client: Option<ZulipClient>,
    offline: OfflineClient,
}

impl ConsoleHost {
    pub fn new(config: Config) -> Self {
        let client = if config.zulip.is_configured() {
            match ZulipClient::new(&config.zulip) {
                Ok(c) => Some(c),
                Err(e) => {
                    warn!(error = %e, "zulip client unavailable, running offline");
                    None
                }
            }
        } else {
            None
        };

        Self {
            config,
            client,
            offline: OfflineClient,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }
}

#[async_trait]
impl BotHost for ConsoleHost {
    fn kind(&self) -> HostKind {
        HostKind::External
    }

    fn get_config_info(&self, bot_name: &str) -> Result<BotConfigMap> {
        Ok(self.config.bot(bot_name))
    }

    fn client(&self) -> &dyn ChatClient {
        match &self.client {
            Some(client) => client,
            None => &self.offline,
        }
    }

    async fn send_reply(&self, _message: &ChatMessage, text: &str) -> Result<()> {
        helpers::print_reply(text);
        Ok(())
    }
}
