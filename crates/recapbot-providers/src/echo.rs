//! Echo provider: returns the transcript unchanged.
//!
//! The default backend, so the bot runs without any external credentials.

use async_trait::async_trait;
use recapbot_core::config::BotConfigMap;

use crate::error::ProviderResult;
use crate::traits::SummaryProvider;

#[derive(Debug, Default)]
pub struct EchoProvider;

impl EchoProvider {
    pub fn new() -> Self {
        EchoProvider
    }
}

#[async_trait]
impl SummaryProvider for EchoProvider {
    fn initialize(&mut self, _config: &BotConfigMap) -> ProviderResult<()> {
        Ok(())
    }

    async fn summarize(&self, text: &str) -> ProviderResult<String> {
        Ok(text.to_string())
    }

    fn display_name(&self) -> &str {
        "Echo"
    }
}
