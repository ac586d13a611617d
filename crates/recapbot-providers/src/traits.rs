//! Summary provider trait: the capability set every backend implements.
//!
//! A provider is built by a zero-argument factory from the registry, then
//! `initialize`d once with the bot's config map. After that it is only
//! ever read.

use async_trait::async_trait;
use recapbot_core::config::BotConfigMap;

use crate::error::ProviderResult;

/// Decoding parameters sent with every remote summary request.
#[derive(Clone, Debug)]
pub struct SummaryRequestConfig {
    /// Output-length cap.
    pub max_tokens: u32,
    /// Sampling temperature; `0.0` keeps summaries deterministic.
    pub temperature: f64,
}

impl Default for SummaryRequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.0,
        }
    }
}

/// Trait that all summary providers implement.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Read credentials and settings from the bot's config map.
    ///
    /// Fails with `ProviderError::MissingConfig` if a required key is absent.
    fn initialize(&mut self, config: &BotConfigMap) -> ProviderResult<()>;

    /// Summarize a flattened conversation transcript.
    async fn summarize(&self, text: &str) -> ProviderResult<String>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
