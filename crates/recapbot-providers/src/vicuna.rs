//! Vicuna provider: summaries from a self-hosted Vicuna model.
//!
//! Expects an OpenAI-compatible server (e.g. FastChat's
//! `openai_api_server`) at `vicuna_api_base`.

use async_trait::async_trait;
use tracing::debug;

use recapbot_core::config::BotConfigMap;

use crate::completion::{summary_prompt, CompletionClient};
use crate::error::{ProviderError, ProviderResult};
use crate::traits::{SummaryProvider, SummaryRequestConfig};

pub const API_BASE_KEY: &str = "vicuna_api_base";
pub const MODEL_KEY: &str = "vicuna_model";
pub const API_KEY_KEY: &str = "vicuna_api_key";

pub const DEFAULT_MODEL: &str = "vicuna-7b-v1.5";

#[derive(Debug, Default)]
pub struct VicunaProvider {
    client: Option<CompletionClient>,
    request_config: SummaryRequestConfig,
}

impl VicunaProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SummaryProvider for VicunaProvider {
    fn initialize(&mut self, config: &BotConfigMap) -> ProviderResult<()> {
        let api_base = config
            .get(API_BASE_KEY)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| ProviderError::missing(API_BASE_KEY))?;
        let model = config
            .get(MODEL_KEY)
            .map(String::as_str)
            .unwrap_or(DEFAULT_MODEL);

        debug!(model, api_base = %api_base, "Initializing Vicuna provider");
        self.client = Some(CompletionClient::new(
            "Vicuna",
            api_base.clone(),
            config.get(API_KEY_KEY).cloned(),
            model,
        ));
        Ok(())
    }

    async fn summarize(&self, text: &str) -> ProviderResult<String> {
        let client = self.client.as_ref().ok_or(ProviderError::NotInitialized)?;
        client
            .complete(&summary_prompt(text), &self.request_config)
            .await
    }

    fn display_name(&self) -> &str {
        "Vicuna"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_initialize_requires_api_base() {
        let mut provider = VicunaProvider::new();
        let err = provider.initialize(&BotConfigMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "missing required config key 'vicuna_api_base'");
    }

    #[tokio::test]
    async fn test_summarize_against_local_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "vicuna-7b-v1.5",
                "max_tokens": 1000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cmpl-local",
                "choices": [{"message": {"content": "short summary"}, "finish_reason": "stop"}]
            })))
            .mount(&mock_server)
            .await;

        let mut config = BotConfigMap::new();
        config.insert(API_BASE_KEY.into(), format!("{}/v1", mock_server.uri()));

        let mut provider = VicunaProvider::new();
        provider.initialize(&config).unwrap();
        assert_eq!(provider.summarize("A says: b").await.unwrap(), "short summary");
    }
}
