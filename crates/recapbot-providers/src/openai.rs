//! OpenAI provider: summaries from the hosted chat completions API.

use async_trait::async_trait;
use tracing::debug;

use recapbot_core::config::BotConfigMap;

use crate::completion::{summary_prompt, CompletionClient};
use crate::error::{ProviderError, ProviderResult};
use crate::traits::{SummaryProvider, SummaryRequestConfig};

pub const API_KEY_KEY: &str = "openai_api_key";
pub const MODEL_KEY: &str = "openai_model";
pub const API_BASE_KEY: &str = "openai_api_base";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Summarizes through OpenAI. Unusable until `initialize` has stored a key.
#[derive(Debug, Default)]
pub struct OpenAiProvider {
    client: Option<CompletionClient>,
    request_config: SummaryRequestConfig,
}

impl OpenAiProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SummaryProvider for OpenAiProvider {
    fn initialize(&mut self, config: &BotConfigMap) -> ProviderResult<()> {
        let api_key = config
            .get(API_KEY_KEY)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::missing(API_KEY_KEY))?;

        let model = config
            .get(MODEL_KEY)
            .map(String::as_str)
            .unwrap_or(DEFAULT_MODEL);
        let api_base = config
            .get(API_BASE_KEY)
            .map(String::as_str)
            .unwrap_or(DEFAULT_API_BASE);

        debug!(model, api_base, "Initializing OpenAI provider");
        self.client = Some(CompletionClient::new(
            "OpenAI",
            api_base,
            Some(api_key.clone()),
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
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(pairs: &[(&str, &str)]) -> BotConfigMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_initialize_requires_api_key() {
        let mut provider = OpenAiProvider::new();
        let err = provider.initialize(&BotConfigMap::new()).unwrap_err();
        assert!(matches!(err, ProviderError::MissingConfig { ref key } if key == "openai_api_key"));
    }

    #[test]
    fn test_initialize_rejects_empty_key() {
        let mut provider = OpenAiProvider::new();
        assert!(provider
            .initialize(&config(&[("openai_api_key", "")]))
            .is_err());
    }

    #[test]
    fn test_initialize_defaults() {
        let mut provider = OpenAiProvider::new();
        provider
            .initialize(&config(&[("openai_api_key", "sk-1")]))
            .unwrap();
        assert_eq!(provider.client.as_ref().unwrap().model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_summarize_before_initialize() {
        let provider = OpenAiProvider::new();
        let err = provider.summarize("x").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotInitialized));
    }

    #[tokio::test]
    async fn test_summarize_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "assistant", "content": "Summarize this conversation:\nAnn says: hi<SEP>Bo says: yo"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-ok",
                "choices": [{"message": {"content": "Ann and Bo said hello."}, "finish_reason": "stop"}],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let mut provider = OpenAiProvider::new();
        let base = format!("{}/v1", mock_server.uri());
        provider
            .initialize(&config(&[
                ("openai_api_key", "sk-test"),
                ("openai_model", "gpt-4o-mini"),
                ("openai_api_base", &base),
            ]))
            .unwrap();

        let summary = provider
            .summarize("Ann says: hi<SEP>Bo says: yo")
            .await
            .unwrap();
        assert_eq!(summary, "Ann and Bo said hello.");
    }

    #[tokio::test]
    async fn test_summarize_transport_error_is_provider_error() {
        let mut provider = OpenAiProvider::new();
        provider
            .initialize(&config(&[
                ("openai_api_key", "sk-test"),
                ("openai_api_base", "http://127.0.0.1:1"),
            ]))
            .unwrap();

        let err = provider.summarize("x").await.unwrap_err();
        assert!(err.to_string().starts_with("request failed:"));
    }
}
