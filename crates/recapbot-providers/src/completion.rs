//! OpenAI-compatible completion client shared by the remote providers.
//!
//! Talks to any `/chat/completions` endpoint: OpenAI itself, or a
//! self-hosted server such as FastChat serving Vicuna.

use tracing::{debug, error};

use recapbot_core::types::{ChatCompletionRequest, ChatCompletionResponse, ChatTurn, Role};
use recapbot_core::utils::truncate_string;

use crate::error::{ProviderError, ProviderResult};
use crate::traits::SummaryRequestConfig;

/// Instruction placed before every transcript.
pub const SUMMARY_PROMPT_PREFIX: &str = "Summarize this conversation:\n";

/// Build the prompt sent for a transcript.
pub fn summary_prompt(transcript: &str) -> String {
    format!("{SUMMARY_PROMPT_PREFIX}{transcript}")
}

// ─────────────────────────────────────────────
// CompletionClient
// ─────────────────────────────────────────────

/// A single-turn client for an OpenAI-compatible chat completions API.
pub struct CompletionClient {
    /// HTTP client (connection-pooled). No local timeout is set.
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// Bearer token; self-hosted servers often need none.
    api_key: Option<String>,
    model: String,
    /// Provider name for log fields.
    label: &'static str,
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("provider", &self.label)
            .finish()
    }
}

impl CompletionClient {
    pub fn new(
        label: &'static str,
        api_base: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        CompletionClient {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.into(),
            label,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    /// Send `prompt` as the only turn and return the first completion's text.
    pub async fn complete(
        &self,
        prompt: &str,
        config: &SummaryRequestConfig,
    ) -> ProviderResult<String> {
        debug!(
            provider = self.label,
            model = %self.model,
            prompt = %truncate_string(prompt, 200),
            "Calling completion API"
        );

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatTurn::new(Role::Assistant, prompt)],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        let mut request = self.client.post(self.completions_url()).json(&request_body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(provider = self.label, error = %e, "HTTP request failed");
            ProviderError::Request(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                provider = self.label,
                status = %status,
                body = %body,
                "API error"
            );
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(provider = self.label, error = %e, "Failed to parse completion");
            ProviderError::InvalidResponse(e.to_string())
        })?;

        debug!(
            provider = self.label,
            id = completion.id.as_deref().unwrap_or("?"),
            choices = completion.choices.len(),
            total_tokens = completion.usage.as_ref().map_or(0, |u| u.total_tokens),
            "Completion received"
        );

        completion.first_content().ok_or(ProviderError::EmptyCompletion)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
