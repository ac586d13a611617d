//! Handler errors.

use recapbot_providers::ProviderError;

/// Fatal errors while bringing the handler up. Nothing is sent to chat.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("the LLM bot only supports being run externally (recapbot handle / recapbot repl)")]
    UnsupportedHost,

    #[error("llm provider \"{name}\" is not supported (supported: {supported})")]
    UnknownProvider { name: String, supported: String },

    #[error("failed to initialize provider: {0}")]
    Provider(#[from] ProviderError),

    #[error("failed to read bot config: {0}")]
    Config(String),
}

/// Errors on the summarize path. These become chat replies, not failures.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("Failed to fetch messages: {0:#}")]
    Fetch(anyhow::Error),

    #[error("Failed to summarize: {0}")]
    Provider(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_message() {
        let err = StartupError::UnknownProvider {
            name: "bard".into(),
            supported: "openai, vicuna, debug".into(),
        };
        assert_eq!(
            err.to_string(),
            "llm provider \"bard\" is not supported (supported: openai, vicuna, debug)"
        );
    }

    #[test]
    fn test_fetch_error_includes_context_chain() {
        let inner = anyhow::anyhow!("connection refused").context("GET /messages failed");
        let err = SummarizeError::Fetch(inner);
        assert_eq!(
            err.to_string(),
            "Failed to fetch messages: GET /messages failed: connection refused"
        );
    }

    #[test]
    fn test_provider_error_message() {
        let err: SummarizeError = ProviderError::Request("timed out".into()).into();
        assert_eq!(err.to_string(), "Failed to summarize: request failed: timed out");
    }
}
