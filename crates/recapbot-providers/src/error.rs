//! Provider errors: the one error kind every summary backend reports.
//!
//! Transport and API failures from the HTTP layer are flattened into
//! [`ProviderError`] so callers never see `reqwest`'s error type.

/// Failure while initialising or calling a summary provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("missing required config key '{key}'")]
    MissingConfig { key: String },

    #[error("provider has not been initialized")]
    NotInitialized,

    #[error("request failed: {0}")]
    Request(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("no completion in response")]
    EmptyCompletion,
}

impl ProviderError {
    pub fn missing(key: impl Into<String>) -> Self {
        ProviderError::MissingConfig { key: key.into() }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_message() {
        let err = ProviderError::missing("openai_api_key");
        assert_eq!(err.to_string(), "missing required config key 'openai_api_key'");
    }

    #[test]
    fn test_api_error_message() {
        let err = ProviderError::Api {
            status: 429,
            body: "Rate limit exceeded".into(),
        };
        assert_eq!(err.to_string(), "API error 429: Rate limit exceeded");
    }
}
