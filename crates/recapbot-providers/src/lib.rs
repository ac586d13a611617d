//! Summary provider layer for Recapbot.
//!
//! # Architecture
//!
//! - [`traits::SummaryProvider`]: trait that all providers implement
//! - [`registry`]: static name → factory table, resolved once at startup
//! - [`completion::CompletionClient`]: OpenAI-compatible HTTP client
//! - [`echo`], [`openai`], [`vicuna`]: the three backends

pub mod completion;
pub mod echo;
pub mod error;
pub mod openai;
pub mod registry;
pub mod traits;
pub mod vicuna;

// Re-export main types for convenience
pub use echo::EchoProvider;
pub use error::{ProviderError, ProviderResult};
pub use openai::OpenAiProvider;
pub use registry::{find_by_name, ProviderSpec, DEFAULT_PROVIDER, PROVIDERS};
pub use traits::{SummaryProvider, SummaryRequestConfig};
pub use vicuna::VicunaProvider;
