//! Provider registry: static name → factory table for summary backends.
//!
//! The active provider is resolved once at startup by name and never
//! swapped afterwards.

use tracing::debug;

use recapbot_core::config::BotConfigMap;

use crate::echo::EchoProvider;
use crate::error::ProviderResult;
use crate::openai::{self, OpenAiProvider};
use crate::traits::SummaryProvider;
use crate::vicuna::{self, VicunaProvider};

/// Config key naming the provider to use.
pub const PROVIDER_KEY: &str = "default_llm_provider";

/// Used when `default_llm_provider` is not set. Needs no credentials.
pub const DEFAULT_PROVIDER: &str = "debug";

/// Zero-argument constructor for one provider variant.
pub type ProviderFactory = fn() -> Box<dyn SummaryProvider>;

// ─────────────────────────────────────────────
// ProviderSpec: static metadata for one provider
// ─────────────────────────────────────────────

/// Static description of one registered provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Registry name used in config (e.g. `"openai"`).
    pub name: &'static str,
    /// Human-readable name for logs and `status`.
    pub display_name: &'static str,
    /// Config keys `initialize` refuses to run without.
    pub required_keys: &'static [&'static str],
    /// Config keys read when present.
    pub optional_keys: &'static [&'static str],
    pub factory: ProviderFactory,
}

impl ProviderSpec {
    /// Construct the provider and initialize it from `config`.
    pub fn build(&self, config: &BotConfigMap) -> ProviderResult<Box<dyn SummaryProvider>> {
        debug!(provider = self.name, "Creating summary provider");
        let mut provider = (self.factory)();
        provider.initialize(config)?;
        Ok(provider)
    }

    /// Required keys that are missing or empty in `config`.
    pub fn missing_keys(&self, config: &BotConfigMap) -> Vec<&'static str> {
        self.required_keys
            .iter()
            .copied()
            .filter(|key| config.get(*key).map_or(true, |v| v.is_empty()))
            .collect()
    }
}

fn echo_factory() -> Box<dyn SummaryProvider> {
    Box::new(EchoProvider::new())
}

fn openai_factory() -> Box<dyn SummaryProvider> {
    Box::new(OpenAiProvider::new())
}

fn vicuna_factory() -> Box<dyn SummaryProvider> {
    Box::new(VicunaProvider::new())
}

/// Every supported provider.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        name: "openai",
        display_name: "OpenAI",
        required_keys: &[openai::API_KEY_KEY],
        optional_keys: &[openai::MODEL_KEY, openai::API_BASE_KEY],
        factory: openai_factory,
    },
    ProviderSpec {
        name: "vicuna",
        display_name: "Vicuna",
        required_keys: &[vicuna::API_BASE_KEY],
        optional_keys: &[vicuna::MODEL_KEY, vicuna::API_KEY_KEY],
        factory: vicuna_factory,
    },
    ProviderSpec {
        name: "debug",
        display_name: "Echo",
        required_keys: &[],
        optional_keys: &[],
        factory: echo_factory,
    },
];

// ─────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────

/// Find a provider spec by exact name.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.name == name)
}

/// Registry names, in table order.
pub fn supported_names() -> Vec<&'static str> {
    PROVIDERS.iter().map(|spec| spec.name).collect()
}

/// The provider name selected by a bot config map.
///
/// Only an absent key selects the default; an empty value is returned as
/// is and fails lookup.
pub fn selected_name(config: &BotConfigMap) -> &str {
    config
        .get(PROVIDER_KEY)
        .map(String::as_str)
        .unwrap_or(DEFAULT_PROVIDER)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
