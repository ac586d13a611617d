//! Configuration schema: the typed form of `~/.recapbot/config.json`.
//!
//! Hierarchy: `Config` → `ZulipConfig`, plus one flat string map per bot
//! under `bots`.
//!
//! Typed sections use **camelCase** keys on disk. Bot sections are passed
//! through verbatim because their keys are owned by the bot, not by us.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flat `key → value` settings for a single bot (e.g. the `"llm"` section).
pub type BotConfigMap = HashMap<String, String>;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration: loaded from `~/.recapbot/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub zulip: ZulipConfig,
    /// Per-bot settings, keyed by bot name.
    pub bots: HashMap<String, BotConfigMap>,
}

impl Config {
    /// Settings for one bot. Unknown bots get an empty map.
    pub fn bot(&self, name: &str) -> BotConfigMap {
        self.bots.get(name).cloned().unwrap_or_default()
    }
}

// ─────────────────────────────────────────────
// Zulip
// ─────────────────────────────────────────────

/// Credentials for the Zulip REST API.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZulipConfig {
    /// Server URL, e.g. `"https://chat.example.com"`.
    pub site: String,
    /// Bot account email.
    pub email: String,
    /// Bot account API key.
    pub api_key: String,
}

impl ZulipConfig {
    /// Whether enough is set to talk to a server.
    pub fn is_configured(&self) -> bool {
        !self.site.is_empty() && !self.email.is_empty() && !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
