//! Config loader: reads `~/.recapbot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.recapbot/config.json`
//! 3. Environment variables `RECAPBOT_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Prefix shared by every override variable.
const ENV_PREFIX: &str = "RECAPBOT_";

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path (or `path`) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
fn apply_env_overrides(config: Config) -> Config {
    apply_overrides(config, std::env::vars())
}

/// Apply `RECAPBOT_*` overrides from an iterator of `(name, value)` pairs.
///
/// Supported overrides (double underscore as delimiter):
/// - `RECAPBOT_ZULIP__SITE` → `zulip.site`
/// - `RECAPBOT_ZULIP__EMAIL` → `zulip.email`
/// - `RECAPBOT_ZULIP__API_KEY` → `zulip.api_key`
/// - `RECAPBOT_BOTS__<BOT>__<KEY>` → `bots.<bot>.<key>` (both lowercased)
fn apply_overrides<I>(mut config: Config, vars: I) -> Config
where
    I: IntoIterator<Item = (String, String)>,
{
    for (name, value) in vars {
        let Some(rest) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };

        match rest {
            "ZULIP__SITE" => config.zulip.site = value,
            "ZULIP__EMAIL" => config.zulip.email = value,
            "ZULIP__API_KEY" => config.zulip.api_key = value,
            _ => {
                let Some(bot_key) = rest.strip_prefix("BOTS__") else {
                    continue;
                };
                match bot_key.split_once("__") {
                    Some((bot, key)) if !bot.is_empty() && !key.is_empty() => {
                        debug!(bot = %bot.to_lowercase(), key = %key.to_lowercase(), "env override");
                        config
                            .bots
                            .entry(bot.to_lowercase())
                            .or_default()
                            .insert(key.to_lowercase(), value);
                    }
                    _ => warn!(var = %name, "ignoring malformed bot override"),
                }
            }
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
