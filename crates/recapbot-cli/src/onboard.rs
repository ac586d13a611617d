//! `recapbot onboard`: write a starter configuration.
//!
//! - Creates `~/.recapbot/config.json` (or the `--config` path) if missing
//! - Creates the history directory used by the REPL

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use recapbot_bot::BOT_NAME;
use recapbot_core::config::{get_config_path, save_config, BotConfigMap, Config};
use recapbot_core::utils::get_data_path;
use recapbot_providers::registry::{DEFAULT_PROVIDER, PROVIDER_KEY};

/// Run the onboard command.
pub fn run(config_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("{}", "📝 Recapbot Setup".cyan().bold());
    println!();

    let config_path = config_path.unwrap_or_else(get_config_path);

    if create_config(&config_path)? {
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    let history_dir = get_data_path().join("history");
    std::fs::create_dir_all(&history_dir)
        .with_context(|| format!("failed to create {}", history_dir.display()))?;
    println!("  {} history dir at {}", "✓".green(), history_dir.display());

    println!();
    println!("  {}", "Next steps:".bold());
    println!("    1. Fill in the zulip section (site, email, apiKey)");
    println!(
        "    2. Set bots.{BOT_NAME}.{PROVIDER_KEY} to openai or vicuna and add its keys"
    );
    println!("    3. Check with {}", "recapbot status".cyan());
    println!(
        "    4. Try it: {}",
        "recapbot repl --stream-id <ID> --topic <TOPIC>".cyan()
    );
    println!();

    Ok(())
}

/// The config written on first run: no credentials, echo provider selected.
fn starter_config() -> Config {
    let mut llm = BotConfigMap::new();
    llm.insert(PROVIDER_KEY.to_string(), DEFAULT_PROVIDER.to_string());

    let mut config = Config::default();
    config.bots.insert(BOT_NAME.to_string(), llm);
    config
}

/// Write the starter config unless `path` exists. Returns whether it wrote.
fn create_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&starter_config(), Some(path))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_config_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        assert!(create_config(&path).unwrap());

        let written = recapbot_core::config::load_config(Some(&path));
        assert_eq!(
            written.bot(BOT_NAME).get(PROVIDER_KEY).map(String::as_str),
            Some(DEFAULT_PROVIDER)
        );
        assert!(!written.zulip.is_configured());
    }

    #[test]
    fn create_config_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "original").unwrap();
        assert!(!create_config(&path).unwrap());
        // Should NOT overwrite
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }
}
