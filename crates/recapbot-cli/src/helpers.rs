//! Shared CLI helpers: path expansion, reply printing, version banner.

use std::path::PathBuf;

use colored::Colorize;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print a bot reply to stdout.
pub fn print_reply(reply: &str) {
    println!();
    println!("{}", "📝 Recapbot".cyan().bold());
    if reply.is_empty() {
        println!("{}", "(empty reply)".dimmed());
    } else {
        println!("{reply}");
    }
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner(stream_id: u64, topic: &str, offline: bool) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "📝 Recapbot".cyan().bold(), version.dimmed());
    println!(
        "{}",
        format!("Posting as if in stream {stream_id}, topic \"{topic}\".").dimmed()
    );
    if offline {
        println!(
            "{}",
            "Zulip is not configured: history fetches will fail.".yellow()
        );
    }
    println!("{}", "Type a command (try \"help\"), or \"exit\" to quit.".dimmed());
    println!();
}

/// Print a "working" placeholder while a command runs.
pub fn print_thinking() {
    eprint!("{}", "⠿ working...".dimmed());
}

/// Clear the "working" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_home() {
        let result = expand_tilde("~/foo/config.json");
        assert!(result.ends_with("foo/config.json"));
        assert!(!result.starts_with("~"));
    }

    #[test]
    fn expand_tilde_no_tilde() {
        let result = expand_tilde("/etc/recapbot.json");
        assert_eq!(result, PathBuf::from("/etc/recapbot.json"));
    }

    #[test]
    fn expand_tilde_relative() {
        let result = expand_tilde("relative/config.json");
        assert_eq!(result, PathBuf::from("relative/config.json"));
    }
}
