//! Utility helpers: path resolution and string shaping for logs.

use std::collections::HashMap;
use std::path::PathBuf;

/// Get the Recapbot data directory (e.g. `~/.recapbot/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".recapbot")
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Sorted key names of a settings map. Values are never included, so the
/// result is safe to log.
pub fn redacted_keys(map: &HashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate_string("Summarize this conversation:\nAnn says: hi", 15);
        assert_eq!(result, "Summarize th...");
        assert_eq!(result.chars().count(), 15);
    }

    #[test]
    fn test_truncate_unicode() {
        let result = truncate_string("こんにちは世界です", 5);
        assert_eq!(result, "こん...");
    }

    #[test]
    fn test_redacted_keys_sorted_without_values() {
        let mut map = HashMap::new();
        map.insert("openai_api_key".to_string(), "sk-secret".to_string());
        map.insert("default_llm_provider".to_string(), "openai".to_string());

        let keys = redacted_keys(&map);
        assert_eq!(keys, vec!["default_llm_provider", "openai_api_key"]);
        assert!(!keys.iter().any(|k| k.contains("sk-secret")));
    }

    #[test]
    fn test_data_path_ends_with_recapbot() {
        let path = get_data_path();
        assert!(path.ends_with(".recapbot"));
    }
}
