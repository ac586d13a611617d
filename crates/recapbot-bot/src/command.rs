//! Command parsing: turns message text into a [`Command`].
//!
//! The first whitespace-delimited word selects the command. Everything after
//! the first whitespace run is the argument and may itself contain spaces.

/// A parsed bot command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Empty input or `help`.
    Help,
    /// `summarize [topic]`. `None` means the triggering message's own topic.
    Summarize { topic: Option<String> },
    /// `config`: show the active provider.
    Config,
    /// Anything else; carries the command word.
    Unknown(String),
}

impl Command {
    /// Parse message content.
    pub fn parse(content: &str) -> Self {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Command::Help;
        }

        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim_start().to_string())),
            None => (trimmed, None),
        };

        match word {
            "help" => Command::Help,
            "summarize" => Command::Summarize { topic: rest },
            "config" => Command::Config,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_help() {
        assert_eq!(Command::parse(""), Command::Help);
        assert_eq!(Command::parse("   \n\t "), Command::Help);
    }

    #[test]
    fn test_help() {
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("  help  "), Command::Help);
        assert_eq!(Command::parse("help me please"), Command::Help);
    }

    #[test]
    fn test_summarize_without_topic() {
        assert_eq!(
            Command::parse("summarize"),
            Command::Summarize { topic: None }
        );
        assert_eq!(
            Command::parse(" summarize \n"),
            Command::Summarize { topic: None }
        );
    }

    #[test]
    fn test_summarize_with_topic() {
        assert_eq!(
            Command::parse("summarize widgets"),
            Command::Summarize {
                topic: Some("widgets".into())
            }
        );
    }

    #[test]
    fn test_topic_keeps_inner_whitespace() {
        assert_eq!(
            Command::parse("summarize   release  planning q3 "),
            Command::Summarize {
                topic: Some("release  planning q3".into())
            }
        );
    }

    #[test]
    fn test_split_on_any_whitespace() {
        assert_eq!(
            Command::parse("summarize\tweekly sync"),
            Command::Summarize {
                topic: Some("weekly sync".into())
            }
        );
    }

    #[test]
    fn test_config() {
        assert_eq!(Command::parse("config"), Command::Config);
        assert_eq!(Command::parse("config provider openai"), Command::Config);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(Command::parse("dance"), Command::Unknown("dance".into()));
        assert_eq!(
            Command::parse("Summarize"),
            Command::Unknown("Summarize".into())
        );
    }
}
