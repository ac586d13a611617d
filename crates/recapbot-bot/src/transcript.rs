//! Transcript building: flattens a message history into provider input.

use recapbot_core::types::ChatMessage;

/// Placed between consecutive entries.
pub const SEPARATOR: &str = "<SEP>";

/// One entry: `"<sender> says: <content>"`.
pub fn format_entry(message: &ChatMessage) -> String {
    format!("{} says: {}", message.sender_full_name, message.content)
}

/// Join `messages` in order, one entry each, separated by [`SEPARATOR`].
pub fn build_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(sender: &str, content: &str) -> ChatMessage {
        ChatMessage::stream(5, "T", sender, content)
    }

    #[test]
    fn test_two_messages() {
        let transcript = build_transcript(&[msg("Ann", "hi"), msg("Bo", "yo")]);
        assert_eq!(transcript, "Ann says: hi<SEP>Bo says: yo");
    }

    #[test]
    fn test_single_message_has_no_separator() {
        assert_eq!(build_transcript(&[msg("Ann", "hi")]), "Ann says: hi");
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(build_transcript(&[]), "");
    }

    #[test]
    fn test_entry_count_matches_history() {
        let history: Vec<ChatMessage> = (0..20)
            .map(|i| msg(&format!("user{i}"), &format!("message {i}")))
            .collect();
        let transcript = build_transcript(&history);

        let entries: Vec<&str> = transcript.split(SEPARATOR).collect();
        assert_eq!(entries.len(), history.len());
        for (entry, message) in entries.iter().zip(&history) {
            assert_eq!(*entry, format_entry(message));
        }
    }

    #[test]
    fn test_multiline_content_preserved() {
        let transcript = build_transcript(&[msg("Ann", "line one\nline two")]);
        assert_eq!(transcript, "Ann says: line one\nline two");
    }
}
