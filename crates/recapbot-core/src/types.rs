//! Core types for Recapbot: typed forms of the JSON the bot exchanges.
//!
//! Two families live here:
//! - Zulip types: [`ChatMessage`], [`MessageQuery`] and its [`NarrowTerm`]s.
//! - OpenAI chat-completions types used by the remote summary providers.

use chrono::Utc;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Chat messages (Zulip format)
// ─────────────────────────────────────────────

/// Whether a message was posted to a stream or sent privately.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Stream,
    Private,
}

/// A participant of a private conversation.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecipientUser {
    pub id: u64,
    pub email: String,
    pub full_name: String,
}

/// Zulip's `display_recipient`: the stream name for stream messages, the
/// full participant list (sender included) for private ones.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DisplayRecipient {
    Stream(String),
    Users(Vec<RecipientUser>),
}

impl Default for DisplayRecipient {
    fn default() -> Self {
        DisplayRecipient::Stream(String::new())
    }
}

/// One chat message, as delivered by the Zulip API.
///
/// Read-only to the bot. Fields the bot never looks at are not modelled.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatMessage {
    pub id: u64,
    /// Sender display name (e.g. `"Ann Smith"`).
    pub sender_full_name: String,
    pub sender_email: String,
    pub content: String,
    /// Originating stream; `None` for private messages.
    pub stream_id: Option<u64>,
    /// Topic of the message (Zulip still calls it `subject` on the wire).
    pub subject: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub display_recipient: DisplayRecipient,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
}

impl ChatMessage {
    /// Create a stream message with the fields the handler needs.
    pub fn stream(
        stream_id: u64,
        subject: impl Into<String>,
        sender_full_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        ChatMessage {
            sender_full_name: sender_full_name.into(),
            content: content.into(),
            stream_id: Some(stream_id),
            subject: subject.into(),
            message_type: MessageType::Stream,
            timestamp: Utc::now().timestamp(),
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────
// Message queries (GET /messages)
// ─────────────────────────────────────────────

/// Reference point a bounded fetch is relative to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Newest,
}

impl Anchor {
    /// The query-string form.
    pub fn as_param(&self) -> String {
        match self {
            Anchor::Newest => "newest".to_string(),
        }
    }
}

/// One `(operator, operand)` constraint of a narrow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NarrowTerm {
    pub operator: String,
    pub operand: serde_json::Value,
}

impl NarrowTerm {
    /// Restrict to one stream by id.
    pub fn stream(stream_id: u64) -> Self {
        NarrowTerm {
            operator: "stream".to_string(),
            operand: serde_json::Value::from(stream_id),
        }
    }

    /// Restrict to one topic by name.
    pub fn topic(topic: impl Into<String>) -> Self {
        NarrowTerm {
            operator: "topic".to_string(),
            operand: serde_json::Value::String(topic.into()),
        }
    }
}

/// Filter for a message-history fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageQuery {
    pub anchor: Anchor,
    pub num_before: u32,
    pub num_after: u32,
    /// Ask the server for rendered HTML instead of raw markdown.
    pub apply_markdown: bool,
    pub narrow: Vec<NarrowTerm>,
}

impl MessageQuery {
    /// The last `count` messages of a `(stream, topic)` pair, raw markdown.
    pub fn recent_in_topic(stream_id: u64, topic: impl Into<String>, count: u32) -> Self {
        MessageQuery {
            anchor: Anchor::Newest,
            num_before: count,
            num_after: 0,
            apply_markdown: false,
            narrow: vec![NarrowTerm::stream(stream_id), NarrowTerm::topic(topic)],
        }
    }

    /// The topic operand of the narrow, if any.
    pub fn topic(&self) -> Option<&str> {
        self.narrow
            .iter()
            .find(|t| t.operator == "topic")
            .and_then(|t| t.operand.as_str())
    }
}

/// Result of a message-history fetch, oldest first.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

// ─────────────────────────────────────────────
// Completions (OpenAI chat completions format)
// ─────────────────────────────────────────────

/// Author role of one completion turn. Summary prompts go out as a single
/// `assistant` turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
}

/// A single role/content turn.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        ChatTurn {
            role,
            content: content.into(),
        }
    }
}

/// Request body for an OpenAI-compatible chat completion API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatTurn>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Raw chat completion response from an OpenAI-compatible API.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    pub usage: Option<UsageInfo>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the server returned any.
    pub fn first_content(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

/// A single choice in a chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
    pub finish_reason: Option<String>,
}

/// The assistant message within a chat completion choice.
#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

/// Token usage statistics.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
