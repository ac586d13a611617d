//! Zulip REST client: message history reads and message posts.
//!
//! Only the two endpoints the bot needs are covered:
//! - `GET  /api/v1/messages`: bounded, narrowed history fetch
//! - `POST /api/v1/messages`: send a stream or private message
//!
//! Authentication is HTTP basic auth with the bot's email and API key.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use recapbot_core::config::ZulipConfig;
use recapbot_core::types::{
    ChatMessage, DisplayRecipient, MessageQuery, MessageType, MessagesResponse,
};

// ─────────────────────────────────────────────
// ChatClient trait
// ─────────────────────────────────────────────

/// Read access to a chat server's message history.
///
/// The handler only ever fetches through this trait, so tests can swap in
/// a recording mock.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Fetch messages matching `query`, oldest first.
    async fn get_messages(&self, query: &MessageQuery) -> Result<MessagesResponse>;
}

// ─────────────────────────────────────────────
// Outgoing messages
// ─────────────────────────────────────────────

/// Where an outgoing message is delivered.
#[derive(Clone, Debug, PartialEq)]
pub enum Recipient {
    Stream { stream_id: u64, topic: String },
    Private { emails: Vec<String> },
}

/// A message to post.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingMessage {
    pub recipient: Recipient,
    pub content: String,
}

impl OutgoingMessage {
    /// A reply in the same place as `original`: same stream and topic, or
    /// a private message back to the sender.
    pub fn reply_to(original: &ChatMessage, content: impl Into<String>) -> Self {
        let recipient = match (original.message_type, original.stream_id) {
            (MessageType::Stream, Some(stream_id)) => Recipient::Stream {
                stream_id,
                topic: original.subject.clone(),
            },
            _ => Recipient::Private {
                emails: private_reply_emails(original),
            },
        };
        OutgoingMessage {
            recipient,
            content: content.into(),
        }
    }

    /// Form fields for `POST /messages`.
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = match &self.recipient {
            Recipient::Stream { stream_id, topic } => vec![
                ("type", "stream".to_string()),
                ("to", stream_id.to_string()),
                ("topic", topic.clone()),
            ],
            Recipient::Private { emails } => vec![
                ("type", "private".to_string()),
                ("to", serde_json::to_string(emails).unwrap_or_else(|_| "[]".into())),
            ],
        };
        fields.push(("content", self.content.clone()));
        fields
    }
}

/// Everyone in a private conversation. Falls back to the sender when the
/// participant list is missing.
fn private_reply_emails(original: &ChatMessage) -> Vec<String> {
    match &original.display_recipient {
        DisplayRecipient::Users(users) if !users.is_empty() => {
            users.iter().map(|u| u.email.clone()).collect()
        }
        _ => vec![original.sender_email.clone()],
    }
}

// ─────────────────────────────────────────────
// ZulipClient
// ─────────────────────────────────────────────

/// HTTP client for one Zulip server, authenticated as the bot account.
pub struct ZulipClient {
    http: reqwest::Client,
    site: String,
    email: String,
    api_key: String,
}

impl std::fmt::Debug for ZulipClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZulipClient")
            .field("site", &self.site)
            .field("email", &self.email)
            .finish()
    }
}

impl ZulipClient {
    /// Create a client from the `zulip` config section.
    pub fn new(config: &ZulipConfig) -> Result<Self> {
        if !config.is_configured() {
            bail!("zulip site, email and apiKey must all be set");
        }
        Ok(Self {
            http: reqwest::Client::new(),
            site: config.site.trim_end_matches('/').to_string(),
            email: config.email.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/v1/{}", self.site, endpoint)
    }

    /// Post a message. Returns the new message id.
    pub async fn send_message(&self, message: &OutgoingMessage) -> Result<u64> {
        let resp = self
            .http
            .post(self.api_url("messages"))
            .basic_auth(&self.email, Some(&self.api_key))
            .form(&message.form_fields())
            .send()
            .await
            .context("POST /messages failed")?;

        let body = check_response(resp, "POST /messages").await?;
        let id = body["id"].as_u64().unwrap_or_default();
        debug!(id, "message sent");
        Ok(id)
    }
}

#[async_trait]
impl ChatClient for ZulipClient {
    async fn get_messages(&self, query: &MessageQuery) -> Result<MessagesResponse> {
        let narrow = serde_json::to_string(&query.narrow).context("failed to encode narrow")?;
        let params = [
            ("anchor", query.anchor.as_param()),
            ("num_before", query.num_before.to_string()),
            ("num_after", query.num_after.to_string()),
            ("apply_markdown", query.apply_markdown.to_string()),
            ("narrow", narrow),
        ];

        debug!(
            anchor = %params[0].1,
            num_before = query.num_before,
            narrow = %params[4].1,
            "fetching messages"
        );

        let resp = self
            .http
            .get(self.api_url("messages"))
            .basic_auth(&self.email, Some(&self.api_key))
            .query(&params)
            .send()
            .await
            .context("GET /messages failed")?;

        let body = check_response(resp, "GET /messages").await?;
        let messages: MessagesResponse =
            serde_json::from_value(body).context("unexpected /messages payload")?;
        debug!(count = messages.messages.len(), "messages fetched");
        Ok(messages)
    }
}

/// Turn a Zulip response into its JSON body, or an error carrying `msg`.
///
/// Zulip reports failures as `{"result": "error", "msg": "..."}`, usually
/// with a 4xx status.
async fn check_response(resp: reqwest::Response, what: &str) -> Result<Value> {
    let status = resp.status();
    let text = resp
        .text()
        .await
        .with_context(|| format!("{what}: failed to read body"))?;

    let body: Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(_) => {
            error!(status = %status, body = %text, "{what}: non-JSON response");
            bail!("{what} returned {status}: {text}");
        }
    };

    if !status.is_success() || body["result"].as_str() != Some("success") {
        let msg = body["msg"].as_str().unwrap_or("unknown error");
        error!(status = %status, msg = %msg, "{what} failed");
        bail!("{what} failed ({status}): {msg}");
    }

    Ok(body)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
