//! Recapbot Bot: the command handler.
//!
//! This crate contains:
//! - **command**: parsing message text into a `Command`
//! - **transcript**: flattening a message history into provider input
//! - **handler**: `LlmHandler`, which dispatches commands and replies
//! - **error**: startup and summarize errors

pub mod command;
pub mod error;
pub mod handler;
pub mod transcript;

pub use command::Command;
pub use error::{StartupError, SummarizeError};
pub use handler::{LlmHandler, BOT_NAME, HISTORY_LIMIT, USAGE};
pub use transcript::{build_transcript, SEPARATOR};
