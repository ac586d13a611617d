//! Recapbot Core: configuration, shared wire types, and utilities.
//!
//! This crate contains:
//! - **config**: JSON config schema, loader, and env var overrides
//! - **types**: Zulip message/query types and OpenAI completion types
//! - **utils**: path and string helpers

pub mod config;
pub mod types;
pub mod utils;

pub use config::Config;
pub use types::{ChatMessage, MessageQuery};
