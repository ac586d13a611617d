//! Recapbot Zulip: chat client and host runtime.
//!
//! This crate provides:
//! - **client**: the `ChatClient` trait and the `ZulipClient` REST implementation
//! - **host**: the `BotHost` trait and `ExternalHost`, which posts replies to Zulip

pub mod client;
pub mod host;

pub use client::{ChatClient, OutgoingMessage, Recipient, ZulipClient};
pub use host::{BotHost, ExternalHost, HostKind};
