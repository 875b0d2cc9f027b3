//! Telegram adapter for the bot process.
//!
//! The rest of the workspace talks to Telegram only through [`BotClient`];
//! [`TelegramClient`] is the teloxide-backed implementation used by the
//! binary, and tests substitute their own.

pub mod bot;
pub mod client;
pub mod dispatch;
pub mod listener;

pub use bot::TelegramClient;
pub use client::{BotClient, BotError};
pub use dispatch::UpdateSource;
