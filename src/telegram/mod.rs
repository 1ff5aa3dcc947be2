//! Telegram message sink: Bot API client and message rendering.

pub mod client;
pub mod text;

pub use client::TelegramClient;
