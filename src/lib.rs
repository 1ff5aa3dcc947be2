#![forbid(unsafe_code)]

//! `task-relay` — mirror Asana project tasks into a Telegram chat.
//!
//! Polls the configured Asana project on a fixed interval, compares each
//! task against the last persisted snapshot, and creates or edits the
//! corresponding Telegram message so the chat always reflects current
//! task state.

pub mod asana;
pub mod config;
pub mod errors;
pub mod models;
pub mod persistence;
pub mod reconcile;
pub mod telegram;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
