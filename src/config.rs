//! Global configuration sourced from environment variables.

use std::env;

use crate::{AppError, Result};

/// Default poll period in seconds when `POLLING_INTERVAL` is unset.
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 30;

/// Telegram connectivity settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    /// Bot token used for `sendMessage` / `editMessageText` calls.
    pub bot_token: String,
    /// Chat the task messages are posted into.
    pub chat_id: String,
    /// Forum topic identifier. Accepted for configuration compatibility but
    /// not applied to outgoing requests.
    pub message_thread_id: Option<i64>,
}

/// Asana connectivity settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsanaConfig {
    /// Personal access token sent as a bearer credential.
    pub access_token: String,
    /// Project whose task list is mirrored.
    pub project_gid: String,
}

/// Global configuration assembled from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Telegram sink settings.
    pub telegram: TelegramConfig,
    /// Asana source settings.
    pub asana: AsanaConfig,
    /// Seconds between reconciliation passes.
    pub poll_interval_seconds: u64,
}

impl GlobalConfig {
    /// Assemble configuration from environment variables.
    ///
    /// Reads `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`,
    /// `TELEGRAM_MESSAGE_THREAD_ID` (optional), `ASANA_PAT`,
    /// `ASANA_PROJECT_ID`, and `POLLING_INTERVAL` (seconds, default 30).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or empty,
    /// or if an optional variable fails to parse.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            telegram: TelegramConfig {
                bot_token: require_env("TELEGRAM_BOT_TOKEN")?,
                chat_id: require_env("TELEGRAM_CHAT_ID")?,
                message_thread_id: optional_env("TELEGRAM_MESSAGE_THREAD_ID")
                    .map(|value| {
                        value.parse::<i64>().map_err(|err| {
                            AppError::Config(format!(
                                "TELEGRAM_MESSAGE_THREAD_ID is not an integer: {err}"
                            ))
                        })
                    })
                    .transpose()?,
            },
            asana: AsanaConfig {
                access_token: require_env("ASANA_PAT")?,
                project_gid: require_env("ASANA_PROJECT_ID")?,
            },
            poll_interval_seconds: match optional_env("POLLING_INTERVAL") {
                Some(value) => value.parse::<u64>().map_err(|err| {
                    AppError::Config(format!("POLLING_INTERVAL is not an integer: {err}"))
                })?,
                None => DEFAULT_POLL_INTERVAL_SECONDS,
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval_seconds == 0 {
            return Err(AppError::Config(
                "POLLING_INTERVAL must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Read a required environment variable, rejecting unset or empty values.
fn require_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!("{key} must be set"))),
    }
}

/// Read an optional environment variable, treating empty as unset.
fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
