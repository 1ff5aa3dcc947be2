//! Telegram Bot API client for posting and editing task messages.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::text;
use crate::config::TelegramConfig;
use crate::models::TaskDetails;
use crate::reconcile::MessageSink;
use crate::{AppError, Result};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PARSE_MODE: &str = "Markdown";

/// Request body for `sendMessage`.
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Request body for `editMessageText`.
#[derive(Debug, Serialize)]
struct EditMessageRequest<'a> {
    chat_id: &'a str,
    message_id: i64,
    text: &'a str,
    parse_mode: &'a str,
}

/// Minimal message object; only the identifier is consumed.
#[derive(Debug, Deserialize)]
pub struct WireMessage {
    /// Chat-scoped message identifier.
    pub message_id: i64,
}

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Payload, present when `ok` is true.
    #[serde(default)]
    pub result: Option<T>,
    /// Human-readable failure reason, present when `ok` is false.
    #[serde(default)]
    pub description: Option<String>,
}

/// Telegram Bot API client bound to one chat.
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    /// Build a client against the production Bot API.
    ///
    /// The configured `message_thread_id` is accepted but not applied to
    /// outgoing requests.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Telegram` if the HTTP client cannot be constructed.
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        Self::with_base_url(config, TELEGRAM_API_BASE)
    }

    /// Build a client against an alternate base URL (used by tests).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Telegram` if the HTTP client cannot be constructed.
    pub fn with_base_url(config: &TelegramConfig, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::Telegram(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.bot_token)
    }

    async fn call<T, B>(&self, method: &str, body: &B) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize + Sync,
    {
        let response = self
            .http
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|err| AppError::Telegram(format!("{method} request failed: {err}")))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|err| AppError::Telegram(format!("{method} decode failed: {err}")))?;

        if !envelope.ok {
            let reason = envelope.description.unwrap_or_else(|| "no description".into());
            return Err(AppError::Telegram(format!("{method} rejected: {reason}")));
        }
        envelope
            .result
            .ok_or_else(|| AppError::Telegram(format!("{method} returned ok without a result")))
    }

    /// Post a new message mirroring `task` and return its message id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Telegram` on request, decoding, or API failure.
    pub async fn send_task_message(&self, task: &TaskDetails) -> Result<i64> {
        let text = text::render_task(task);
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text: &text,
            parse_mode: PARSE_MODE,
        };
        let message: WireMessage = self.call("sendMessage", &body).await?;
        Ok(message.message_id)
    }

    /// Overwrite an existing message with the re-rendered `task`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Telegram` on request, decoding, or API failure.
    pub async fn edit_task_message(&self, message_id: i64, task: &TaskDetails) -> Result<()> {
        let text = text::render_task(task);
        let body = EditMessageRequest {
            chat_id: &self.chat_id,
            message_id,
            text: &text,
            parse_mode: PARSE_MODE,
        };
        let _: WireMessage = self.call("editMessageText", &body).await?;
        Ok(())
    }
}

impl MessageSink for TelegramClient {
    fn send_task(
        &self,
        task: &TaskDetails,
    ) -> Pin<Box<dyn Future<Output = Result<i64>> + Send + '_>> {
        let task = task.clone();
        Box::pin(async move { self.send_task_message(&task).await })
    }

    fn edit_task(
        &self,
        message_id: i64,
        task: &TaskDetails,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let task = task.clone();
        Box::pin(async move { self.edit_task_message(message_id, &task).await })
    }
}
