//! [TelegramClient] over the Telegram Bot API's `sendMessage` method.

use crate::message::MessageData;
use crate::{TelegramClient, TelegramError};
use async_trait::async_trait;
use reelbot_common::retry::{AttemptError, RetryFailure, RetryPolicy};
use reelbot_common::TelegramSettings;
use reqwest::header::RETRY_AFTER;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.telegram.org";
const USER_AGENT: &str = concat!("reelbot/", env!("CARGO_PKG_VERSION"));

/// Sends messages to a single Telegram chat or channel as a bot.
pub struct TelegramBot {
    client: Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    link_preview_options: LinkPreviewOptions<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Serialize)]
struct LinkPreviewOptions<'a> {
    is_disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    show_above_text: bool,
}

#[derive(Serialize)]
struct InlineKeyboardMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

#[derive(Serialize)]
struct InlineKeyboardButton<'a> {
    text: &'a str,
    url: &'a str,
}

/// The envelope every Bot API response comes in.
#[derive(Deserialize, Default)]
struct ApiResponse {
    #[serde(default)]
    ok: bool,
    description: Option<String>,
    parameters: Option<ResponseParameters>,
}

#[derive(Deserialize, Default)]
struct ResponseParameters {
    retry_after: Option<u64>,
}

/// Why a single attempt failed. Neither variant carries the request URL, which holds the token.
#[derive(Debug)]
enum SendError {
    Transport(reqwest::Error),
    Rejected {
        status: u16,
        description: Option<String>,
    },
}

impl Display for SendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::Transport(e) => write!(f, "{}", e),
            SendError::Rejected {
                status,
                description: Some(d),
            } => write!(f, "HTTP {}: {}", status, d),
            SendError::Rejected {
                status,
                description: None,
            } => write!(f, "HTTP {}", status),
        }
    }
}

impl TelegramBot {
    pub fn new(
        settings: &TelegramSettings,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TelegramError::Delivery {
                message: format!("failed to build HTTP client: {}", e),
                attempts: 0,
            })?;
        Ok(TelegramBot {
            client,
            base_url: String::from(DEFAULT_BASE_URL),
            bot_token: settings.bot_token.clone(),
            chat_id: settings.channel_id.clone(),
            retry,
        })
    }

    /// Point the bot at some other Bot API server (e.g. a self-hosted one).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = String::from(base_url.trim_end_matches('/'));
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.bot_token)
    }

    async fn send_once(
        &self,
        url: &str,
        body: &SendMessageRequest<'_>,
    ) -> Result<(), AttemptError<SendError>> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AttemptError::transient(SendError::Transport(e.without_url())))?;

        let status = response.status().as_u16();
        let header_retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = response
            .text()
            .await
            .map_err(|e| AttemptError::transient(SendError::Transport(e.without_url())))?;
        let envelope: ApiResponse = serde_json::from_str(&text).unwrap_or_default();
        if (200..300).contains(&status) && envelope.ok {
            return Ok(());
        }

        let retry_after = envelope
            .parameters
            .and_then(|p| p.retry_after)
            .or(header_retry_after)
            .map(Duration::from_secs);
        let error = SendError::Rejected {
            status,
            description: envelope.description,
        };
        if self.retry.is_retryable_status(status) {
            Err(AttemptError::Transient { error, retry_after })
        } else {
            Err(AttemptError::Permanent(error))
        }
    }
}

fn to_telegram_error(failure: RetryFailure<SendError>) -> TelegramError {
    TelegramError::Delivery {
        message: format!("sendMessage failed: {}", failure.error),
        attempts: failure.attempts,
    }
}

#[async_trait]
impl TelegramClient for TelegramBot {
    #[instrument(skip_all, fields(chat_id = %self.chat_id))]
    async fn send_message(&self, message: &MessageData) -> Result<(), TelegramError> {
        let buttons: Vec<InlineKeyboardButton> = message
            .links
            .iter()
            .map(|l| InlineKeyboardButton {
                text: &l.label,
                url: &l.url,
            })
            .collect();
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text: &message.html,
            parse_mode: "HTML",
            link_preview_options: LinkPreviewOptions {
                is_disabled: message.preview_url.is_none(),
                url: message.preview_url.as_deref(),
                show_above_text: message.preview_url.is_some(),
            },
            reply_markup: if buttons.is_empty() {
                None
            } else {
                Some(InlineKeyboardMarkup {
                    inline_keyboard: vec![buttons],
                })
            },
        };

        let url = self.send_message_url();
        let url = url.as_str();
        let body = &body;
        debug!(length = message.html.len(), "Sending Telegram message.");
        self.retry
            .run("sendMessage", move |_| self.send_once(url, body))
            .await
            .map_err(to_telegram_error)?;
        info!("Telegram accepted the message.");

        Ok(())
    }
}
