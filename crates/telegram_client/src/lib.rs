//! Delivery of release notifications through the Telegram Bot API.

mod bot;
mod error;
pub mod message;

pub use bot::{TelegramBot, DEFAULT_BASE_URL};
pub use error::TelegramError;

use crate::message::MessageData;
use async_trait::async_trait;

/// Something that can deliver a [MessageData] to the configured chat.
#[async_trait]
pub trait TelegramClient: Send + Sync {
    /// Send `message`, retrying transient failures. Returns once the platform accepted it.
    async fn send_message(&self, message: &MessageData) -> Result<(), TelegramError>;
}
