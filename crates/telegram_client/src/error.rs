use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TelegramError {
    /// Telegram never accepted the message.
    #[error("DeliveryError: {message} (after {attempts} attempt(s))")]
    Delivery { message: String, attempts: u32 },
}

impl TelegramError {
    pub fn kind(&self) -> &'static str {
        match self {
            TelegramError::Delivery { .. } => "DeliveryError",
        }
    }
}
