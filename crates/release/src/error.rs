use reelbot_telegram_client::TelegramError;
use reelbot_tmdb_client::TmdbError;
use thiserror::Error;

/// Why a release couldn't be announced.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Metadata(#[from] TmdbError),
    #[error(transparent)]
    Delivery(#[from] TelegramError),
}

impl PipelineError {
    /// A short, stable name for the kind of error, as it appears in the logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Metadata(e) => e.kind(),
            PipelineError::Delivery(e) => e.kind(),
        }
    }

    /// The process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Metadata(TmdbError::NotFound(_)) => 4,
            PipelineError::Metadata(TmdbError::Provider { .. })
            | PipelineError::Metadata(TmdbError::Parse { .. }) => 5,
            PipelineError::Delivery(_) => 6,
        }
    }
}
