pub mod environment;
pub mod environment_variables;
pub mod retry;
mod settings;

pub use settings::{
    CacheSettings, ConfigError, HttpSettings, LogSettings, Settings, TelegramSettings,
    TmdbSettings,
};
