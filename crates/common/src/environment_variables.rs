//! The list of environment variables used throughout the application.

// TMDB environment variables
pub const TMDB_API_KEY: &str = "TMDB_API_KEY";
pub const TMDB_LANGUAGE: &str = "TMDB_LANGUAGE";
pub const TMDB_DEBUG: &str = "TMDB_DEBUG";

// Telegram environment variables
pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHANNEL_ID: &str = "TELEGRAM_CHANNEL_ID";

// Cache environment variables
pub const CACHE_DIR: &str = "REELBOT_CACHE_DIR";
pub const CACHE_TTL_HOURS: &str = "REELBOT_CACHE_TTL_HOURS";

// HTTP environment variables
pub const HTTP_TIMEOUT_SECS: &str = "REELBOT_HTTP_TIMEOUT_SECS";
pub const MAX_ATTEMPTS: &str = "REELBOT_MAX_ATTEMPTS";

// Miscellaneous
pub const LOG_FILTER: &str = "REELBOT_LOG_FILTER";
pub const LOG_FILE: &str = "REELBOT_LOG_FILE";

/// Every variable above, in the order they are read.
pub const ALL: [&str; 11] = [
    TMDB_API_KEY,
    TMDB_LANGUAGE,
    TMDB_DEBUG,
    TELEGRAM_BOT_TOKEN,
    TELEGRAM_CHANNEL_ID,
    CACHE_DIR,
    CACHE_TTL_HOURS,
    HTTP_TIMEOUT_SECS,
    MAX_ATTEMPTS,
    LOG_FILTER,
    LOG_FILE,
];
