//! The configuration for a single reelbot invocation, read once from the environment.

use crate::environment::get_optional_env_var;
use crate::environment::variables::*;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_LANGUAGE: &str = "zh-CN";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_CACHE_TTL_HOURS: u64 = 24;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_ATTEMPTS: u32 = 4;

/// Raised when the environment doesn't describe a usable configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("ConfigError: required variable {name} (or {name}_FILE) is not set")]
    Missing { name: &'static str },
    #[error("ConfigError: {name} has an invalid value \"{value}\": {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for talking to TMDB.
#[derive(Clone)]
pub struct TmdbSettings {
    pub api_key: String,
    pub language: String,
    pub debug: bool,
}

/// Settings for talking to the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub channel_id: String,
}

#[derive(Clone, Debug)]
pub struct LogSettings {
    /// Directives understood by `tracing_subscriber::EnvFilter`.
    pub filter: String,
    /// Log lines are appended to this file in addition to stderr.
    pub file: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct CacheSettings {
    /// The on-disk cache is only used when a directory is configured.
    pub dir: Option<PathBuf>,
    pub ttl: Duration,
}

#[derive(Clone, Debug)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub max_attempts: u32,
}

/// Everything reelbot reads from its environment. Built once at start up and handed to each
/// component that needs a piece of it.
#[derive(Clone, Debug)]
pub struct Settings {
    pub tmdb: TmdbSettings,
    /// [Option::None] only when Telegram credentials weren't required (e.g. a dry run).
    pub telegram: Option<TelegramSettings>,
    pub log: LogSettings,
    pub cache: CacheSettings,
    pub http: HttpSettings,
}

impl Settings {
    /// Read the [Settings] from the process environment.
    ///
    /// A `NAME_FILE` variable pointing at an unreadable file is reported as invalid rather than
    /// treated as unset.
    pub fn from_env(require_telegram: bool) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for name in ALL {
            match get_optional_env_var(name) {
                Ok(Some(value)) => {
                    values.insert(name, value);
                }
                Ok(None) => {}
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name,
                        value: format!("{}_FILE", name),
                        reason: format!("{:#}", e),
                    })
                }
            }
        }
        Settings::from_lookup(require_telegram, |name| values.get(name).cloned())
    }

    /// Read the [Settings] through an arbitrary lookup function; `lookup` returns the trimmed,
    /// non-empty value of a variable or [Option::None].
    pub fn from_lookup<F>(require_telegram: bool, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let tmdb = TmdbSettings {
            api_key: required(&lookup, TMDB_API_KEY)?,
            language: lookup(TMDB_LANGUAGE).unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            debug: match lookup(TMDB_DEBUG) {
                Some(raw) => parse_flag(TMDB_DEBUG, &raw)?,
                None => false,
            },
        };

        let telegram = match (lookup(TELEGRAM_BOT_TOKEN), lookup(TELEGRAM_CHANNEL_ID)) {
            (Some(bot_token), Some(channel_id)) => Some(TelegramSettings {
                bot_token,
                channel_id,
            }),
            (token, _) if require_telegram => {
                return Err(ConfigError::Missing {
                    name: if token.is_none() {
                        TELEGRAM_BOT_TOKEN
                    } else {
                        TELEGRAM_CHANNEL_ID
                    },
                });
            }
            _ => None,
        };

        let log = LogSettings {
            filter: lookup(LOG_FILTER).unwrap_or_else(|| String::from(DEFAULT_LOG_FILTER)),
            file: lookup(LOG_FILE).map(PathBuf::from),
        };

        let ttl_hours: u64 = parsed(&lookup, CACHE_TTL_HOURS)?.unwrap_or(DEFAULT_CACHE_TTL_HOURS);
        let cache = CacheSettings {
            dir: lookup(CACHE_DIR).map(PathBuf::from),
            ttl: Duration::from_secs(ttl_hours.saturating_mul(60 * 60)),
        };

        let timeout_secs: u64 =
            parsed(&lookup, HTTP_TIMEOUT_SECS)?.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        let max_attempts: u32 = parsed(&lookup, MAX_ATTEMPTS)?.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: MAX_ATTEMPTS,
                value: max_attempts.to_string(),
                reason: String::from("at least one attempt is required"),
            });
        }
        let http = HttpSettings {
            timeout: Duration::from_secs(timeout_secs),
            max_attempts,
        };

        Ok(Settings {
            tmdb,
            telegram,
            log,
            cache,
            http,
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    lookup(name).ok_or(ConfigError::Missing { name })
}

fn parsed<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                name,
                value: raw,
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: String::from("expected true or false"),
        }),
    }
}

// Credentials are redacted so settings can be logged.
impl Debug for TmdbSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbSettings")
            .field("api_key", &"<redacted>")
            .field("language", &self.language)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Debug for TelegramSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .finish()
    }
}
