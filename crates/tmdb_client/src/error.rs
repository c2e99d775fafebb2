use thiserror::Error;

/// Errors surfaced by the TMDB client. The variant names double as the error kinds that end up
/// in the logs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TmdbError {
    /// TMDB answered, but no movie matched the lookup.
    #[error("NotFound: {0}")]
    NotFound(String),
    /// TMDB was unreachable, kept failing, or rejected the request outright.
    #[error("ProviderError: {message} (after {attempts} attempt(s))")]
    Provider { message: String, attempts: u32 },
    /// TMDB answered with a payload that doesn't match the expected shape.
    #[error("ParseError: unexpected {endpoint} response at `{path}`: {message}")]
    Parse {
        endpoint: String,
        path: String,
        message: String,
    },
}

impl TmdbError {
    /// A short, stable name for the kind of error.
    pub fn kind(&self) -> &'static str {
        match self {
            TmdbError::NotFound(_) => "NotFound",
            TmdbError::Provider { .. } => "ProviderError",
            TmdbError::Parse { .. } => "ParseError",
        }
    }
}
