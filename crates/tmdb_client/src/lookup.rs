use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// An identifier that names exactly one movie, bypassing the title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalId {
    /// A TMDB movie id, e.g. `438631`.
    Tmdb(u64),
    /// An IMDb title id, e.g. `tt1160419`.
    Imdb(String),
}

impl FromStr for ExternalId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(id) = trimmed.parse::<u64>() {
            return Ok(ExternalId::Tmdb(id));
        }
        let lower = trimmed.to_ascii_lowercase();
        match lower.strip_prefix("tt") {
            Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                Ok(ExternalId::Imdb(lower))
            }
            _ => Err(format!(
                "\"{}\" is neither a TMDB id (digits) nor an IMDb id (tt followed by digits)",
                trimmed
            )),
        }
    }
}

impl Display for ExternalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExternalId::Tmdb(id) => write!(f, "tmdb:{}", id),
            ExternalId::Imdb(id) => write!(f, "imdb:{}", id),
        }
    }
}

/// What to look up: the parsed title and year of a release, optionally pinned to an external id.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub title: String,
    pub year: u16,
    pub external_id: Option<ExternalId>,
}

/// The cache key for a lookup. Two requests share a key only when they are certain to resolve
/// to the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    /// Build the key for `request` resolved in `language`. An external id takes precedence over
    /// the title and year; titles are compared case- and whitespace-insensitively.
    pub fn for_request(request: &LookupRequest, language: &str) -> Self {
        let subject = match &request.external_id {
            Some(id) => format!("id:{}", id),
            None => format!("title:{}:{}", normalize_title(&request.title), request.year),
        };
        LookupKey(format!("{}|{}", language, subject))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LookupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
