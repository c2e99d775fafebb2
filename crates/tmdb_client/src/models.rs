//! Models to be used when deserializing TMDB v3 response bodies. Only the fields reelbot reads
//! are modelled; everything else in the payload is ignored.
//! Source: https://developer.themoviedb.org/reference/intro/getting-started

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// One page of results from a TMDB list endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_results: u32,
}

/// A movie as listed by `/search/movie` and `/find/{external_id}`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: u64,
    pub title: String,
    pub original_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub popularity: f64,
}

/// The response of `/find/{external_id}`; TV and people results are not needed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FindResponse {
    #[serde(default)]
    pub movie_results: Vec<SearchResult>,
}

/// The response of `/movie/{movie_id}`, optionally with `append_to_response=credits`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub imdb_id: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub credits: Option<Credits>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// The response of `/movie/{movie_id}/credits` (or the appended `credits` object).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CrewMember {
    pub name: String,
    pub job: Option<String>,
    pub department: Option<String>,
}

// TMDB sends "" (and occasionally null) for unknown release dates.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}
