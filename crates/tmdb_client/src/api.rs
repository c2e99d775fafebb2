//! The HTTP implementation of [MovieProvider] for TMDB's v3 API.

use crate::models::{Credits, FindResponse, MovieDetails, PaginatedResponse, SearchResult};
use crate::{MovieProvider, TmdbError};
use async_trait::async_trait;
use reelbot_common::retry::{AttemptError, RetryFailure, RetryPolicy};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const USER_AGENT: &str = concat!("reelbot/", env!("CARGO_PKG_VERSION"));
// Error bodies are only kept for logging; don't drag whole HTML error pages around.
const MAX_ERROR_BODY: usize = 256;

/// A TMDB client over HTTPS. Every request goes through the configured [RetryPolicy].
pub struct TmdbApi {
    client: Client,
    base_url: String,
    credential: String,
    retry: RetryPolicy,
}

/// Why a single request attempt failed. Transport errors are stored without their URL since it
/// carries the `api_key` query parameter.
#[derive(Debug)]
enum RequestError {
    Transport(reqwest::Error),
    Status { status: StatusCode, body: String },
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::Transport(e) => write!(f, "{}", e),
            RequestError::Status { status, body } => write!(f, "HTTP {}: {}", status, body),
        }
    }
}

impl TmdbApi {
    /// Create a [TmdbApi] with the given credential, per-request timeout, and retry policy.
    ///
    /// The credential may be a v3 API key or a v4 read access token.
    pub fn new(credential: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self, TmdbError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TmdbError::Provider {
                message: format!("failed to build HTTP client: {}", e),
                attempts: 0,
            })?;
        Ok(TmdbApi {
            client,
            base_url: String::from(DEFAULT_BASE_URL),
            credential: String::from(credential),
            retry,
        })
    }

    /// Point the client at some other TMDB-compatible server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = String::from(base_url.trim_end_matches('/'));
        self
    }

    // v4 read access tokens are JWTs; v3 keys are short hex strings.
    fn is_access_token(&self) -> bool {
        self.credential.starts_with("eyJ")
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, path);
        let url = url.as_str();
        debug!(endpoint, path, "Sending TMDB request.");
        let body = self
            .retry
            .run(endpoint, move |_| self.send_once(url, query))
            .await
            .map_err(|failure| to_tmdb_error(endpoint, failure))?;

        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| TmdbError::Parse {
            endpoint: String::from(endpoint),
            path: e.path().to_string(),
            message: e.into_inner().to_string(),
        })
    }

    async fn send_once(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String, AttemptError<RequestError>> {
        let mut request = self.client.get(url).query(query);
        request = if self.is_access_token() {
            request.bearer_auth(&self.credential)
        } else {
            request.query(&[("api_key", self.credential.as_str())])
        };

        let response = request.send().await.map_err(classify_transport)?;
        let status = response.status();
        if status.is_success() {
            return response
                .text()
                .await
                .map_err(|e| AttemptError::transient(RequestError::Transport(e.without_url())));
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| body.is_char_boundary(*i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        let error = RequestError::Status { status, body };
        if self.retry.is_retryable_status(status.as_u16()) {
            Err(AttemptError::Transient { error, retry_after })
        } else {
            Err(AttemptError::Permanent(error))
        }
    }
}

fn classify_transport(error: reqwest::Error) -> AttemptError<RequestError> {
    let error = error.without_url();
    if error.is_builder() {
        AttemptError::Permanent(RequestError::Transport(error))
    } else {
        // Timeouts, refused connections, resets and truncated bodies are all worth retrying.
        AttemptError::transient(RequestError::Transport(error))
    }
}

fn to_tmdb_error(endpoint: &str, failure: RetryFailure<RequestError>) -> TmdbError {
    let RetryFailure {
        error, attempts, ..
    } = failure;
    match error {
        RequestError::Status { status, .. } if status == StatusCode::NOT_FOUND => {
            TmdbError::NotFound(format!("{} returned 404", endpoint))
        }
        RequestError::Status { status, .. } if status == StatusCode::UNAUTHORIZED => {
            TmdbError::Provider {
                message: format!("{} rejected the TMDB credential (HTTP 401)", endpoint),
                attempts,
            }
        }
        other => TmdbError::Provider {
            message: format!("{} failed: {}", endpoint, other),
            attempts,
        },
    }
}

#[async_trait]
impl MovieProvider for TmdbApi {
    #[instrument(skip(self))]
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
        language: &str,
    ) -> Result<Vec<SearchResult>, TmdbError> {
        let mut params = vec![
            ("query", String::from(query)),
            ("language", String::from(language)),
            ("include_adult", String::from("false")),
            ("page", String::from("1")),
        ];
        if let Some(y) = year {
            params.push(("year", y.to_string()));
        }
        let page: PaginatedResponse<SearchResult> =
            self.get_json("search/movie", "/search/movie", &params).await?;
        debug!(total_results = page.total_results, "TMDB search returned.");
        Ok(page.results)
    }

    #[instrument(skip(self))]
    async fn find_by_imdb_id(
        &self,
        imdb_id: &str,
        language: &str,
    ) -> Result<Vec<SearchResult>, TmdbError> {
        let params = [
            ("external_source", String::from("imdb_id")),
            ("language", String::from(language)),
        ];
        let found: FindResponse = self
            .get_json("find", &format!("/find/{}", imdb_id), &params)
            .await?;
        Ok(found.movie_results)
    }

    #[instrument(skip(self))]
    async fn movie_details(
        &self,
        tmdb_id: u64,
        language: &str,
    ) -> Result<MovieDetails, TmdbError> {
        let params = [
            ("language", String::from(language)),
            ("append_to_response", String::from("credits")),
        ];
        self.get_json("movie", &format!("/movie/{}", tmdb_id), &params)
            .await
    }

    #[instrument(skip(self))]
    async fn movie_credits(&self, tmdb_id: u64) -> Result<Credits, TmdbError> {
        self.get_json("movie/credits", &format!("/movie/{}/credits", tmdb_id), &[])
            .await
    }
}
