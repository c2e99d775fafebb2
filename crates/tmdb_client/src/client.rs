use crate::cache::MovieCache;
use crate::models::SearchResult;
use crate::{ExternalId, LookupKey, LookupRequest, MovieProvider, MovieRecord, TmdbError};
use chrono::Datelike;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// The language TMDB falls back to when a localized field is empty.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Resolves [LookupRequest]s into [MovieRecord]s, consulting a [MovieCache] before talking to
/// the [MovieProvider].
pub struct MetadataClient<P: MovieProvider> {
    provider: P,
    cache: Box<dyn MovieCache>,
    language: String,
    cache_ttl: Duration,
}

impl<P: MovieProvider> MetadataClient<P> {
    pub fn new(provider: P, cache: Box<dyn MovieCache>, language: &str, cache_ttl: Duration) -> Self {
        MetadataClient {
            provider,
            cache,
            language: String::from(language),
            cache_ttl,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve `request` into a [MovieRecord].
    ///
    /// A pinned external id is looked up directly; otherwise TMDB is searched by title and year.
    /// Fails with [TmdbError::NotFound] when nothing matches.
    #[instrument(skip(self), fields(language = %self.language))]
    pub async fn resolve(&self, request: &LookupRequest) -> Result<MovieRecord, TmdbError> {
        let key = LookupKey::for_request(request, &self.language);
        if let Some(record) = self.cache.get(&key) {
            info!(key = %key, tmdb_id = record.tmdb_id, "Resolved movie from the cache.");
            return Ok(record);
        }

        let tmdb_id = match &request.external_id {
            Some(ExternalId::Tmdb(id)) => *id,
            Some(ExternalId::Imdb(imdb_id)) => self.find_by_imdb_id(imdb_id).await?,
            None => self.search(&request.title, request.year).await?,
        };
        let record = self.fetch_record(tmdb_id).await?;
        info!(key = %key, tmdb_id, title = %record.title, "Resolved movie from TMDB.");

        if let Err(e) = self.cache.put(&key, &record, self.cache_ttl) {
            warn!(key = %key, error = %e, "Failed to cache the resolved movie.");
        }

        Ok(record)
    }

    async fn search(&self, title: &str, year: u16) -> Result<u64, TmdbError> {
        let results = self
            .provider
            .search_movies(title, Some(year), &self.language)
            .await?;
        debug!(count = results.len(), "Search returned candidates.");
        select_best_match(&results, year)
            .map(|r| r.id)
            .ok_or_else(|| TmdbError::NotFound(format!("no movie matches \"{}\" ({})", title, year)))
    }

    async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<u64, TmdbError> {
        let results = self
            .provider
            .find_by_imdb_id(imdb_id, &self.language)
            .await?;
        results
            .first()
            .map(|r| r.id)
            .ok_or_else(|| TmdbError::NotFound(format!("no movie has IMDb id {}", imdb_id)))
    }

    async fn fetch_record(&self, tmdb_id: u64) -> Result<MovieRecord, TmdbError> {
        let mut details = self.provider.movie_details(tmdb_id, &self.language).await?;
        let credits = match details.credits.take() {
            Some(c) => c,
            None => {
                debug!(tmdb_id, "Details came without credits; fetching them separately.");
                self.provider.movie_credits(tmdb_id).await?
            }
        };

        let overview_is_blank = details
            .overview
            .as_deref()
            .map_or(true, |o| o.trim().is_empty());
        let fallback = if overview_is_blank && !self.language.eq_ignore_ascii_case(DEFAULT_LANGUAGE)
        {
            debug!(tmdb_id, "Localized overview is empty; fetching the default language.");
            Some(self.provider.movie_details(tmdb_id, DEFAULT_LANGUAGE).await?)
        } else {
            None
        };

        Ok(MovieRecord::assemble(
            details,
            credits,
            fallback,
            &self.language,
        ))
    }
}

/// Choose the best search result for `year`: the highest-ranked result released that year, or
/// failing that the highest-ranked result overall.
pub fn select_best_match(results: &[SearchResult], year: u16) -> Option<&SearchResult> {
    results
        .iter()
        .find(|r| r.release_date.map(|d| d.year()) == Some(i32::from(year)))
        .or_else(|| results.first())
}
