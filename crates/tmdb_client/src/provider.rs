use crate::models::{Credits, MovieDetails, SearchResult};
use crate::TmdbError;
use async_trait::async_trait;

/// The raw TMDB endpoints reelbot needs. [crate::TmdbApi] talks to the real service; tests
/// substitute their own implementation.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// `GET /search/movie`, in TMDB's relevance order.
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
        language: &str,
    ) -> Result<Vec<SearchResult>, TmdbError>;

    /// `GET /find/{imdb_id}?external_source=imdb_id`, movie results only.
    async fn find_by_imdb_id(
        &self,
        imdb_id: &str,
        language: &str,
    ) -> Result<Vec<SearchResult>, TmdbError>;

    /// `GET /movie/{tmdb_id}?append_to_response=credits`.
    async fn movie_details(&self, tmdb_id: u64, language: &str)
        -> Result<MovieDetails, TmdbError>;

    /// `GET /movie/{tmdb_id}/credits`.
    async fn movie_credits(&self, tmdb_id: u64) -> Result<Credits, TmdbError>;
}
