use async_trait::async_trait;
use chrono::NaiveDate;
use reelbot_tmdb_client::models::{
    CastMember, Credits, CrewMember, Genre, MovieDetails, SearchResult,
};
use reelbot_tmdb_client::{MovieProvider, TmdbError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Fake implementation of [MovieProvider] that serves canned data and records every call made
/// to it.
#[derive(Default)]
pub struct FakeProvider {
    pub search_results: Vec<SearchResult>,
    pub find_results: Vec<SearchResult>,
    /// Details keyed by language.
    pub details: HashMap<String, MovieDetails>,
    pub credits: Credits,
    /// When set, every call fails with this error.
    pub failure: Option<TmdbError>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: String) -> Result<(), TmdbError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MovieProvider for FakeProvider {
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
        language: &str,
    ) -> Result<Vec<SearchResult>, TmdbError> {
        self.record(format!("search:{}:{:?}:{}", query, year, language))?;
        Ok(self.search_results.clone())
    }

    async fn find_by_imdb_id(
        &self,
        imdb_id: &str,
        language: &str,
    ) -> Result<Vec<SearchResult>, TmdbError> {
        self.record(format!("find:{}:{}", imdb_id, language))?;
        Ok(self.find_results.clone())
    }

    async fn movie_details(
        &self,
        tmdb_id: u64,
        language: &str,
    ) -> Result<MovieDetails, TmdbError> {
        self.record(format!("details:{}:{}", tmdb_id, language))?;
        self.details
            .get(language)
            .cloned()
            .ok_or_else(|| TmdbError::NotFound(format!("movie returned 404 for {}", tmdb_id)))
    }

    async fn movie_credits(&self, tmdb_id: u64) -> Result<Credits, TmdbError> {
        self.record(format!("credits:{}", tmdb_id))?;
        Ok(self.credits.clone())
    }
}

pub fn dune_search_result() -> SearchResult {
    SearchResult {
        id: 438631,
        title: String::from("Dune"),
        original_title: Some(String::from("Dune")),
        release_date: NaiveDate::from_ymd_opt(2021, 9, 15),
        popularity: 120.5,
    }
}

pub fn dune_credits() -> Credits {
    Credits {
        cast: vec![
            CastMember {
                name: String::from("Timothée Chalamet"),
                character: Some(String::from("Paul Atreides")),
                order: Some(0),
            },
            CastMember {
                name: String::from("Rebecca Ferguson"),
                character: Some(String::from("Lady Jessica")),
                order: Some(1),
            },
        ],
        crew: vec![CrewMember {
            name: String::from("Denis Villeneuve"),
            job: Some(String::from("Director")),
            department: Some(String::from("Directing")),
        }],
    }
}

pub fn dune_details(overview: &str, with_credits: bool) -> MovieDetails {
    MovieDetails {
        id: 438631,
        title: String::from("Dune"),
        imdb_id: Some(String::from("tt1160419")),
        original_title: Some(String::from("Dune")),
        overview: Some(String::from(overview)),
        release_date: NaiveDate::from_ymd_opt(2021, 9, 15),
        runtime: Some(155),
        genres: vec![Genre {
            id: 878,
            name: String::from("Science Fiction"),
        }],
        poster_path: Some(String::from("/poster.jpg")),
        backdrop_path: Some(String::from("/backdrop.jpg")),
        credits: if with_credits {
            Some(dune_credits())
        } else {
            None
        },
    }
}

/// A provider that finds Dune (2021) in English.
pub fn dune_provider() -> FakeProvider {
    let mut details = HashMap::new();
    details.insert(
        String::from("en-US"),
        dune_details("Paul Atreides leads nomadic tribes in a battle.", true),
    );
    FakeProvider {
        search_results: vec![dune_search_result()],
        find_results: vec![dune_search_result()],
        details,
        ..Default::default()
    }
}
