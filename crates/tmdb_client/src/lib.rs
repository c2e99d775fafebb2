//! A client for The Movie Database (TMDB) that resolves a release's title and year (or an
//! explicit TMDB/IMDb id) into a [MovieRecord].

mod api;
pub mod cache;
mod client;
mod error;
mod lookup;
pub mod models;
mod movie_record;
mod provider;

pub use api::{TmdbApi, DEFAULT_BASE_URL};
pub use client::{select_best_match, MetadataClient, DEFAULT_LANGUAGE};
pub use error::TmdbError;
pub use lookup::{ExternalId, LookupKey, LookupRequest};
pub use movie_record::{MovieRecord, IMAGE_BASE_URL};
pub use provider::MovieProvider;
