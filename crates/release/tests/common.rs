use async_trait::async_trait;
use chrono::NaiveDate;
use reelbot_release::models::ReleaseParameters;
use reelbot_telegram_client::message::MessageData;
use reelbot_telegram_client::{TelegramClient, TelegramError};
use reelbot_tmdb_client::cache::MemoryCache;
use reelbot_tmdb_client::models::{
    CastMember, Credits, CrewMember, Genre, MovieDetails, SearchResult,
};
use reelbot_tmdb_client::{MetadataClient, MovieProvider, TmdbError};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Fake implementation of [TelegramClient] that captures the [MessageData] provided to it.
#[derive(Clone)]
pub struct SpyTelegramClient {
    messages: Arc<RwLock<Vec<MessageData>>>,
    failure: Option<TelegramError>,
}

impl SpyTelegramClient {
    pub fn new() -> Self {
        SpyTelegramClient {
            messages: Arc::new(RwLock::new(Vec::<MessageData>::new())),
            failure: None,
        }
    }

    /// A spy that records every message and then rejects it.
    pub fn failing(error: TelegramError) -> Self {
        SpyTelegramClient {
            failure: Some(error),
            ..Self::new()
        }
    }

    pub async fn messages(&self) -> Vec<MessageData> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl TelegramClient for SpyTelegramClient {
    async fn send_message(&self, message: &MessageData) -> Result<(), TelegramError> {
        let mut messages = self.messages.write().await;
        messages.push(message.clone());

        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

/// Fake implementation of [MovieProvider] that knows a single movie, Dune (2021).
#[derive(Clone, Default)]
pub struct FakeProvider {
    /// When set, every call fails with this error.
    pub failure: Option<TmdbError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeProvider {
    pub fn failing(error: TmdbError) -> Self {
        FakeProvider {
            failure: Some(error),
            ..Default::default()
        }
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
        _language: &str,
    ) -> Result<Vec<SearchResult>, TmdbError> {
        self.record(format!("search:{}:{:?}", query, year))?;
        if !query.eq_ignore_ascii_case("dune") || year != Some(2021) {
            return Ok(vec![]);
        }
        Ok(vec![SearchResult {
            id: 438631,
            title: String::from("Dune"),
            original_title: Some(String::from("Dune")),
            release_date: NaiveDate::from_ymd_opt(2021, 9, 15),
            popularity: 120.5,
        }])
    }

    async fn find_by_imdb_id(
        &self,
        imdb_id: &str,
        _language: &str,
    ) -> Result<Vec<SearchResult>, TmdbError> {
        self.record(format!("find:{}", imdb_id))?;
        Ok(vec![])
    }

    async fn movie_details(
        &self,
        tmdb_id: u64,
        _language: &str,
    ) -> Result<MovieDetails, TmdbError> {
        self.record(format!("details:{}", tmdb_id))?;
        if tmdb_id != 438631 {
            return Err(TmdbError::NotFound(String::from("movie returned 404")));
        }
        Ok(MovieDetails {
            id: 438631,
            title: String::from("Dune"),
            imdb_id: Some(String::from("tt1160419")),
            original_title: Some(String::from("Dune")),
            overview: Some(String::from(
                "Paul Atreides leads nomadic tribes in a battle.",
            )),
            release_date: NaiveDate::from_ymd_opt(2021, 9, 15),
            runtime: Some(155),
            genres: vec![Genre {
                id: 878,
                name: String::from("Science Fiction"),
            }],
            poster_path: Some(String::from("/poster.jpg")),
            backdrop_path: Some(String::from("/backdrop.jpg")),
            credits: Some(Credits {
                cast: vec![CastMember {
                    name: String::from("Timothée Chalamet"),
                    character: Some(String::from("Paul Atreides")),
                    order: Some(0),
                }],
                crew: vec![CrewMember {
                    name: String::from("Denis Villeneuve"),
                    job: Some(String::from("Director")),
                    department: Some(String::from("Directing")),
                }],
            }),
        })
    }

    async fn movie_credits(&self, tmdb_id: u64) -> Result<Credits, TmdbError> {
        self.record(format!("credits:{}", tmdb_id))?;
        Ok(Credits::default())
    }
}

pub fn metadata_client(provider: FakeProvider) -> MetadataClient<FakeProvider> {
    MetadataClient::new(
        provider,
        Box::new(MemoryCache::new()),
        "en-US",
        Duration::from_secs(3600),
    )
}

pub fn release(title: &str, year: u16) -> ReleaseParameters {
    ReleaseParameters {
        torrent_name: format!("{}.{}.2160p.WEB-DL.DDP5.1.Atmos.HDR.H.265-FLUX", title, year),
        indexer: String::from("SomeTracker"),
        group: String::from("FLUX"),
        year,
        title: String::from(title),
        file_size: String::from("10737418240"),
        external_id: None,
    }
}

/// Collects formatted log lines while the guard returned by [LogCapture::install] is alive.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.buffer.lock().unwrap())
            .lines()
            .map(String::from)
            .collect()
    }
}

pub struct LogCaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for LogCaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogCaptureWriter {
            buffer: self.buffer.clone(),
        }
    }
}
