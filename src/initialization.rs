use anyhow::{Context, Result};
use reelbot_common::retry::RetryPolicy;
use reelbot_common::Settings;
use reelbot_release::facades::FormatOptions;
use reelbot_release::ReleasePipeline;
use reelbot_telegram_client::TelegramBot;
use reelbot_tmdb_client::cache::build_cache;
use reelbot_tmdb_client::{MetadataClient, TmdbApi};

pub type Pipeline = ReleasePipeline<TmdbApi, TelegramBot>;

fn build_metadata_client(settings: &Settings) -> Result<MetadataClient<TmdbApi>> {
    let retry = RetryPolicy::new(settings.http.max_attempts);
    let api = TmdbApi::new(&settings.tmdb.api_key, settings.http.timeout, retry)
        .context("Failed to create the TMDB client.")?;
    let cache = build_cache(settings.cache.dir.as_deref());

    Ok(MetadataClient::new(
        api,
        cache,
        &settings.tmdb.language,
        settings.cache.ttl,
    ))
}

fn build_telegram_bot(settings: &Settings) -> Result<TelegramBot> {
    let telegram = settings
        .telegram
        .as_ref()
        .context("Telegram settings are required to send messages.")?;
    let retry = RetryPolicy::new(settings.http.max_attempts);
    TelegramBot::new(telegram, settings.http.timeout, retry)
        .context("Failed to create the Telegram client.")
}

/// Wire up a [Pipeline] from the [Settings]. Dry runs get no Telegram client.
pub fn build_pipeline(settings: &Settings, dry_run: bool) -> Result<Pipeline> {
    let metadata = build_metadata_client(settings)?;
    let sender = if dry_run {
        None
    } else {
        Some(build_telegram_bot(settings)?)
    };

    Ok(ReleasePipeline::new(
        metadata,
        sender,
        FormatOptions::default(),
    ))
}
