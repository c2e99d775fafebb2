//! Formats a resolved [MovieRecord] and the [ReleaseParameters] it was resolved for into a
//! [MessageData] to send to Telegram.

use crate::facades::file_info::{bitrate_mbps, format_bitrate, FileSize};
use crate::facades::labels::Labels;
use crate::models::ReleaseParameters;
use reelbot_telegram_client::message::{MessageData, MessageDataBuilder, MessageLink};
use reelbot_tmdb_client::MovieRecord;
use tracing::debug;

const IMDB_TITLE_URL: &str = "https://www.imdb.com/title";
const LETTERBOXD_IMDB_URL: &str = "https://letterboxd.com/imdb";
const DOUBAN_SEARCH_URL: &str = "https://search.douban.com/movie/subject_search?search_text=";
const ELLIPSIS: char = '…';

/// Knobs for [format_release_message].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub max_directors: usize,
    pub max_cast: usize,
    /// Longer overviews are cut and end in an ellipsis. Zero leaves the overview out.
    pub overview_max_chars: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            max_directors: 3,
            max_cast: 3,
            overview_max_chars: 500,
        }
    }
}

/// Build the notification for `release`. The same inputs always produce the same message; lines
/// whose data is missing are left out.
pub fn format_release_message(
    record: &MovieRecord,
    release: &ReleaseParameters,
    options: &FormatOptions,
) -> MessageData {
    debug!(tmdb_id = record.tmdb_id, "Formatting release message.");
    let labels = Labels::for_language(&record.language);
    let mut builder = MessageDataBuilder::new();

    builder.add_hashtags(&[release.indexer.as_str(), release.group.as_str()]);
    builder.break_character();

    builder.add_key_value(labels.title, &format_title(record, release.year));
    if let Some(original) = &record.original_title {
        if original != &record.title {
            builder.add_key_value(labels.original_title, original);
        }
    }
    add_names(
        &mut builder,
        labels.director,
        &record.directors,
        options.max_directors,
        labels.list_separator,
    );
    add_names(
        &mut builder,
        labels.cast,
        &record.cast,
        options.max_cast,
        labels.list_separator,
    );
    add_names(
        &mut builder,
        labels.genres,
        &record.genres,
        usize::MAX,
        labels.list_separator,
    );
    if !release.torrent_name.trim().is_empty() {
        builder.add_key_value_underlined(labels.torrent, release.torrent_name.trim());
    }
    builder.add_key_value(labels.info, &release_info(record, release, &labels));

    if let Some(overview) = &record.overview {
        if options.overview_max_chars > 0 && !overview.trim().is_empty() {
            builder.break_character();
            builder.add_quote(&truncate_chars(overview.trim(), options.overview_max_chars));
        }
    }

    let links = movie_links(record);
    if !links.is_empty() {
        builder.break_character();
        builder.add_links(&links);
    }
    if let Some(preview) = record.preview_image_url() {
        builder.preview_url(&preview);
    }

    builder.to_message_data()
}

fn format_title(record: &MovieRecord, fallback_year: u16) -> String {
    let year = record.year().unwrap_or_else(|| i32::from(fallback_year));
    format!("{} ({})", record.title, year)
}

fn add_names(
    builder: &mut MessageDataBuilder,
    key: &str,
    names: &[String],
    limit: usize,
    separator: &str,
) {
    let shown: Vec<&str> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .take(limit)
        .collect();
    if shown.is_empty() {
        return;
    }
    builder.add_key_value(key, &shown.join(separator));
}

/// `group / indexer / size / runtime / bitrate`, leaving out whatever is unknown.
fn release_info(record: &MovieRecord, release: &ReleaseParameters, labels: &Labels) -> String {
    let mut parts: Vec<String> = [release.group.trim(), release.indexer.trim()]
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect();
    let size = FileSize::parse(&release.file_size);
    if let Some(s) = &size {
        parts.push(s.display());
    }
    let runtime = record.runtime.filter(|r| *r > 0);
    if let Some(minutes) = runtime {
        parts.push(format!("{} {}", minutes, labels.minutes));
    }
    let bytes = size.as_ref().and_then(FileSize::bytes);
    if let (Some(bytes), Some(minutes)) = (bytes, runtime) {
        if let Some(mbps) = bitrate_mbps(bytes, minutes) {
            parts.push(format_bitrate(mbps));
        }
    }

    parts.join(" / ")
}

/// The movie's TMDB page, plus IMDb, Letterboxd and Douban when the IMDb id is known.
pub fn movie_links(record: &MovieRecord) -> Vec<MessageLink> {
    let mut links = vec![MessageLink::new("TMDB", &record.tmdb_url())];
    if let Some(imdb_id) = &record.imdb_id {
        links.push(MessageLink::new(
            "IMDb",
            &format!("{}/{}/", IMDB_TITLE_URL, imdb_id),
        ));
        links.push(MessageLink::new(
            "Letterboxd",
            &format!("{}/{}/", LETTERBOXD_IMDB_URL, imdb_id),
        ));
        links.push(MessageLink::new(
            "Douban",
            &format!("{}{}", DOUBAN_SEARCH_URL, imdb_id),
        ));
    }
    links
}

/// Cut `text` to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return String::from(text);
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push(ELLIPSIS);
    truncated
}
