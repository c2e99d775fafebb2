use reelbot_tmdb_client::{ExternalId, LookupRequest};

/// Describes a release that matched a filter in the download automation tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseParameters {
    pub torrent_name: String,
    pub indexer: String,
    pub group: String,
    pub year: u16,
    /// The movie title as parsed from the release name.
    pub title: String,
    /// Either a number of bytes or a human readable size such as `10GB`.
    pub file_size: String,
    /// Pins the lookup to a specific movie instead of searching by title.
    pub external_id: Option<ExternalId>,
}

impl ReleaseParameters {
    pub fn lookup_request(&self) -> LookupRequest {
        LookupRequest {
            title: self.title.clone(),
            year: self.year,
            external_id: self.external_id.clone(),
        }
    }
}
