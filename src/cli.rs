use clap::Parser;
use reelbot_release::models::ReleaseParameters;
use reelbot_tmdb_client::ExternalId;

/// Announces a matched movie release to a Telegram channel, enriched with TMDB metadata.
///
/// Flag names use underscores so existing download-client hooks keep working.
#[derive(Parser, Debug)]
#[command(name = "reelbot", version)]
pub struct Cli {
    /// Full name of the matched torrent
    #[arg(long = "torrent_name")]
    pub torrent_name: String,

    /// Indexer the release was found on
    #[arg(long = "indexer_name")]
    pub indexer_name: String,

    /// Release group
    #[arg(long = "group_name")]
    pub group_name: String,

    /// Release year of the movie
    #[arg(long = "release_year")]
    pub release_year: u16,

    /// Movie title as parsed from the release name
    #[arg(long = "parsed_title")]
    pub parsed_title: String,

    /// Size in bytes, or a human readable size such as 10GB
    #[arg(long = "file_size")]
    pub file_size: String,

    /// TMDB id (digits) or IMDb id (tt...) to use instead of searching by title
    #[arg(long = "external_id", visible_alias = "tmdb_id")]
    pub external_id: Option<ExternalId>,

    /// Print the message instead of sending it; Telegram credentials are not needed
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn release_parameters(&self) -> ReleaseParameters {
        ReleaseParameters {
            torrent_name: self.torrent_name.clone(),
            indexer: self.indexer_name.clone(),
            group: self.group_name.clone(),
            year: self.release_year,
            title: self.parsed_title.clone(),
            file_size: self.file_size.clone(),
            external_id: self.external_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use clap::{CommandFactory, Parser};
    use reelbot_tmdb_client::ExternalId;

    const REQUIRED: [&str; 13] = [
        "reelbot",
        "--torrent_name",
        "Dune.2021.2160p.WEB-DL-FLUX",
        "--indexer_name",
        "SomeTracker",
        "--group_name",
        "FLUX",
        "--release_year",
        "2021",
        "--parsed_title",
        "Dune",
        "--file_size",
        "10737418240",
    ];

    #[test]
    pub fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    pub fn parse_maps_flags_to_release_parameters() {
        // Act
        let actual = Cli::try_parse_from(REQUIRED).unwrap().release_parameters();

        // Assert
        assert_eq!("Dune", actual.title);
        assert_eq!(2021, actual.year);
        assert_eq!("FLUX", actual.group);
        assert_eq!("SomeTracker", actual.indexer);
        assert_eq!("10737418240", actual.file_size);
        assert_eq!(None, actual.external_id);
    }

    #[test]
    pub fn parse_accepts_tmdb_id_alias() {
        // Arrange
        let mut args = REQUIRED.to_vec();
        args.extend(["--tmdb_id", "438631", "--dry-run"]);

        // Act
        let actual = Cli::try_parse_from(args).unwrap();

        // Assert
        assert_eq!(Some(ExternalId::Tmdb(438631)), actual.external_id);
        assert!(actual.dry_run);
    }

    #[test]
    pub fn parse_rejects_non_numeric_year() {
        // Arrange
        let mut args = REQUIRED.to_vec();
        args[8] = "twenty";

        // Act
        let actual = Cli::try_parse_from(args);

        // Assert
        assert!(actual.is_err());
    }

    #[test]
    pub fn parse_rejects_malformed_external_id() {
        // Arrange
        let mut args = REQUIRED.to_vec();
        args.extend(["--external_id", "nm0000123"]);

        // Act
        let actual = Cli::try_parse_from(args);

        // Assert
        assert!(actual.is_err());
    }
}
