use crate::models::{Credits, MovieDetails};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Base URL for full-size TMDB images; append a `poster_path` or `backdrop_path`.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";
const MOVIE_PAGE_BASE_URL: &str = "https://www.themoviedb.org/movie";
const MAX_DIRECTORS: usize = 3;
const MAX_CAST: usize = 10;

/// Everything reelbot knows about a movie once a lookup has been resolved. Built once per
/// lookup and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub tmdb_id: u64,
    pub imdb_id: Option<String>,
    /// The title in the language the record was resolved in.
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    /// Billed cast, in billing order.
    pub cast: Vec<String>,
    /// Artwork paths prefer the default-language details when those were fetched, since localized
    /// posters often carry translated text.
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// The TMDB language code used for the localized fields.
    pub language: String,
}

impl MovieRecord {
    /// Assemble a [MovieRecord] from a detail response and its credits.
    ///
    /// `fallback` holds the default-language details when they were fetched: its overview fills
    /// a blank localized one and its artwork is preferred. Blank strings and zero runtimes become
    /// [Option::None].
    pub fn assemble(
        details: MovieDetails,
        credits: Credits,
        fallback: Option<MovieDetails>,
        language: &str,
    ) -> Self {
        let (fallback_overview, fallback_poster, fallback_backdrop) = match fallback {
            Some(f) => (f.overview, f.poster_path, f.backdrop_path),
            None => (None, None, None),
        };
        let original_title = non_blank(details.original_title);
        let title = match non_blank(Some(details.title)) {
            Some(t) => t,
            None => original_title.clone().unwrap_or_default(),
        };
        let overview = non_blank(details.overview).or_else(|| non_blank(fallback_overview));

        let mut directors: Vec<String> = Vec::new();
        for member in credits.crew {
            if directors.len() >= MAX_DIRECTORS {
                break;
            }
            if member.job.as_deref() == Some("Director") && !directors.contains(&member.name) {
                directors.push(member.name);
            }
        }

        let mut cast = credits.cast;
        // Stable sort keeps TMDB's ordering for members without a billing position.
        cast.sort_by_key(|member| member.order.unwrap_or(u32::MAX));
        let cast: Vec<String> = cast
            .into_iter()
            .filter_map(|member| non_blank(Some(member.name)))
            .take(MAX_CAST)
            .collect();

        MovieRecord {
            tmdb_id: details.id,
            imdb_id: non_blank(details.imdb_id),
            title,
            original_title,
            overview,
            release_date: details.release_date,
            runtime: details.runtime.filter(|minutes| *minutes > 0),
            genres: details
                .genres
                .into_iter()
                .filter_map(|g| non_blank(Some(g.name)))
                .collect(),
            directors,
            cast,
            poster_path: non_blank(fallback_poster).or_else(|| non_blank(details.poster_path)),
            backdrop_path: non_blank(fallback_backdrop)
                .or_else(|| non_blank(details.backdrop_path)),
            language: String::from(language),
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    /// The movie's page on themoviedb.org.
    pub fn tmdb_url(&self) -> String {
        format!("{}/{}", MOVIE_PAGE_BASE_URL, self.tmdb_id)
    }

    /// A wide image for link previews: the backdrop when there is one, the poster otherwise.
    pub fn preview_image_url(&self) -> Option<String> {
        self.backdrop_path
            .as_ref()
            .or(self.poster_path.as_ref())
            .map(|path| format!("{}{}", IMAGE_BASE_URL, path))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use crate::models::{CastMember, Credits, CrewMember, Genre, MovieDetails};
    use crate::movie_record::MovieRecord;

    fn details() -> MovieDetails {
        MovieDetails {
            id: 438631,
            title: String::from("沙丘"),
            imdb_id: Some(String::from("tt1160419")),
            original_title: Some(String::from("Dune")),
            overview: Some(String::from("  ")),
            release_date: chrono::NaiveDate::from_ymd_opt(2021, 9, 15),
            runtime: Some(155),
            genres: vec![
                Genre {
                    id: 878,
                    name: String::from("科幻"),
                },
                Genre {
                    id: 12,
                    name: String::from("冒险"),
                },
            ],
            poster_path: Some(String::from("/poster.jpg")),
            backdrop_path: None,
            credits: None,
        }
    }

    fn crew(name: &str, job: &str) -> CrewMember {
        CrewMember {
            name: String::from(name),
            job: Some(String::from(job)),
            department: None,
        }
    }

    fn cast(name: &str, order: Option<u32>) -> CastMember {
        CastMember {
            name: String::from(name),
            character: None,
            order,
        }
    }

    #[test]
    pub fn assemble_keeps_only_directors_without_duplicates() {
        // Arrange
        let credits = Credits {
            cast: vec![],
            crew: vec![
                crew("Denis Villeneuve", "Director"),
                crew("Hans Zimmer", "Original Music Composer"),
                crew("Denis Villeneuve", "Director"),
            ],
        };

        // Act
        let actual = MovieRecord::assemble(details(), credits, None, "zh-CN");

        // Assert
        assert_eq!(vec![String::from("Denis Villeneuve")], actual.directors);
    }

    #[test]
    pub fn assemble_orders_cast_by_billing() {
        // Arrange
        let credits = Credits {
            cast: vec![
                cast("Rebecca Ferguson", Some(1)),
                cast("Extra", None),
                cast("Timothée Chalamet", Some(0)),
            ],
            crew: vec![],
        };

        // Act
        let actual = MovieRecord::assemble(details(), credits, None, "zh-CN");

        // Assert
        assert_eq!(
            vec!["Timothée Chalamet", "Rebecca Ferguson", "Extra"],
            actual.cast
        );
    }

    #[test]
    pub fn assemble_uses_fallback_overview_given_blank_localized_overview() {
        // Arrange
        let mut fallback = details();
        fallback.title = String::from("Dune");
        fallback.overview = Some(String::from("Paul Atreides, a brilliant and gifted young man..."));

        // Act
        let actual = MovieRecord::assemble(details(), Credits::default(), Some(fallback), "zh-CN");

        // Assert
        assert_eq!(
            Some("Paul Atreides, a brilliant and gifted young man..."),
            actual.overview.as_deref()
        );
        assert_eq!("沙丘", actual.title);
    }

    #[test]
    pub fn assemble_prefers_fallback_artwork() {
        // Arrange
        let mut fallback = details();
        fallback.poster_path = Some(String::from("/en-poster.jpg"));
        fallback.backdrop_path = Some(String::from("/en-backdrop.jpg"));

        // Act
        let actual = MovieRecord::assemble(details(), Credits::default(), Some(fallback), "zh-CN");

        // Assert
        assert_eq!(Some("/en-poster.jpg"), actual.poster_path.as_deref());
        assert_eq!(
            Some("https://image.tmdb.org/t/p/original/en-backdrop.jpg"),
            actual.preview_image_url().as_deref()
        );
    }

    #[test]
    pub fn assemble_keeps_localized_artwork_given_fallback_without_artwork() {
        // Arrange
        let mut fallback = details();
        fallback.poster_path = None;

        // Act
        let actual = MovieRecord::assemble(details(), Credits::default(), Some(fallback), "zh-CN");

        // Assert
        assert_eq!(Some("/poster.jpg"), actual.poster_path.as_deref());
    }

    #[test]
    pub fn assemble_uses_original_title_given_blank_localized_title() {
        // Arrange
        let mut input = details();
        input.title = String::new();

        // Act
        let actual = MovieRecord::assemble(input, Credits::default(), None, "zh-CN");

        // Assert
        assert_eq!("Dune", actual.title);
    }

    #[test]
    pub fn preview_image_url_falls_back_to_poster() {
        // Act
        let actual = MovieRecord::assemble(details(), Credits::default(), None, "zh-CN");

        // Assert
        assert_eq!(
            Some("https://image.tmdb.org/t/p/original/poster.jpg"),
            actual.preview_image_url().as_deref()
        );
        assert_eq!("https://www.themoviedb.org/movie/438631", actual.tmdb_url());
        assert_eq!(Some(2021), actual.year());
    }
}
