pub mod provider;
pub mod rate_limit;
pub mod tmdb;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// Show returned by a tv title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvShowRecord {
    pub id: u64,
    pub name: String,
    pub air_date: Option<String>,
}

/// Movie returned by a movie title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
}

/// First hit of a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteMediaRecord {
    Tv(TvShowRecord),
    Movie(MovieRecord),
}

impl RemoteMediaRecord {
    pub fn id(&self) -> u64 {
        match self {
            Self::Tv(show) => show.id,
            Self::Movie(movie) => movie.id,
        }
    }

    /// Canonical show name or movie title.
    pub fn title(&self) -> &str {
        match self {
            Self::Tv(show) => &show.name,
            Self::Movie(movie) => &movie.title,
        }
    }

    /// Four-digit year of the air/release date, if the date carries one.
    pub fn year(&self) -> Option<&str> {
        let date = match self {
            Self::Tv(show) => show.air_date.as_deref(),
            Self::Movie(movie) => movie.release_date.as_deref(),
        };
        date.and_then(year_of)
    }
}

/// Episode detail record for one show/season/episode triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    /// Episode id. Distinct from the show id on the real service.
    pub id: u64,
    pub name: Option<String>,
    pub air_date: Option<String>,
    pub season_number: Option<u32>,
    pub episode_number: Option<u32>,
}

fn year_of(date: &str) -> Option<&str> {
    date.get(..4)
        .filter(|y| y.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_takes_first_four_digits() {
        let show = RemoteMediaRecord::Tv(TvShowRecord {
            id: 1,
            name: "Show".into(),
            air_date: Some("2020-05-01".into()),
        });
        assert_eq!(show.year(), Some("2020"));
        assert_eq!(show.title(), "Show");
        assert_eq!(show.id(), 1);
    }

    #[test]
    fn year_missing_or_malformed() {
        let movie = |date: Option<&str>| {
            RemoteMediaRecord::Movie(MovieRecord {
                id: 7,
                title: "Inception".into(),
                release_date: date.map(String::from),
            })
        };
        assert_eq!(movie(None).year(), None);
        assert_eq!(movie(Some("")).year(), None);
        assert_eq!(movie(Some("20")).year(), None);
        assert_eq!(movie(Some("TBA-01")).year(), None);
        assert_eq!(movie(Some("2010-07-16")).year(), Some("2010"));
    }
}
