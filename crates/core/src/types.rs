use std::path::{Path, PathBuf};

/// How a file was classified from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Tv,
    Movie,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tv => "tv",
            Self::Movie => "movie",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Season/episode marker captured from a filename.
///
/// The digit strings are kept as written so `S01E02` comes back out as
/// `S01E02` in the new name, while the numeric values drive remote lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeMarker {
    pub season: u32,
    pub episode: u32,
    season_digits: String,
    episode_digits: String,
}

impl EpisodeMarker {
    /// Build a marker from raw digit groups. Returns `None` if either group
    /// is not a decimal number that fits in a `u32`.
    pub fn from_digits(season_digits: &str, episode_digits: &str) -> Option<Self> {
        Some(Self {
            season: season_digits.parse().ok()?,
            episode: episode_digits.parse().ok()?,
            season_digits: season_digits.to_string(),
            episode_digits: episode_digits.to_string(),
        })
    }

    pub fn season_digits(&self) -> &str {
        &self.season_digits
    }

    pub fn episode_digits(&self) -> &str {
        &self.episode_digits
    }

    /// `S<season>E<episode>` segment of the output name.
    pub fn tag(&self) -> String {
        format!("S{}E{}", self.season_digits, self.episode_digits)
    }
}

/// Resolution and codec tags attached to a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechnicalMetadata {
    pub resolution: Option<String>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
}

impl TechnicalMetadata {
    pub fn is_empty(&self) -> bool {
        self.resolution.is_none() && self.video_codec.is_none() && self.audio_codec.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.resolution.is_some() && self.video_codec.is_some() && self.audio_codec.is_some()
    }

    /// Fill absent fields from `other`. Fields already present are never
    /// overwritten.
    pub fn merge_missing(&mut self, other: TechnicalMetadata) {
        if self.resolution.is_none() {
            self.resolution = other.resolution;
        }
        if self.video_codec.is_none() {
            self.video_codec = other.video_codec;
        }
        if self.audio_codec.is_none() {
            self.audio_codec = other.audio_codec;
        }
    }
}

/// Everything the parser could read out of a single filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameHints {
    /// Separator-normalised title prefix. Only set for tv matches, and may
    /// be empty when the marker starts the filename.
    pub title: Option<String>,
    pub marker: Option<EpisodeMarker>,
    pub technical: TechnicalMetadata,
}

impl FilenameHints {
    pub fn kind(&self) -> MediaKind {
        if self.marker.is_some() {
            MediaKind::Tv
        } else {
            MediaKind::Movie
        }
    }
}

/// Terminal output for one file: where it is and what it should be called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDecision {
    pub original_path: PathBuf,
    pub new_filename: String,
}

impl RenameDecision {
    /// Target path inside the original file's directory.
    pub fn new_path(&self) -> PathBuf {
        self.original_path.with_file_name(&self.new_filename)
    }

    pub fn original_filename(&self) -> String {
        file_name_lossy(&self.original_path)
    }
}

/// Final path component as a displayable string.
pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_keeps_source_digits() {
        let m = EpisodeMarker::from_digits("01", "002").unwrap();
        assert_eq!(m.season, 1);
        assert_eq!(m.episode, 2);
        assert_eq!(m.tag(), "S01E002");
    }

    #[test]
    fn marker_rejects_overflow() {
        assert!(EpisodeMarker::from_digits("99999999999", "1").is_none());
    }

    #[test]
    fn merge_never_overwrites() {
        let mut parsed = TechnicalMetadata {
            video_codec: Some("x264".into()),
            ..Default::default()
        };
        parsed.merge_missing(TechnicalMetadata {
            resolution: None,
            video_codec: Some("h264".into()),
            audio_codec: Some("aac".into()),
        });
        assert_eq!(parsed.video_codec.as_deref(), Some("x264"));
        assert_eq!(parsed.audio_codec.as_deref(), Some("aac"));
        assert!(parsed.resolution.is_none());
    }

    #[test]
    fn decision_stays_in_directory() {
        let d = RenameDecision {
            original_path: PathBuf::from("/media/show/a.mkv"),
            new_filename: "b.mkv".into(),
        };
        assert_eq!(d.new_path(), PathBuf::from("/media/show/b.mkv"));
        assert_eq!(d.original_filename(), "a.mkv");
    }

    #[test]
    fn kind_works_as_map_key() {
        let mut seen = std::collections::HashMap::new();
        seen.insert((MediaKind::Tv, "Show".to_string()), 1);
        seen.insert((MediaKind::Movie, "Show".to_string()), 2);
        assert_eq!(seen[&(MediaKind::Tv, "Show".to_string())], 1);
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn kind_follows_marker() {
        let mut hints = FilenameHints::default();
        assert_eq!(hints.kind(), MediaKind::Movie);
        hints.marker = EpisodeMarker::from_digits("1", "1");
        assert_eq!(hints.kind(), MediaKind::Tv);
    }
}
