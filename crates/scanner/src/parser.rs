use regex::Regex;
use std::sync::LazyLock;

use reelname_core::types::{EpisodeMarker, FilenameHints, TechnicalMetadata};

// Patterns to ignore
static IGNORE_NAMES: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    "@eaDir",
    ".nfo",
    ".txt",
    ".jpg",
    ".jpeg",
    ".png",
    ".srt",
    ".sub",
    ".idx",
    ".ass",
    ".ssa",
    ".part",
];

static VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "mov", "wmv", "flv", "webm", "ts", "m2ts", "mts", "mpg", "mpeg",
    "mpe", "mpv", "3gp", "3g2", "ogv", "vob", "mxf", "f4v", "asf",
];

// <title><separators>S<digits>E<digits>, first occurrence anywhere in the name.
static RE_TV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(.*?)[.\s-]*s(\d+)e(\d+)").unwrap()
});

// Resolution, video codec and audio codec, contiguous and in that order.
static RE_TECHNICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<resolution>720p|1080p|4K|2160p)\.(?P<video_codec>x264|x265|H\.264|H\.265)\.(?P<audio_codec>FLAC|AAC|EAC3|AC3|DTS)",
    )
    .unwrap()
});

static RE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.\s-]+").unwrap());

/// Check if a filename should be ignored.
pub fn should_ignore(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    IGNORE_NAMES
        .iter()
        .any(|pat| lower == pat.to_lowercase() || lower.ends_with(&pat.to_lowercase()))
}

/// Check if a file has a video extension.
pub fn is_video_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Collapse dots, whitespace and hyphens into single spaces.
fn clean_title(raw: &str) -> String {
    RE_SEPARATORS.replace_all(raw, " ").trim().to_string()
}

/// Parse a filename into classification and technical hints. Pure; no I/O.
pub fn parse_filename(filename: &str) -> FilenameHints {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let mut hints = FilenameHints {
        technical: parse_technical(name),
        ..Default::default()
    };

    if let Some(caps) = RE_TV.captures(name) {
        if let Some(marker) = EpisodeMarker::from_digits(&caps[2], &caps[3]) {
            hints.title = Some(clean_title(&caps[1]));
            hints.marker = Some(marker);
        }
    }

    hints
}

/// Extract the resolution/codec triple. A partial triple yields nothing.
pub fn parse_technical(filename: &str) -> TechnicalMetadata {
    match RE_TECHNICAL.captures(filename) {
        Some(caps) => TechnicalMetadata {
            resolution: Some(caps["resolution"].to_string()),
            video_codec: Some(caps["video_codec"].to_string()),
            audio_codec: Some(caps["audio_codec"].to_string()),
        },
        None => TechnicalMetadata::default(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use reelname_core::types::MediaKind;

    fn marker(hints: &FilenameHints) -> (&str, &str) {
        let m = hints.marker.as_ref().unwrap();
        (m.season_digits(), m.episode_digits())
    }

    #[test]
    fn parse_sxxexx() {
        let r = parse_filename("Show.Name.S01E02.1080p.x264.AAC.mkv");
        assert_eq!(r.kind(), MediaKind::Tv);
        assert_eq!(r.title.as_deref(), Some("Show Name"));
        assert_eq!(marker(&r), ("01", "02"));
        assert_eq!(r.marker.as_ref().unwrap().season, 1);
        assert_eq!(r.marker.as_ref().unwrap().episode, 2);
    }

    #[test]
    fn parse_sxxexx_lowercase() {
        let r = parse_filename("the.office.s03e11.pilot.mp4");
        assert_eq!(r.kind(), MediaKind::Tv);
        assert_eq!(r.title.as_deref(), Some("the office"));
        assert_eq!(marker(&r), ("03", "11"));
    }

    #[test]
    fn separators_collapse_to_single_spaces() {
        let r = parse_filename("Spider-Man . The  Series - S1E5.avi");
        assert_eq!(r.title.as_deref(), Some("Spider Man The Series"));
        assert_eq!(marker(&r), ("1", "5"));
    }

    #[test]
    fn marker_at_start_gives_empty_title() {
        let r = parse_filename("S02E07.mkv");
        assert_eq!(r.kind(), MediaKind::Tv);
        assert_eq!(r.title.as_deref(), Some(""));
        assert_eq!(marker(&r), ("02", "07"));
    }

    #[test]
    fn wide_numbers_are_not_truncated() {
        let r = parse_filename("Long.Runner.S2024E1234.mkv");
        assert_eq!(marker(&r), ("2024", "1234"));
    }

    #[test]
    fn strips_directories() {
        let r = parse_filename("/media/tv/Some.Dir.S09E09/Show.S01E01.mkv");
        assert_eq!(r.title.as_deref(), Some("Show"));
        assert_eq!(marker(&r), ("01", "01"));
    }

    #[test]
    fn no_marker_is_movie() {
        for name in ["random_movie_file.mp4", "Inception.2010.1080p.mkv", "Season 2.mkv"] {
            let r = parse_filename(name);
            assert_eq!(r.kind(), MediaKind::Movie, "{name}");
            assert!(r.title.is_none());
            assert!(r.marker.is_none());
        }
    }

    #[test]
    fn technical_triple_is_all_or_nothing() {
        let full = parse_technical("Show.S01E02.1080p.x264.AAC.mkv");
        assert_eq!(full.resolution.as_deref(), Some("1080p"));
        assert_eq!(full.video_codec.as_deref(), Some("x264"));
        assert_eq!(full.audio_codec.as_deref(), Some("AAC"));

        assert!(parse_technical("Show.S01E02.1080p.mkv").is_empty());
        assert!(parse_technical("Show.1080p.x265.mkv").is_empty());
        assert!(parse_technical("Show.x264.AAC.mkv").is_empty());
    }

    #[test]
    fn technical_tokens_must_be_adjacent() {
        assert!(parse_technical("Movie.2160p.WEB.H.265.DTS.mkv").is_empty());
        let t = parse_technical("Movie.2160p.H.265.EAC3.mkv");
        assert_eq!(t.video_codec.as_deref(), Some("H.265"));
        assert_eq!(t.audio_codec.as_deref(), Some("EAC3"));
    }

    #[test]
    fn technical_hints_apply_to_movies_too() {
        let r = parse_filename("Movie.4K.x265.FLAC.mkv");
        assert_eq!(r.kind(), MediaKind::Movie);
        assert!(r.technical.is_complete());
    }

    #[test]
    fn ignore_patterns() {
        assert!(should_ignore(".DS_Store"));
        assert!(should_ignore("Thumbs.db"));
        assert!(should_ignore("movie.nfo"));
        assert!(should_ignore("poster.JPG"));
        assert!(!should_ignore("movie.mkv"));
    }

    #[test]
    fn video_extension_check() {
        assert!(is_video_file("movie.mkv"));
        assert!(is_video_file("Movie.MP4"));
        assert!(!is_video_file("poster.jpg"));
        assert!(!is_video_file("mkv"));
    }
}
