//! Assembly of the new filename.
//!
//! Layout: `<title>_<year>_tmdb-<id>_<SxxEyy>_<resolution>_<video>_<audio><ext>`.
//! Movies leave the episode segment empty. Missing values stay as empty
//! segments, so the separators are always emitted.

use std::path::Path;

use reelname_core::types::{EpisodeMarker, TechnicalMetadata};
use reelname_metadata::{EpisodeRecord, RemoteMediaRecord};

const SEPARATOR: &str = "_";

/// Name for a tv episode. The id segment is the episode record's id.
pub fn tv_filename(
    show: &RemoteMediaRecord,
    episode: &EpisodeRecord,
    marker: &EpisodeMarker,
    technical: &TechnicalMetadata,
    extension: &str,
) -> String {
    assemble(show, episode.id, &marker.tag(), technical, extension)
}

/// Name for a movie.
pub fn movie_filename(
    movie: &RemoteMediaRecord,
    technical: &TechnicalMetadata,
    extension: &str,
) -> String {
    assemble(movie, movie.id(), "", technical, extension)
}

fn assemble(
    record: &RemoteMediaRecord,
    id: u64,
    episode_tag: &str,
    technical: &TechnicalMetadata,
    extension: &str,
) -> String {
    let title = sanitize_segment(record.title());
    let id_segment = format!("tmdb-{id}");
    let segments = [
        title.as_str(),
        record.year().unwrap_or(""),
        id_segment.as_str(),
        episode_tag,
        technical.resolution.as_deref().unwrap_or(""),
        technical.video_codec.as_deref().unwrap_or(""),
        technical.audio_codec.as_deref().unwrap_or(""),
    ];
    format!("{}{extension}", segments.join(SEPARATOR))
}

/// Keep the result inside the original directory.
fn sanitize_segment(segment: &str) -> String {
    segment.replace(['/', '\\'], "-")
}

/// Extension including the leading dot, or empty.
pub fn extension_with_dot(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}
