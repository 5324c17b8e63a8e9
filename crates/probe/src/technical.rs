//! Fill technical fields the filename did not provide.
//!
//! Filename evidence always wins over probe evidence. The probe runs at most
//! once per file and only when [`needs_probe`] says so.

use std::path::Path;

use tracing::{debug, warn};

use reelname_core::types::TechnicalMetadata;

use crate::MediaProber;
use crate::ffprobe::MediaInfo;

/// Whether the probe should run for these filename-derived fields.
///
/// Currently all-or-nothing: any field from the filename skips the probe,
/// even if the probe could fill the others. Switching to
/// `!parsed.is_complete()` would fill gaps instead.
pub fn needs_probe(parsed: &TechnicalMetadata) -> bool {
    parsed.is_empty()
}

/// Codec fields reported by a probe. Resolution is never taken from it.
pub fn probed_fields(info: &MediaInfo) -> TechnicalMetadata {
    TechnicalMetadata {
        resolution: None,
        video_codec: info.video_codec.clone(),
        audio_codec: info.audio_codec.clone(),
    }
}

/// Resolve the technical fields for one file.
///
/// A probe failure is not fatal: it is logged and the filename-derived
/// fields (possibly none) are returned unchanged.
pub async fn resolve_technical(
    prober: &dyn MediaProber,
    file: &Path,
    parsed: TechnicalMetadata,
) -> TechnicalMetadata {
    if !needs_probe(&parsed) {
        debug!(file = %file.display(), "technical fields taken from filename");
        return parsed;
    }

    match prober.probe(file).await {
        Ok(info) => {
            debug!(
                file = %file.display(),
                video_codec = ?info.video_codec,
                audio_codec = ?info.audio_codec,
                "probed media file"
            );
            let mut merged = parsed;
            merged.merge_missing(probed_fields(&info));
            merged
        }
        Err(e) => {
            warn!(file = %file.display(), error = %e, "probe failed, leaving technical fields empty");
            parsed
        }
    }
}
