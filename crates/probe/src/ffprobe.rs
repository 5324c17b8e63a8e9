use std::path::Path;

use crate::ProbeError;

/// Codecs of the first video and first audio stream, as reported by ffprobe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaInfo {
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
}

/// Run ffprobe on a file and parse the JSON output.
pub async fn probe(ffprobe_path: &Path, file: &Path) -> Result<MediaInfo, ProbeError> {
    let output = tokio::process::Command::new(ffprobe_path)
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(file)
        .output()
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ProbeError::BinaryNotFound(ffprobe_path.to_path_buf()),
            _ => ProbeError::Io(e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProbeError::ProbeFailed(stderr.trim().to_string()));
    }

    let raw: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|e| ProbeError::ProbeFailed(format!("parse JSON: {e}")))?;

    parse_probe_output(&raw)
}

pub(crate) fn parse_probe_output(raw: &serde_json::Value) -> Result<MediaInfo, ProbeError> {
    let streams = raw
        .get("streams")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ProbeError::ProbeFailed("missing 'streams'".into()))?;

    // The codec comes from the first stream of each type, even if that
    // stream does not report one.
    let first_codec = |codec_type: &str| {
        streams
            .iter()
            .find(|s| s.get("codec_type").and_then(|v| v.as_str()) == Some(codec_type))
            .and_then(|s| s.get("codec_name"))
            .and_then(|v| v.as_str())
            .map(|c| c.to_string())
    };

    Ok(MediaInfo {
        video_codec: first_codec("video"),
        audio_codec: first_codec("audio"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_probe_json() {
        let json = serde_json::json!({
            "format": {
                "format_name": "matroska,webm",
                "duration": "7200.123"
            },
            "streams": [
                { "index": 0, "codec_type": "attachment", "codec_name": "ttf" },
                { "index": 1, "codec_type": "video", "codec_name": "h264", "width": 1920 },
                { "index": 2, "codec_type": "video", "codec_name": "mjpeg" },
                { "index": 3, "codec_type": "audio", "codec_name": "aac", "channels": 6 },
                { "index": 4, "codec_type": "audio", "codec_name": "ac3" },
                { "index": 5, "codec_type": "subtitle", "codec_name": "subrip" }
            ]
        });

        let info = parse_probe_output(&json).unwrap();
        assert_eq!(info.video_codec.as_deref(), Some("h264"));
        assert_eq!(info.audio_codec.as_deref(), Some("aac"));
    }

    #[test]
    fn first_stream_without_codec_name_leaves_field_empty() {
        let json = serde_json::json!({
            "streams": [
                { "codec_type": "audio" },
                { "codec_type": "audio", "codec_name": "ac3" }
            ]
        });
        let info = parse_probe_output(&json).unwrap();
        assert_eq!(info, MediaInfo::default());
    }

    #[test]
    fn format_section_is_optional() {
        let json = serde_json::json!({ "streams": [] });
        assert_eq!(parse_probe_output(&json).unwrap(), MediaInfo::default());
    }

    #[test]
    fn missing_streams_is_failure() {
        let json = serde_json::json!({ "format": {} });
        assert!(matches!(
            parse_probe_output(&json),
            Err(ProbeError::ProbeFailed(_))
        ));
    }

    #[tokio::test]
    async fn missing_binary_is_reported() {
        let bogus = Path::new("/nonexistent/bin/ffprobe-reelname");
        let err = probe(bogus, Path::new("movie.mkv")).await.unwrap_err();
        assert!(matches!(err, ProbeError::BinaryNotFound(p) if p == bogus));
    }
}
