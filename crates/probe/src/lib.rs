#![allow(clippy::collapsible_if)]
pub mod ffprobe;
pub mod technical;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ffprobe::MediaInfo;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("ffprobe not found at {0}")]
    BinaryNotFound(PathBuf),
    #[error("ffprobe failed: {0}")]
    ProbeFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can report the streams of a media file.
#[async_trait::async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe(&self, file: &Path) -> Result<MediaInfo, ProbeError>;
}

/// Prober backed by the `ffprobe` executable.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    pub ffprobe_path: PathBuf,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait::async_trait]
impl MediaProber for FfprobeProber {
    async fn probe(&self, file: &Path) -> Result<MediaInfo, ProbeError> {
        ffprobe::probe(&self.ffprobe_path, file).await
    }
}
