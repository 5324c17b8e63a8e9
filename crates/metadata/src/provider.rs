use reelname_core::types::MediaKind;

use crate::{EpisodeRecord, MetadataError, RemoteMediaRecord};

/// A metadata provider that can resolve titles and episodes.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Search by title and return the first result for the given kind.
    /// An empty result set is `MetadataError::NotFound`.
    async fn search(
        &self,
        title: &str,
        kind: MediaKind,
    ) -> Result<RemoteMediaRecord, MetadataError>;

    /// Fetch the episode detail record for a show/season/episode triple.
    async fn fetch_episode(
        &self,
        show_id: u64,
        season: u32,
        episode: u32,
    ) -> Result<EpisodeRecord, MetadataError>;
}
