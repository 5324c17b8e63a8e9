//! Per-file naming pipeline.
//!
//! Classify → resolve title → look up show or movie → (tv) look up episode →
//! resolve technical fields → assemble name → rename. Any step that yields
//! nothing ends the file in a skip with a [`SkipReason`]; the run moves on.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use reelname_core::error::SkipReason;
use reelname_core::types::{MediaKind, RenameDecision, file_name_lossy};
use reelname_metadata::MetadataError;
use reelname_metadata::provider::MetadataProvider;
use reelname_probe::MediaProber;
use reelname_probe::technical::resolve_technical;
use reelname_scanner::parser;
use reelname_scanner::walk::{self, MediaEntry};

use crate::naming;
use crate::prompt::TitlePrompt;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Renamed(RenameDecision),
    /// Dry run: the decision was made but not executed.
    Planned(RenameDecision),
    Skipped { file: String, reason: SkipReason },
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    fn record(&mut self, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Renamed(_) | FileOutcome::Planned(_) => self.renamed += 1,
            FileOutcome::Skipped { reason, .. } if reason.is_failure() => self.failed += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
        }
        self.outcomes.push(outcome);
    }
}

pub struct NamingPipeline<P> {
    provider: Arc<dyn MetadataProvider>,
    prober: Arc<dyn MediaProber>,
    prompt: P,
    dry_run: bool,
}

impl<P: TitlePrompt> NamingPipeline<P> {
    pub fn new(provider: Arc<dyn MetadataProvider>, prober: Arc<dyn MediaProber>, prompt: P) -> Self {
        Self {
            provider,
            prober,
            prompt,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Walk `root` and process every video file in traversal order.
    pub async fn run(&mut self, root: &Path) -> RunSummary {
        let entries = walk::walk_media_dir(root);
        info!(
            root = %root.display(),
            files_found = entries.len(),
            provider = self.provider.name(),
            dry_run = self.dry_run,
            "scan found video files"
        );

        let mut summary = RunSummary::default();
        for entry in &entries {
            let outcome = self.process_entry(entry).await;
            summary.record(outcome);
        }

        info!(
            renamed = summary.renamed,
            skipped = summary.skipped,
            failed = summary.failed,
            "run complete"
        );
        summary
    }

    /// Decide on and, unless dry-running, execute the rename of one file.
    pub async fn process_entry(&mut self, entry: &MediaEntry) -> FileOutcome {
        let file = entry.file_name();
        debug!(file = %file, size_bytes = entry.size_bytes, "processing");

        let reason = match self.decide(&entry.path, &entry.directory_name()).await {
            Ok(decision) if self.dry_run => {
                info!(file = %file, new_name = %decision.new_filename, "would rename");
                return FileOutcome::Planned(decision);
            }
            Ok(decision) => match execute(&decision).await {
                Ok(()) => {
                    info!(file = %file, new_name = %decision.new_filename, "renamed");
                    return FileOutcome::Renamed(decision);
                }
                Err(reason) => reason,
            },
            Err(reason) => reason,
        };

        warn!(file = %file, code = reason.code(), reason = %reason, "skipping file");
        FileOutcome::Skipped { file, reason }
    }

    /// Build the rename decision for `path` without touching the filesystem.
    ///
    /// `directory_name` is offered to the operator whenever a title has to
    /// be confirmed.
    pub async fn decide(
        &mut self,
        path: &Path,
        directory_name: &str,
    ) -> Result<RenameDecision, SkipReason> {
        let file_name = file_name_lossy(path);
        let hints = parser::parse_filename(&file_name);
        let extension = naming::extension_with_dot(path);

        let new_filename = match &hints.marker {
            Some(marker) => {
                let mut title = hints.title.clone().unwrap_or_default();
                if title.is_empty() {
                    title = self.confirm_title(directory_name)?;
                }

                let show = self.lookup(&title, MediaKind::Tv).await?;
                let episode = self
                    .provider
                    .fetch_episode(show.id(), marker.season, marker.episode)
                    .await
                    .map_err(|e| {
                        skip_reason(e, MediaKind::Tv, format!("{title} {}", marker.tag()))
                    })?;

                let technical =
                    resolve_technical(self.prober.as_ref(), path, hints.technical.clone()).await;
                naming::tv_filename(&show, &episode, marker, &technical, &extension)
            }
            None => {
                let title = self.confirm_title(directory_name)?;
                debug!(file = %file_name, title = %title, "using confirmed title");

                let movie = self.lookup(&title, MediaKind::Movie).await?;
                let technical =
                    resolve_technical(self.prober.as_ref(), path, hints.technical.clone()).await;
                naming::movie_filename(&movie, &technical, &extension)
            }
        };

        Ok(RenameDecision {
            original_path: path.to_path_buf(),
            new_filename,
        })
    }

    fn confirm_title(&mut self, directory_name: &str) -> Result<String, SkipReason> {
        match self.prompt.resolve_title(directory_name) {
            Ok(title) => {
                let title = title.trim();
                if title.is_empty() {
                    Err(SkipReason::ClassificationAmbiguous)
                } else {
                    Ok(title.to_string())
                }
            }
            Err(e) => {
                warn!(error = %e, "title prompt failed");
                Err(SkipReason::ClassificationAmbiguous)
            }
        }
    }

    async fn lookup(
        &self,
        title: &str,
        kind: MediaKind,
    ) -> Result<reelname_metadata::RemoteMediaRecord, SkipReason> {
        self.provider
            .search(title, kind)
            .await
            .map_err(|e| skip_reason(e, kind, title.to_string()))
    }
}

fn skip_reason(err: MetadataError, kind: MediaKind, title: String) -> SkipReason {
    match err {
        MetadataError::NotFound => SkipReason::LookupNotFound { kind, title },
        other => SkipReason::ServiceError(other.to_string()),
    }
}

/// Rename within the same directory. Refuses to replace an existing file.
async fn execute(decision: &RenameDecision) -> Result<(), SkipReason> {
    let target = decision.new_path();
    if target == decision.original_path {
        return Ok(());
    }

    match tokio::fs::try_exists(&target).await {
        Ok(false) => {}
        Ok(true) => {
            return Err(SkipReason::RenameFailure(format!(
                "'{}' already exists",
                decision.new_filename
            )));
        }
        Err(e) => return Err(SkipReason::RenameFailure(e.to_string())),
    }

    tokio::fs::rename(&decision.original_path, &target)
        .await
        .map_err(|e| SkipReason::RenameFailure(e.to_string()))
}
