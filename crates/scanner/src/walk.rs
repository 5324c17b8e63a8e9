use std::path::{Path, PathBuf};
use tracing::debug;

use crate::parser;

/// Entry discovered during a filesystem walk.
#[derive(Debug, Clone)]
pub struct MediaEntry {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl MediaEntry {
    /// Name of the directory that directly contains this file.
    pub fn directory_name(&self) -> String {
        self.path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn file_name(&self) -> String {
        reelname_core::types::file_name_lossy(&self.path)
    }
}

/// Walk a directory recursively and collect video files, skipping ignored patterns.
///
/// Entries within a directory are visited in name order. The whole tree is
/// collected up front so files renamed later are never seen twice.
pub fn walk_media_dir(root: &Path) -> Vec<MediaEntry> {
    let mut entries = Vec::new();
    walk_recursive(root, &mut entries);
    entries
}

fn walk_recursive(dir: &Path, entries: &mut Vec<MediaEntry>) {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "cannot read directory");
            return;
        }
    };

    let mut children: Vec<_> = read_dir.flatten().collect();
    children.sort_by_key(|e| e.file_name());

    let mut subdirs = Vec::new();
    for entry in children {
        let path = entry.path();
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        // Skip hidden files/dirs and ignored patterns
        if name.starts_with('.') || parser::should_ignore(&name) {
            debug!(path = %path.display(), "skipping ignored entry");
            continue;
        }

        // `file_type` does not follow links, so linked directories are
        // listed but never descended into.
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            // Skip known junk directories
            if name == "@eaDir" || name == "#recycle" {
                continue;
            }
            subdirs.push(path);
        } else if path.is_dir() {
            debug!(path = %path.display(), "not following directory link");
        } else if parser::is_video_file(&name) {
            let size_bytes = match std::fs::metadata(&path) {
                Ok(m) => m.len(),
                Err(_) => continue,
            };
            entries.push(MediaEntry { path, size_bytes });
        }
    }

    // Files of a directory come before its subdirectories, top-down.
    for sub in subdirs {
        walk_recursive(&sub, entries);
    }
}
