//! Recursive directory enumeration for source and destination roots.

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{MediaItem, YearFilter};

/// Enumerate every directory below `root` whose folder name satisfies `filter`.
///
/// The walk is recursive and lexically ordered per directory. The root itself
/// is never returned. A missing root is an error; unreadable entries are
/// skipped with a warning.
pub fn enumerate_media(root: &Path, filter: &YearFilter) -> Result<Vec<MediaItem>> {
    if !root.is_dir() {
        bail!("Source directory does not exist: {}", root.display());
    }

    let items: Vec<MediaItem> = walk_directories(root)
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| filter.matches(&name.to_string_lossy()))
        })
        .filter_map(|path| MediaItem::from_path(root, &path))
        .collect();

    tracing::debug!("Enumerated {} matching folders under {}", items.len(), root.display());
    Ok(items)
}

/// List every directory below `root`, unfiltered.
///
/// A root that does not exist yet yields an empty list.
pub fn list_directories(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        tracing::debug!("{} does not exist, treating it as empty", root.display());
        return Vec::new();
    }
    walk_directories(root).collect()
}

fn walk_directories(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
}
