//! Media folder model: year parsing, condition filtering and enumeration.

pub mod condition;
pub mod enumerate;
pub mod year;

pub use condition::{CompareOp, YearFilter};
pub use enumerate::{enumerate_media, list_directories};
pub use year::extract_year;

use std::path::{Path, PathBuf};

/// One media folder found under a root directory.
///
/// `relative_path` is fixed at enumeration time and is the key used to find
/// the matching folder under another root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub name: String,
    pub full_path: PathBuf,
    pub relative_path: PathBuf,
}

impl MediaItem {
    /// Build an item from a directory path under `root`.
    ///
    /// Returns `None` when `path` is not below `root` or is the root itself.
    pub fn from_path(root: &Path, path: &Path) -> Option<Self> {
        let relative_path = path.strip_prefix(root).ok()?.to_path_buf();
        let name = relative_path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            name,
            full_path: path.to_path_buf(),
            relative_path,
        })
    }

    /// Where this item lives under another root
    pub fn path_under(&self, root: &Path) -> PathBuf {
        root.join(&self.relative_path)
    }

    /// Relative path with `/` separators, for logs and listings
    pub fn relative_display(&self) -> String {
        self.relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
