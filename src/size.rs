//! Aggregate on-disk size of directory trees.

use std::path::Path;
use walkdir::WalkDir;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Total bytes of every regular file beneath `path`.
///
/// Unreadable entries are skipped and a missing path counts as zero.
pub fn dir_size_bytes(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Total bytes across several directory trees
pub fn total_size_bytes<I, P>(paths: I) -> u64
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths.into_iter().map(|p| dir_size_bytes(p.as_ref())).sum()
}

/// Convert bytes to gigabytes (1024³), rounded to two decimals
pub fn bytes_to_gb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_GB * 100.0).round() / 100.0
}

/// Size of several directory trees in gigabytes
pub fn total_size_gb<I, P>(paths: I) -> f64
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    bytes_to_gb(total_size_bytes(paths))
}
