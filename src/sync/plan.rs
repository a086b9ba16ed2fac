//! Classification of source items against the destination tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::media::MediaItem;

/// A source item paired with the path it maps to under the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    pub item: MediaItem,
    pub target: PathBuf,
}

/// Which classifications a run asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanMode {
    /// Copy only items missing from the destination
    pub difference: bool,
    /// Collect delete candidates (only honoured together with `difference`)
    pub delete: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    pub to_copy: Vec<PlannedItem>,
    /// Items already at the destination (difference mode only)
    pub already_present: Vec<PlannedItem>,
    pub to_delete: Vec<PlannedItem>,
}

impl SyncPlan {
    /// Classify `source_items` against the directories found under `destination_root`.
    pub fn build(
        source_items: &[MediaItem],
        destination_dirs: &[PathBuf],
        destination_root: &Path,
        mode: PlanMode,
    ) -> Self {
        let lookup = DestinationLookup::new(destination_dirs);
        let mut plan = Self::default();

        for item in source_items {
            let planned = PlannedItem {
                target: item.path_under(destination_root),
                item: item.clone(),
            };

            if mode.difference && mode.delete {
                // NOTE: this probes the filesystem now instead of reusing
                // `lookup`, so it can disagree with the copy decision below if
                // the destination changes between the listing and this check.
                if planned.target.exists() {
                    plan.to_delete.push(planned.clone());
                }
            }

            if !mode.difference || !lookup.contains(&planned.target) {
                plan.to_copy.push(planned);
            } else {
                plan.already_present.push(planned);
            }
        }

        plan
    }
}

/// Case-insensitive set of destination paths.
///
/// Paths are compared as lower-cased strings, which approximates rather than
/// emulates a case-insensitive filesystem.
#[derive(Debug, Default)]
pub struct DestinationLookup {
    paths: HashSet<String>,
}

impl DestinationLookup {
    pub fn new(paths: &[PathBuf]) -> Self {
        Self {
            paths: paths.iter().map(|p| Self::key(p)).collect(),
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(&Self::key(path))
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn item(root: &Path, name: &str) -> MediaItem {
        MediaItem::from_path(root, &root.join(name)).unwrap()
    }

    fn names(items: &[PlannedItem]) -> Vec<&str> {
        items.iter().map(|p| p.item.name.as_str()).collect()
    }

    #[test]
    fn test_without_difference_everything_is_copied() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(dst.join("A (2001)")).unwrap();

        let items = vec![item(&src, "A (2001)"), item(&src, "B (1990)")];
        let plan = SyncPlan::build(&items, &[dst.join("A (2001)")], &dst, PlanMode::default());

        assert_eq!(names(&plan.to_copy), vec!["A (2001)", "B (1990)"]);
        assert_eq!(plan.to_copy[0].target, dst.join("A (2001)"));
        assert!(plan.already_present.is_empty());
        assert!(plan.to_delete.is_empty());
    }

    #[test]
    fn test_difference_excludes_present_items_and_marks_them_for_delete() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(dst.join("A (2001)")).unwrap();

        let items = vec![item(&src, "A (2001)"), item(&src, "C (2010)")];
        let dest_dirs = vec![dst.join("A (2001)")];

        let plan = SyncPlan::build(&items, &dest_dirs, &dst, PlanMode { difference: true, delete: true });
        assert_eq!(names(&plan.to_copy), vec!["C (2010)"]);
        assert_eq!(names(&plan.already_present), vec!["A (2001)"]);
        assert_eq!(names(&plan.to_delete), vec!["A (2001)"]);

        let plan = SyncPlan::build(&items, &dest_dirs, &dst, PlanMode { difference: true, delete: false });
        assert_eq!(names(&plan.to_copy), vec!["C (2010)"]);
        assert!(plan.to_delete.is_empty());
    }

    #[test]
    fn test_delete_without_difference_collects_nothing() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(dst.join("A (2001)")).unwrap();

        let items = vec![item(&src, "A (2001)")];
        let plan = SyncPlan::build(&items, &[dst.join("A (2001)")], &dst, PlanMode { difference: false, delete: true });
        assert!(plan.to_delete.is_empty());
        assert_eq!(plan.to_copy.len(), 1);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");

        let items = vec![item(&src, "alien (1979)")];
        let plan = SyncPlan::build(&items, &[dst.join("ALIEN (1979)")], &dst, PlanMode { difference: true, delete: false });
        assert!(plan.to_copy.is_empty());
        assert_eq!(names(&plan.already_present), vec!["alien (1979)"]);
    }

    #[test]
    fn test_delete_uses_live_probe_not_lookup() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        // Listed in the lookup but gone from disk.
        let items = vec![item(&src, "Gone (2002)")];
        let plan = SyncPlan::build(&items, &[dst.join("Gone (2002)")], &dst, PlanMode { difference: true, delete: true });

        assert!(plan.to_copy.is_empty());
        assert!(plan.to_delete.is_empty());
    }

    #[test]
    fn test_empty_inputs_give_empty_plan() {
        let plan = SyncPlan::build(&[], &[], Path::new("/dst"), PlanMode { difference: true, delete: true });
        assert!(plan.to_copy.is_empty());
        assert!(plan.already_present.is_empty());
        assert!(plan.to_delete.is_empty());
    }
}
