//! Copy and delete batches over a sync plan.

use anyhow::{Context, Result};
use fs_extra::dir::CopyOptions;
use std::fmt;
use std::fs;

use super::plan::PlannedItem;
use super::prompt::Confirm;
use crate::size::{bytes_to_gb, dir_size_bytes, total_size_bytes};

/// The two batch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Copy,
    Delete,
}

impl BatchKind {
    fn verb(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Result of running one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Items copied or deleted (or that would have been, when simulating)
    pub processed: usize,
    pub bytes: u64,
    /// The confirmation gate was declined
    pub declined: bool,
}

/// Runs batches, either for real or as a simulation.
pub struct Executor<'a> {
    simulate: bool,
    progress_size: bool,
    prompt: &'a dyn Confirm,
}

impl<'a> Executor<'a> {
    pub fn new(simulate: bool, progress_size: bool, prompt: &'a dyn Confirm) -> Self {
        Self {
            simulate,
            progress_size,
            prompt,
        }
    }

    /// Confirm once, then process every item in order.
    ///
    /// The first failing copy or delete aborts the batch with its error.
    pub fn run_batch(&self, kind: BatchKind, items: &[PlannedItem]) -> Result<BatchOutcome> {
        if items.is_empty() {
            tracing::info!("Nothing to {}", kind);
            return Ok(BatchOutcome::default());
        }

        let total_bytes = total_size_bytes(items.iter().map(|p| &p.item.full_path));
        tracing::info!(
            "{} item(s) to {} ({:.2} GB)",
            items.len(),
            kind,
            bytes_to_gb(total_bytes)
        );

        let question = match (kind, self.simulate) {
            (_, true) => format!("Simulate {} of {} item(s)?", kind, items.len()),
            (BatchKind::Copy, false) => format!("Copy {} item(s) to the destination?", items.len()),
            (BatchKind::Delete, false) => {
                format!("Delete {} item(s) from the source? This cannot be undone", items.len())
            }
        };
        if !self.prompt.confirm(&question)? {
            tracing::info!("Skipping {} batch: not confirmed", kind);
            return Ok(BatchOutcome {
                declined: true,
                ..BatchOutcome::default()
            });
        }

        let mut outcome = BatchOutcome::default();
        for (index, planned) in items.iter().enumerate() {
            outcome.bytes += dir_size_bytes(&planned.item.full_path);
            let progress = self.progress(index + 1, items.len(), outcome.bytes, total_bytes);

            match kind {
                BatchKind::Copy => self.copy(planned, &progress)?,
                BatchKind::Delete => self.delete(planned, &progress)?,
            }
            outcome.processed += 1;
        }

        tracing::info!(
            "{} batch finished: {} item(s), {:.2} GB",
            kind,
            outcome.processed,
            bytes_to_gb(outcome.bytes)
        );
        Ok(outcome)
    }

    fn copy(&self, planned: &PlannedItem, progress: &str) -> Result<()> {
        let source = &planned.item.full_path;
        let target = &planned.target;

        if self.simulate {
            tracing::info!(
                "[SIMULATE] {} Would copy {} -> {}",
                progress,
                source.display(),
                target.display()
            );
            return Ok(());
        }

        tracing::info!("{} Copying {} -> {}", progress, source.display(), target.display());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut options = CopyOptions::new();
        options.overwrite = true;
        options.content_only = true;
        fs_extra::dir::copy(source, target, &options).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), target.display())
        })?;
        Ok(())
    }

    fn delete(&self, planned: &PlannedItem, progress: &str) -> Result<()> {
        let source = &planned.item.full_path;

        if self.simulate {
            tracing::info!("[SIMULATE] {} Would delete {}", progress, source.display());
            return Ok(());
        }

        tracing::info!("{} Deleting {}", progress, source.display());
        fs_extra::dir::remove(source)
            .with_context(|| format!("Failed to delete {}", source.display()))?;
        Ok(())
    }

    fn progress(&self, current: usize, total: usize, done_bytes: u64, total_bytes: u64) -> String {
        if self.progress_size {
            format!(
                "[{}/{}] [{:.2} GB / {:.2} GB]",
                current,
                total,
                bytes_to_gb(done_bytes),
                bytes_to_gb(total_bytes)
            )
        } else {
            format!("[{}/{}]", current, total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaItem;
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::TempDir;

    /// Fixed answer that records every question asked.
    struct Scripted {
        answer: bool,
        asked: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Confirm for Scripted {
        fn confirm(&self, question: &str) -> Result<bool> {
            self.asked.borrow_mut().push(question.to_string());
            Ok(self.answer)
        }
    }

    fn planned(src: &Path, dst: &Path, name: &str) -> PlannedItem {
        let item = MediaItem::from_path(src, &src.join(name)).unwrap();
        PlannedItem {
            target: item.path_under(dst),
            item,
        }
    }

    fn fixture() -> (TempDir, Vec<PlannedItem>) {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("Alien (1979)").join("Extras")).unwrap();
        fs::write(src.join("Alien (1979)").join("movie.mkv"), b"0123456789").unwrap();
        fs::write(src.join("Alien (1979)").join("Extras").join("trailer.mkv"), b"abc").unwrap();
        fs::create_dir_all(src.join("Collection").join("Heat (1995)")).unwrap();
        fs::write(src.join("Collection").join("Heat (1995)").join("movie.mkv"), b"heat").unwrap();

        let items = vec![
            planned(&src, &dst, "Alien (1979)"),
            planned(&src, &dst, "Collection/Heat (1995)"),
        ];
        (temp, items)
    }

    #[test]
    fn test_copy_creates_parents_and_copies_tree() {
        let (temp, items) = fixture();
        let prompt = Scripted::new(true);
        let outcome = Executor::new(false, true, &prompt).run_batch(BatchKind::Copy, &items).unwrap();

        let dst = temp.path().join("dst");
        assert_eq!(fs::read(dst.join("Alien (1979)").join("movie.mkv")).unwrap(), b"0123456789");
        assert_eq!(fs::read(dst.join("Alien (1979)").join("Extras").join("trailer.mkv")).unwrap(), b"abc");
        assert_eq!(fs::read(dst.join("Collection").join("Heat (1995)").join("movie.mkv")).unwrap(), b"heat");
        assert_eq!(outcome, BatchOutcome { processed: 2, bytes: 17, declined: false });
        assert_eq!(prompt.asked.borrow().len(), 1);
    }

    #[test]
    fn test_copy_overwrites_existing_files() {
        let (temp, items) = fixture();
        let existing = temp.path().join("dst").join("Alien (1979)");
        fs::create_dir_all(&existing).unwrap();
        fs::write(existing.join("movie.mkv"), b"stale").unwrap();

        Executor::new(false, false, &Scripted::new(true))
            .run_batch(BatchKind::Copy, &items[..1])
            .unwrap();
        assert_eq!(fs::read(existing.join("movie.mkv")).unwrap(), b"0123456789");
    }

    #[test]
    fn test_simulate_never_touches_the_filesystem() {
        let (temp, items) = fixture();
        let prompt = Scripted::new(true);
        let executor = Executor::new(true, true, &prompt);

        let copied = executor.run_batch(BatchKind::Copy, &items).unwrap();
        let deleted = executor.run_batch(BatchKind::Delete, &items).unwrap();

        assert_eq!(copied.processed, 2);
        assert_eq!(deleted.processed, 2);
        assert!(!temp.path().join("dst").exists());
        assert!(items.iter().all(|p| p.item.full_path.exists()));
    }

    #[test]
    fn test_delete_removes_source_tree() {
        let (temp, items) = fixture();
        let outcome = Executor::new(false, false, &Scripted::new(true))
            .run_batch(BatchKind::Delete, &items)
            .unwrap();

        assert_eq!(outcome.processed, 2);
        assert!(!temp.path().join("src").join("Alien (1979)").exists());
        assert!(!temp.path().join("src").join("Collection").join("Heat (1995)").exists());
        assert!(temp.path().join("src").join("Collection").exists());
    }

    #[test]
    fn test_declined_gate_skips_batch() {
        let (temp, items) = fixture();
        let prompt = Scripted::new(false);
        let outcome = Executor::new(false, false, &prompt).run_batch(BatchKind::Delete, &items).unwrap();

        assert!(outcome.declined);
        assert_eq!(outcome.processed, 0);
        assert!(temp.path().join("src").join("Alien (1979)").exists());
        assert!(prompt.asked.borrow()[0].starts_with("Delete 2 item(s)"));
    }

    #[test]
    fn test_empty_batch_does_not_prompt() {
        let prompt = Scripted::new(true);
        let outcome = Executor::new(false, false, &prompt).run_batch(BatchKind::Copy, &[]).unwrap();

        assert_eq!(outcome, BatchOutcome::default());
        assert!(prompt.asked.borrow().is_empty());
    }

    #[test]
    fn test_progress_annotation() {
        let prompt = Scripted::new(true);
        let gib = 1024 * 1024 * 1024;

        let plain = Executor::new(false, false, &prompt);
        assert_eq!(plain.progress(3, 10, gib, 4 * gib), "[3/10]");

        let sized = Executor::new(false, true, &prompt);
        assert_eq!(sized.progress(3, 10, gib + gib / 2, 4 * gib), "[3/10] [1.50 GB / 4.00 GB]");
    }
}
