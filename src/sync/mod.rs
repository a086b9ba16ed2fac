//! Sync run orchestration: enumerate, plan, then execute the requested batches.

pub mod executor;
pub mod plan;
pub mod prompt;

pub use executor::{BatchKind, BatchOutcome, Executor};
pub use plan::{DestinationLookup, PlanMode, PlannedItem, SyncPlan};
pub use prompt::{AssumeYes, Confirm, TerminalPrompt};

use anyhow::Result;
use std::path::PathBuf;

use crate::media::{MediaItem, YearFilter, enumerate_media, list_directories};
use crate::size::total_size_gb;

/// Everything one run needs to know, resolved from CLI flags and configuration.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub filter: YearFilter,
    pub list_source: bool,
    pub list_destination: bool,
    pub copy: bool,
    pub difference: bool,
    pub delete: bool,
    pub simulate: bool,
    pub full_size: bool,
    pub progress_size: bool,
}

impl SyncOptions {
    fn plan_mode(&self) -> PlanMode {
        PlanMode {
            difference: self.difference,
            delete: self.delete,
        }
    }

    fn listing(&self) -> bool {
        self.list_source || self.list_destination
    }

    fn modes(&self) -> String {
        let flags = [
            ("list-source", self.list_source),
            ("list-destination", self.list_destination),
            ("copy", self.copy),
            ("difference", self.difference),
            ("delete", self.delete),
            ("simulate", self.simulate),
            ("full-size", self.full_size),
            ("progress-size", self.progress_size),
        ];
        let active: Vec<&str> = flags
            .iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| *name)
            .collect();
        if active.is_empty() {
            "none".to_string()
        } else {
            active.join(", ")
        }
    }
}

/// What a run did, for the closing summary.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub source_items: usize,
    /// Filtered source size, set in full-size mode
    pub source_size_gb: Option<f64>,
    pub plan_copy: usize,
    pub plan_present: usize,
    pub plan_delete: usize,
    pub copy: Option<BatchOutcome>,
    pub delete: Option<BatchOutcome>,
}

/// Run one sync pass.
pub fn run(options: &SyncOptions, prompt: &dyn Confirm) -> Result<RunSummary> {
    tracing::info!("Source: {}", options.source.display());
    tracing::info!("Destination: {}", options.destination.display());
    tracing::info!("Condition: {}", options.filter);
    tracing::info!("Modes: {}", options.modes());

    let source_items = enumerate_media(&options.source, &options.filter)?;
    let mut summary = RunSummary {
        source_items: source_items.len(),
        ..RunSummary::default()
    };

    if options.full_size {
        let size = total_size_gb(source_items.iter().map(|i| &i.full_path));
        tracing::info!(
            "Total size of filtered source items: {:.2} GB ({} item(s))",
            size,
            source_items.len()
        );
        summary.source_size_gb = Some(size);
        return Ok(summary);
    }

    if options.listing() {
        if options.list_source {
            log_listing("Source", &source_items);
        }
        if options.list_destination {
            let destination_items = if options.destination.is_dir() {
                enumerate_media(&options.destination, &options.filter)?
            } else {
                Vec::new()
            };
            log_listing("Destination", &destination_items);
        }
        return Ok(summary);
    }

    let destination_dirs = list_directories(&options.destination);
    tracing::debug!("Destination contains {} folder(s)", destination_dirs.len());

    let plan = SyncPlan::build(
        &source_items,
        &destination_dirs,
        &options.destination,
        options.plan_mode(),
    );
    summary.plan_copy = plan.to_copy.len();
    summary.plan_present = plan.already_present.len();
    summary.plan_delete = plan.to_delete.len();

    tracing::info!(
        "Plan: {} source item(s), {} to copy, {} already present, {} to delete",
        source_items.len(),
        plan.to_copy.len(),
        plan.already_present.len(),
        plan.to_delete.len()
    );
    for present in &plan.already_present {
        tracing::info!("Already present: {}", present.item.relative_display());
    }

    let executor = Executor::new(options.simulate, options.progress_size, prompt);

    if options.copy {
        summary.copy = Some(executor.run_batch(BatchKind::Copy, &plan.to_copy)?);
    }
    if options.delete {
        summary.delete = Some(executor.run_batch(BatchKind::Delete, &plan.to_delete)?);
    }

    if !options.copy && !options.delete {
        tracing::info!("No action requested (use --copy and/or --delete)");
    }

    Ok(summary)
}

fn log_listing(side: &str, items: &[MediaItem]) {
    tracing::info!("{} items ({}):", side, items.len());
    for item in items {
        tracing::info!("  {}", item.relative_display());
    }
}
