//! Styled terminal output for the end-of-run summary.
//!
//! Progress and decisions go through `tracing` so they reach the log file too;
//! this only prints what a person reads at the end of a run.

use console::style;

use crate::size::bytes_to_gb;
use crate::sync::{BatchOutcome, RunSummary};

/// Output handler for consistent CLI formatting
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {:<18} {}", style(key).dim(), styled_value);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print an error message; always shown, even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print the closing summary of a run
    pub fn summary(&self, summary: &RunSummary, simulate: bool) {
        self.header(if simulate { "Summary (simulated)" } else { "Summary" });
        self.key_value("Source items", &summary.source_items.to_string(), false);

        if let Some(size) = summary.source_size_gb {
            self.key_value("Source size", &format!("{size:.2} GB"), true);
            return;
        }

        self.key_value("To copy", &summary.plan_copy.to_string(), false);
        self.key_value("Already present", &summary.plan_present.to_string(), false);
        self.key_value("To delete", &summary.plan_delete.to_string(), false);

        if let Some(outcome) = &summary.copy {
            self.key_value("Copied", &describe(outcome), outcome.processed > 0);
        }
        if let Some(outcome) = &summary.delete {
            self.key_value("Deleted", &describe(outcome), outcome.processed > 0);
        }
    }
}

fn describe(outcome: &BatchOutcome) -> String {
    if outcome.declined {
        "skipped (not confirmed)".to_string()
    } else {
        format!("{} ({:.2} GB)", outcome.processed, bytes_to_gb(outcome.bytes))
    }
}
