//! Command-line interface for mediasync
//!
//! A single flag-driven command: parse arguments, merge them over the
//! configuration file, set up logging, then hand a [`SyncOptions`] to the
//! sync run.

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

mod logging;
mod output;

pub use logging::setup_logging;
pub use output::Output;

use crate::config::MediaSyncConfig;
use crate::media::YearFilter;
use crate::sync::{self, AssumeYes, Confirm, SyncOptions, TerminalPrompt};

#[derive(Parser, Debug)]
#[command(
    name = "mediasync",
    version,
    about = "Synchronize year-tagged media folders from a source tree to a destination tree",
    long_about = "Synchronize media folders such as 'Movie (1999)' from a source directory \
                  to a destination directory, optionally filtered by the year in the folder \
                  name, and optionally delete what the destination already holds from the source."
)]
pub struct Cli {
    /// Source media root
    #[arg(short, long, env = "MEDIASYNC_SOURCE", value_name = "DIR")]
    pub source: PathBuf,

    /// Destination media root
    #[arg(short, long, env = "MEDIASYNC_DESTINATION", value_name = "DIR")]
    pub destination: PathBuf,

    /// Only handle folders matching `Year <op> YYYY` (op: == != >= <= > <)
    #[arg(short = 'c', long, value_name = "EXPR")]
    pub condition: Option<String>,

    /// Log file to append to (default: mediasync.log next to the executable)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// List source and destination items, then stop
    #[arg(long)]
    pub list: bool,

    /// List source items, then stop
    #[arg(long)]
    pub list_source: bool,

    /// List destination items, then stop
    #[arg(long)]
    pub list_destination: bool,

    /// Copy source items to the destination
    #[arg(long)]
    pub copy: bool,

    /// Only copy items missing from the destination and detect items to delete
    #[arg(long)]
    pub difference: bool,

    /// Delete source items already present at the destination
    #[arg(long, requires = "difference")]
    pub delete: bool,

    /// Log what would happen without touching the filesystem
    #[arg(long)]
    pub simulate: bool,

    /// Report the total size of the filtered source items, then stop
    #[arg(long)]
    pub full_size: bool,

    /// Show cumulative and total size on progress lines
    #[arg(long)]
    pub progress_size: bool,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase console verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print warnings and errors to the console
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Execute the sync run described by the arguments
    pub fn run(self) -> Result<()> {
        let config = MediaSyncConfig::load(self.config.as_deref())?;
        let log_file = match &self.log_file {
            Some(path) => path.clone(),
            None => config.log_file()?,
        };
        setup_logging(self.verbose, self.quiet, &config.logging.level, &log_file)?;

        let output = Output::new(self.quiet);
        let options = self.sync_options(&config);

        tracing::info!("mediasync {} started", crate::VERSION);
        tracing::debug!("Logging to {}", log_file.display());
        if options.filter.is_unparsable() {
            tracing::warn!(
                "Condition '{}' is not of the form 'Year <op> YYYY'; no folder will match",
                self.condition.as_deref().or(config.sync.condition.as_deref()).unwrap_or_default()
            );
        }

        let prompt: Box<dyn Confirm> = if self.yes || config.sync.assume_yes {
            Box::new(AssumeYes)
        } else {
            Box::new(TerminalPrompt::new())
        };

        match sync::run(&options, prompt.as_ref()) {
            Ok(summary) => {
                tracing::info!("Run finished");
                output.summary(&summary, options.simulate);
                output.success("Done");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Run failed: {:#}", e);
                output.error("Sync failed, see the log for details");
                Err(e)
            }
        }
    }

    /// Merge flags over configuration defaults
    pub fn sync_options(&self, config: &MediaSyncConfig) -> SyncOptions {
        let condition = self.condition.as_deref().or(config.sync.condition.as_deref());

        SyncOptions {
            source: self.source.clone(),
            destination: self.destination.clone(),
            filter: YearFilter::parse(condition),
            list_source: self.list || self.list_source,
            list_destination: self.list || self.list_destination,
            copy: self.copy,
            difference: self.difference,
            delete: self.delete,
            simulate: self.simulate,
            full_size: self.full_size,
            progress_size: self.progress_size || config.sync.progress_size,
        }
    }
}
