//! Configuration management for mediasync
//!
//! Settings are layered with figment, lowest priority first:
//! embedded defaults, a config file (`--config` or `mediasync.{toml,yaml,yml,json}`
//! in the working directory), then `MEDIASYNC_*` environment variables.
//! CLI flags are applied on top when the run options are built.

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod smart_load;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "MEDIASYNC_";
const DEFAULT_LOG_FILE: &str = "mediasync.log";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSyncConfig {
    pub logging: LoggingConfig,
    pub sync: SyncDefaults,
}

/// Log file and level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path; next to the executable when unset
    pub file: Option<PathBuf>,

    /// Level filter for the log file (`trace` .. `error`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

/// Defaults for sync flags that are not given on the command line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncDefaults {
    /// `Year <op> YYYY` condition used when `--condition` is absent
    pub condition: Option<String>,

    /// Annotate progress lines with cumulative sizes
    pub progress_size: bool,

    /// Answer yes to every confirmation gate
    pub assume_yes: bool,
}

impl MediaSyncConfig {
    /// Load configuration relative to the current working directory
    pub fn load(custom_config: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::load_from(&cwd, custom_config)
    }

    /// Load configuration, looking for project files in `base_dir`
    pub fn load_from(base_dir: &Path, custom_config: Option<&Path>) -> Result<Self> {
        Self::figment(base_dir, custom_config)?
            .extract()
            .context("Failed to parse configuration")
    }

    fn figment(base_dir: &Path, custom_config: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            if !custom_path.is_file() {
                bail!("Config file not found: {}", custom_path.display());
            }
            figment = figment.merge(smart_load::auto(custom_path));
        } else {
            figment = figment
                .merge(Toml::file(base_dir.join("mediasync.toml")))
                .merge(Yaml::file(base_dir.join("mediasync.yaml")))
                .merge(Yaml::file(base_dir.join("mediasync.yml")))
                .merge(Json::file(base_dir.join("mediasync.json")));
        }

        // Environment variables always have highest priority
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Resolved log file path
    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.logging.file {
            return Ok(file.clone());
        }
        let exe = std::env::current_exe().context("Failed to locate the running executable")?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(dir.join(DEFAULT_LOG_FILE))
    }
}
