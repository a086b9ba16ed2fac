//! Confirmation gate shown before each batch.

use anyhow::{Context, Result};
use dialoguer::{Confirm as ConfirmPrompt, theme::ColorfulTheme};

/// Blocking yes/no question asked once per batch.
pub trait Confirm {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Asks on the terminal; defaults to "no".
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for TerminalPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        ConfirmPrompt::with_theme(&self.theme)
            .with_prompt(question)
            .default(false)
            .interact()
            .context("Failed to read confirmation from terminal")
    }
}

/// Answers yes without asking (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, question: &str) -> Result<bool> {
        tracing::debug!("{} -> yes (assumed)", question);
        Ok(true)
    }
}
