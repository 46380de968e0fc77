//! Interactive confirmation for recoverable failures.
//!
//! Prompts only run when stdin is a terminal and batch mode is off, so
//! scripts and CI never block on input.

use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::{self, IsTerminal};
use std::path::Path;

/// Options for prompting behavior.
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    /// If true, never prompt.
    pub batch_mode: bool,
}

impl PromptOptions {
    pub fn can_prompt(&self) -> bool {
        !self.batch_mode && io::stdin().is_terminal()
    }
}

#[derive(Debug)]
pub enum PromptError {
    /// User dismissed the prompt.
    Cancelled,
    /// Terminal interaction failed.
    Terminal(String),
}

impl std::fmt::Display for PromptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptError::Cancelled => write!(f, "input cancelled by user"),
            PromptError::Terminal(msg) => write!(f, "terminal error: {msg}"),
        }
    }
}

impl std::error::Error for PromptError {}

/// Ask whether `section` should be appended to the note at `path`.
pub fn confirm_create_section(section: &str, path: &Path) -> Result<bool, PromptError> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Section '{section}' is not in {}. Create it?",
            path.display()
        ))
        .default(true)
        .interact_opt()
        .map_err(|e| PromptError::Terminal(e.to_string()))?
        .ok_or(PromptError::Cancelled)
}
