use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::loader::ConfigError;
use crate::section::{InsertPosition, InsertRequest};
use crate::vars::render_date_tokens;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    /// Base directory holding the notes
    #[serde(alias = "markdown_dir")]
    pub project_dir: String,
    /// Sub-directory under `project_dir` (may contain date tokens)
    #[serde(default)]
    pub daily_note_path: String,
    /// File name of the note (may contain date tokens)
    #[serde(alias = "markdown_file")]
    pub daily_note_name: String,
    /// Heading line to insert under, `## ` marker included
    pub section: String,
    #[serde(default)]
    pub position: InsertPosition,
    #[serde(default)]
    pub create_section_if_missing: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Where the configuration was loaded from
    pub config_path: PathBuf,
    pub project_dir: PathBuf,
    /// Env-expanded; date tokens are rendered per run by [`ResolvedConfig::target_file`]
    pub daily_note_path: String,
    pub daily_note_name: String,
    pub section: String,
    pub position: InsertPosition,
    pub create_section_if_missing: bool,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    /// The note file for the given day: `project_dir/daily_note_path/daily_note_name`.
    ///
    /// # Errors
    /// `UnresolvedPath` when a date token is unknown or out of range.
    pub fn target_file(&self, today: NaiveDate) -> Result<PathBuf, ConfigError> {
        let render = |field: &'static str, value: &str| {
            render_date_tokens(value, today).map_err(|e| ConfigError::UnresolvedPath {
                field,
                value: value.to_string(),
                var: e.to_string(),
            })
        };

        let sub_dir = render("daily_note_path", &self.daily_note_path)?;
        let name = render("daily_note_name", &self.daily_note_name)?;

        let mut path = self.project_dir.clone();
        if !sub_dir.is_empty() {
            path.push(sub_dir);
        }
        path.push(name);
        Ok(path)
    }

    /// Insertion request for `line` using the configured section and policy.
    #[must_use]
    pub fn insert_request(&self, line: impl Into<String>) -> InsertRequest {
        InsertRequest::new(self.section.clone(), line)
            .position(self.position)
            .create_if_missing(self.create_section_if_missing)
    }
}
