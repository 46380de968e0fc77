use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};
use std::env::VarError;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use dirs::home_dir;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::section::SectionEditor;

/// A `$VAR` or `${VAR}` marker that survived expansion.
static UNEXPANDED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{?[A-Za-z_][A-Za-z0-9_]*\}?").expect("valid regex")
});

pub const CONFIG_DIR_NAME: &str = "markin";
pub const CONFIG_FILE_NAME: &str = ".markin.yaml";

/// Written by `markin init`.
pub const SAMPLE_CONFIG: &str = r###"# markin configuration
#
# Path values expand ~ and $VARS. Undefined variables are an error.
# daily_note_path and daily_note_name accept date tokens such as
# {{today}}, {{today - 1d}}, {{year}} or {{today | %Y/%m/%d}}.

project_dir: $HOME/notes
daily_note_path: daily
daily_note_name: "{{today}}.md"
section: "## 💭 ✍️ ✨ Notes"

# after-heading (newest first) or before-end (oldest first)
position: after-heading
create_section_if_missing: true

# logging:
#   level: warn
#   file_level: debug
#   file: ~/.local/state/markin/markin.log
"###;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] io::Error),

    #[error("failed to parse YAML in {0}: {1}")]
    ParseError(String, #[source] serde_yaml::Error),

    #[error("{0} must not be empty")]
    MissingValue(&'static str),

    #[error("{field} has an unresolved variable ({var}): {value}")]
    UnresolvedPath { field: &'static str, value: String, var: String },

    #[error("home directory not available to expand '~' in {0}")]
    NoHome(String),

    #[error("config file already exists at {0}")]
    AlreadyExists(String),

    #[error("failed to write config file {0}: {1}")]
    WriteError(String, #[source] io::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `config_path`, or the default location, expanding against
    /// the process environment.
    ///
    /// # Errors
    /// A missing or unreadable file, invalid YAML, empty required values and
    /// unresolved variables in path fields.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        Self::load_with_env(config_path, |name| std::env::var(name).ok())
    }

    /// Like [`ConfigLoader::load`] with a caller-supplied variable lookup.
    ///
    /// # Errors
    /// Same as [`ConfigLoader::load`].
    pub fn load_with_env<F>(
        config_path: Option<&Path>,
        env: F,
    ) -> Result<ResolvedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = serde_yaml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        debug!(path = %path.display(), "config parsed");

        Self::resolve(path, &cf, &env)
    }

    fn resolve<F>(
        config_path: PathBuf,
        cf: &ConfigFile,
        env: &F,
    ) -> Result<ResolvedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if cf.project_dir.trim().is_empty() {
            return Err(ConfigError::MissingValue("project_dir"));
        }
        if cf.daily_note_name.trim().is_empty() {
            return Err(ConfigError::MissingValue("daily_note_name"));
        }
        if cf.section.trim().is_empty() {
            return Err(ConfigError::MissingValue("section"));
        }
        if !SectionEditor::is_heading(&cf.section) {
            warn!(
                section = %cf.section,
                "section has no '## ' marker and will not act as a section boundary"
            );
        }

        let project_dir = PathBuf::from(expand_value("project_dir", &cf.project_dir, env)?);
        let daily_note_path = expand_value("daily_note_path", &cf.daily_note_path, env)?;
        let daily_note_name = expand_value("daily_note_name", &cf.daily_note_name, env)?;

        let logging = match cf.logging.file {
            Some(ref file) => {
                let expanded = expand_value("logging.file", &file.to_string_lossy(), env)?;
                LoggingConfig { file: Some(PathBuf::from(expanded)), ..cf.logging.clone() }
            }
            None => cf.logging.clone(),
        };

        Ok(ResolvedConfig {
            config_path,
            project_dir,
            daily_note_path,
            daily_note_name,
            section: cf.section.trim().to_string(),
            position: cf.position,
            create_section_if_missing: cf.create_section_if_missing,
            logging,
        })
    }
}

#[must_use]
pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Write [`SAMPLE_CONFIG`] to `path`, creating parent directories.
///
/// Never overwrites: an existing file is reported as `AlreadyExists` and
/// left untouched.
///
/// # Errors
/// `AlreadyExists`, or `WriteError` when the directory or file cannot be written.
pub fn generate_sample_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |e: io::Error| ConfigError::WriteError(path.display().to_string(), e);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(ConfigError::AlreadyExists(path.display().to_string()));
        }
        Err(e) => return Err(write_err(e)),
    };

    file.write_all(SAMPLE_CONFIG.as_bytes()).map_err(write_err)?;
    Ok(())
}

/// Expand `~` and `$VAR` / `${VAR}` in a path-valued entry.
fn expand_value<F>(field: &'static str, value: &str, env: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = shellexpand::full_with_context(
        value,
        || home_dir().map(|p| p.to_string_lossy().into_owned()),
        |name: &str| env(name).map(Some).ok_or(VarError::NotPresent),
    )
    .map_err(|e| ConfigError::UnresolvedPath {
        field,
        value: value.to_string(),
        var: format!("${}", e.var_name),
    })?;

    if expanded == "~" || expanded.starts_with("~/") {
        return Err(ConfigError::NoHome(value.to_string()));
    }

    if let Some(marker) = UNEXPANDED_RE.find(&expanded) {
        return Err(ConfigError::UnresolvedPath {
            field,
            value: expanded.to_string(),
            var: marker.as_str().to_string(),
        });
    }

    Ok(expanded.into_owned())
}
