//! Read-transform-write wrapper around the section inserter.
//!
//! A run reads the whole note into memory, computes the new content with
//! [`SectionEditor::insert_line`], and replaces the file through a temp file
//! in the same directory followed by a rename. A failed run leaves the
//! previous content in place.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::section::{InsertError, InsertRequest, InsertResult, SectionEditor};

#[derive(Debug, Error)]
pub enum NoteFileError {
    #[error("section '{section}' not found in {}", path.display())]
    SectionNotFound { section: String, path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NoteFileError {
    /// Only a missing section can be fixed by the caller (e.g. by allowing creation).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NoteFileError::SectionNotFound { .. })
    }
}

/// A markdown note on disk
#[derive(Debug, Clone)]
pub struct NoteFile {
    path: PathBuf,
}

impl NoteFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current content, or an empty string when the file does not exist yet.
    ///
    /// # Errors
    /// `Read` for any failure other than a missing file.
    pub fn read(&self) -> Result<String, NoteFileError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(NoteFileError::Read { path: self.path.clone(), source: e }),
        }
    }

    /// Insert the requested line and persist the result.
    ///
    /// An empty line returns `Unchanged` and nothing is written or created.
    ///
    /// # Errors
    /// `SectionNotFound` leaves the file untouched; IO failures are `Read`,
    /// `Write` or `CreateDir`.
    pub fn insert(&self, request: &InsertRequest) -> Result<InsertResult, NoteFileError> {
        let existing = self.read()?;
        let result = SectionEditor::insert_line(&existing, request)
            .map_err(|e| self.map_insert_error(e))?;

        if result.status.is_changed() {
            write_atomic(&self.path, &result.content)?;
            info!(
                path = %self.path.display(),
                section = %request.section.trim(),
                status = ?result.status,
                "note updated"
            );
        } else {
            debug!(path = %self.path.display(), "empty line, nothing to insert");
        }

        Ok(result)
    }

    fn map_insert_error(&self, e: InsertError) -> NoteFileError {
        match e {
            InsertError::SectionNotFound(section) => {
                NoteFileError::SectionNotFound { section, path: self.path.clone() }
            }
        }
    }
}

/// Write `content` to `path` via a sibling temp file and a rename.
///
/// Missing parent directories are created. Permissions of an existing
/// target are carried over to the replacement.
///
/// # Errors
/// `CreateDir` when the parent cannot be created, `Write` for the temp file
/// and the rename.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), NoteFileError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&dir)
        .map_err(|e| NoteFileError::CreateDir { path: dir.clone(), source: e })?;

    let write_err = |source: io::Error| NoteFileError::Write { path: path.to_path_buf(), source };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    match fs::metadata(path) {
        Ok(meta) => fs::set_permissions(tmp.path(), meta.permissions()).map_err(write_err)?,
        Err(_) => set_default_permissions(tmp.path()).map_err(write_err)?,
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
