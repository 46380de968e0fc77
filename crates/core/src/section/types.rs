use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Prefix that marks a section boundary. Only second-level headings count.
pub const HEADING_MARKER: &str = "## ";

/// Position within a section where the new line is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum InsertPosition {
    /// Insert immediately after the section heading (newest first)
    #[default]
    #[serde(rename = "after-heading")]
    AfterHeading,
    /// Insert after the last content line of the section (oldest first)
    #[serde(rename = "before-end", alias = "end-of-section")]
    BeforeEnd,
}

impl InsertPosition {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InsertPosition::AfterHeading => "after-heading",
            InsertPosition::BeforeEnd => "before-end",
        }
    }
}

impl fmt::Display for InsertPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertPosition {
    type Err = InvalidPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "after-heading" => Ok(InsertPosition::AfterHeading),
            "before-end" | "end-of-section" => Ok(InsertPosition::BeforeEnd),
            other => Err(InvalidPosition(other.to_string())),
        }
    }
}

/// A single line insertion into a named section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertRequest {
    /// Full heading line to match, including the `## ` marker
    pub section: String,
    /// The line to insert. Blank lines turn the request into a no-op.
    pub line: String,
    pub position: InsertPosition,
    /// Append the section at the end of the document when it is absent
    pub create_if_missing: bool,
}

impl InsertRequest {
    #[must_use]
    pub fn new(section: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            line: line.into(),
            position: InsertPosition::default(),
            create_if_missing: false,
        }
    }

    #[must_use]
    pub fn position(mut self, position: InsertPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// True when there is nothing to insert.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.line.trim().is_empty()
    }
}

/// What an insertion did to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStatus {
    /// Empty line; document returned as-is
    Unchanged,
    /// Line inserted into an existing section
    Inserted,
    /// Section was missing and has been appended with the line
    CreatedSection,
    /// Document was empty and now holds only the section and the line
    CreatedDocument,
}

impl InsertStatus {
    #[must_use]
    pub fn is_changed(self) -> bool {
        !matches!(self, InsertStatus::Unchanged)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InsertStatus::Unchanged => "unchanged",
            InsertStatus::Inserted => "inserted",
            InsertStatus::CreatedSection => "created section",
            InsertStatus::CreatedDocument => "created document",
        }
    }
}

/// Result of an insertion operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertResult {
    /// The full updated document
    pub content: String,
    pub status: InsertStatus,
}

/// A `## ` heading found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    /// Trimmed heading line, marker included
    pub heading: String,
    /// 1-based line number of the heading
    pub line: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InsertError {
    #[error("section not found: {0}")]
    SectionNotFound(String),
}

/// A position name that is not one of the accepted spellings
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid position '{0}' (expected after-heading, before-end or end-of-section)")]
pub struct InvalidPosition(pub String);
