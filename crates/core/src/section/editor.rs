use crate::section::inserter;
use crate::section::types::{InsertError, InsertRequest, InsertResult, SectionInfo};

/// High-level API for section operations on raw markdown text
pub struct SectionEditor;

impl SectionEditor {
    /// Insert a line into a named section
    ///
    /// # Arguments
    /// * `input` - The source Markdown document (may be empty)
    /// * `request` - Section, line, position and create-if-missing flag
    ///
    /// # Returns
    /// The rewritten document and what was done to it
    ///
    /// # Errors
    /// * `SectionNotFound` - No line matches the section and creation is disabled
    pub fn insert_line(
        input: &str,
        request: &InsertRequest,
    ) -> Result<InsertResult, InsertError> {
        inserter::insert_line(input, request)
    }

    /// Find all `## ` headings in a document
    ///
    /// Useful for "did you mean" hints when a section is missing
    #[must_use]
    pub fn find_sections(input: &str) -> Vec<SectionInfo> {
        inserter::find_sections(input)
    }

    /// Whether `line` is a `## ` heading, i.e. a section boundary
    #[must_use]
    pub fn is_heading(line: &str) -> bool {
        inserter::is_heading(line)
    }

    /// Check if a section exists in the document
    #[must_use]
    pub fn section_exists(input: &str, section: &str) -> bool {
        inserter::find_section(input, section).is_some()
    }
}
