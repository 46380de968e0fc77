//! Section-aware line insertion on raw markdown text.

pub mod editor;
pub mod inserter;
pub mod types;

// Re-export primary API
pub use editor::SectionEditor;
pub use types::{
    HEADING_MARKER, InsertError, InsertPosition, InsertRequest, InsertResult,
    InsertStatus, InvalidPosition, SectionInfo,
};
