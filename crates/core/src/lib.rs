#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Core library for `markin`: insert a line into a `## ` section of a
//! markdown note, creating the section or the file when asked to.

pub mod config;
pub mod note;
pub mod notefile;
pub mod section;
pub mod vars;

pub use notefile::{NoteFile, NoteFileError};
pub use section::{InsertPosition, InsertRequest, InsertResult, InsertStatus, SectionEditor};
