use std::path::Path;

use chrono::Local;
use markin_core::config::types::ResolvedConfig;
use markin_core::note::fleeting_line;
use markin_core::section::{InsertRequest, InsertResult, SectionEditor};
use markin_core::{NoteFile, NoteFileError};
use tracing::{debug, info, warn};

use super::{fail, load_config};
use crate::prompt::{self, PromptOptions};
use crate::FlArgs;

const CMD: &str = "fl";

pub fn run(config: Option<&Path>, debug: bool, args: &FlArgs) {
    // 1. Load config
    let cfg = load_config(CMD, config, debug);

    // 2. Format the note against the wall clock
    let now = Local::now();
    let Some(line) = fleeting_line(&args.note, now.time()) else {
        println!("OK   markin {CMD}");
        println!("nothing to insert: note is empty");
        return;
    };

    // 3. Resolve today's file
    let target = match cfg.target_file(now.date_naive()) {
        Ok(p) => p,
        Err(e) => fail(CMD, e),
    };

    // 4. Insert, asking before creating a missing section
    let request = build_request(&cfg, args, line);
    debug!(target = %target.display(), section = %request.section, "fleeting note");

    let note = NoteFile::new(&target);
    let options = PromptOptions { batch_mode: args.batch };

    let result = match note.insert(&request) {
        Ok(r) => r,
        Err(e) if e.is_recoverable() && options.can_prompt() => {
            retry_with_confirmation(&note, request.clone(), e)
        }
        Err(e) => report_insert_error(&note, e),
    };

    info!(status = result.status.as_str(), "fleeting note added");

    println!("OK   markin {CMD}");
    println!("target: {}", target.display());
    println!("section: {}", request.section);
    println!("status: {}", result.status.as_str());
}

fn build_request(cfg: &ResolvedConfig, args: &FlArgs, line: String) -> InsertRequest {
    let mut request = cfg.insert_request(line);
    if let Some(section) = args.section.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if !SectionEditor::is_heading(section) {
            warn!(section, "section has no '## ' marker and will not act as a section boundary");
        }
        request.section = section.to_string();
    }
    if let Some(position) = args.position {
        request.position = position;
    }
    if args.create_section {
        request.create_if_missing = true;
    }
    request
}

fn retry_with_confirmation(
    note: &NoteFile,
    request: InsertRequest,
    original: NoteFileError,
) -> InsertResult {
    match prompt::confirm_create_section(&request.section, note.path()) {
        Ok(true) => match note.insert(&request.create_if_missing(true)) {
            Ok(r) => r,
            Err(e) => report_insert_error(note, e),
        },
        Ok(false) => report_insert_error(note, original),
        Err(e) => fail(CMD, e),
    }
}

fn report_insert_error(note: &NoteFile, err: NoteFileError) -> ! {
    eprintln!("FAIL markin {CMD}");
    eprintln!("{err}");

    if let NoteFileError::SectionNotFound { .. } = err {
        let sections = note
            .read()
            .map(|content| SectionEditor::find_sections(&content))
            .unwrap_or_default();

        eprintln!("Available sections in {}:", note.path().display());
        if sections.is_empty() {
            eprintln!("  (none)");
        }
        for s in sections {
            eprintln!("  - {} (line {})", s.heading, s.line);
        }
        eprintln!("Hint: pass --create-section or set create_section_if_missing: true");
    }

    crate::logging::flush();
    std::process::exit(1);
}
