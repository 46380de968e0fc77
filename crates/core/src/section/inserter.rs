use tracing::debug;

use crate::section::types::{
    HEADING_MARKER, InsertError, InsertPosition, InsertRequest, InsertResult,
    InsertStatus, SectionInfo,
};

/// Where the scanner stands relative to the target section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeSection,
    InSection,
    AfterSection,
}

/// Insert a single line into the named section of a markdown document.
///
/// Works on raw lines: a line whose trimmed form starts with `## ` is a
/// section boundary, everything else is content. The output is always
/// whitespace-normalized, except for the no-op case where
/// the input is handed back untouched.
///
/// # Errors
/// * `SectionNotFound` - no line matches the section and creation is disabled
pub fn insert_line(
    input: &str,
    request: &InsertRequest,
) -> Result<InsertResult, InsertError> {
    if request.is_noop() {
        return Ok(InsertResult {
            content: input.to_string(),
            status: InsertStatus::Unchanged,
        });
    }

    let section = request.section.trim();
    let line = fold_line(&request.line);

    if input.trim().is_empty() {
        debug!(section, "document empty, creating it");
        return Ok(InsertResult {
            content: format!("{section}\n{line}\n"),
            status: InsertStatus::CreatedDocument,
        });
    }

    let mut out: Vec<&str> = Vec::new();
    let mut state = ScanState::BeforeSection;
    let mut inserted = false;

    for current in split_lines(input) {
        match state {
            ScanState::BeforeSection => {
                out.push(current);
                if is_match(current, section) {
                    state = ScanState::InSection;
                    if request.position == InsertPosition::AfterHeading {
                        out.push(&line);
                        inserted = true;
                    }
                }
            }
            ScanState::InSection => {
                // A repeated copy of the target heading does not end the section
                if is_heading(current) && !is_match(current, section) {
                    if !inserted {
                        place_at_section_end(&mut out, &line);
                        inserted = true;
                    }
                    state = ScanState::AfterSection;
                }
                out.push(current);
            }
            ScanState::AfterSection => out.push(current),
        }
    }

    // Target section runs to end-of-document
    if state == ScanState::InSection && !inserted {
        place_at_section_end(&mut out, &line);
        inserted = true;
    }

    let status = if inserted {
        InsertStatus::Inserted
    } else if request.create_if_missing {
        trim_trailing_blanks(&mut out);
        if !out.is_empty() {
            out.push("");
        }
        out.push(section);
        out.push(&line);
        InsertStatus::CreatedSection
    } else {
        return Err(InsertError::SectionNotFound(section.to_string()));
    };

    debug!(section, position = %request.position, ?status, "line inserted");

    Ok(InsertResult { content: normalize(&out), status })
}

/// All `## ` headings in document order.
#[must_use]
pub fn find_sections(input: &str) -> Vec<SectionInfo> {
    split_lines(input)
        .enumerate()
        .filter(|(_, l)| is_heading(l))
        .map(|(idx, l)| SectionInfo { heading: l.trim().to_string(), line: idx + 1 })
        .collect()
}

/// First line matching the section, if any.
#[must_use]
pub fn find_section(input: &str, section: &str) -> Option<SectionInfo> {
    let section = section.trim();
    split_lines(input)
        .enumerate()
        .find(|(_, l)| is_match(l, section))
        .map(|(idx, l)| SectionInfo { heading: l.trim().to_string(), line: idx + 1 })
}

/// Whitespace normalization applied to every rewritten document:
/// - runs of blank lines collapse into one
/// - a `## ` heading that follows content gets exactly one blank line before it
/// - trailing blank lines are dropped
/// - lines are joined with `\n` and the result ends with exactly one `\n`
fn normalize(lines: &[&str]) -> String {
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len() + 4);

    for &line in lines {
        if is_blank(line) {
            if kept.last().is_some_and(|prev| is_blank(prev)) {
                continue;
            }
            kept.push("");
            continue;
        }

        if is_heading(line) && kept.last().is_some_and(|prev| !is_blank(prev)) {
            kept.push("");
        }
        kept.push(line);
    }

    trim_trailing_blanks(&mut kept);

    let mut content = kept.join("\n");
    content.push('\n');
    content
}

/// Drop trailing blank lines, then append the line.
fn place_at_section_end<'a>(out: &mut Vec<&'a str>, line: &'a str) {
    trim_trailing_blanks(out);
    out.push(line);
}

fn trim_trailing_blanks(lines: &mut Vec<&str>) {
    while lines.last().is_some_and(|l| is_blank(l)) {
        lines.pop();
    }
}

/// Split on `\r\n`, `\r` and `\n` alike.
fn split_lines(input: &str) -> impl Iterator<Item = &str> {
    input.split("\r\n").flat_map(|chunk| chunk.split(['\r', '\n']))
}

/// The inserted text must stay a single line.
fn fold_line(line: &str) -> String {
    line.trim_end_matches(['\r', '\n']).replace("\r\n", " ").replace(['\r', '\n'], " ")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub(crate) fn is_heading(line: &str) -> bool {
    line.trim().starts_with(HEADING_MARKER)
}

fn is_match(line: &str, section: &str) -> bool {
    !section.is_empty() && line.trim() == section
}
