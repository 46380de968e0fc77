use std::path::{Path, PathBuf};

use chrono::Local;
use markin_core::config::types::ResolvedConfig;
use markin_core::vars::has_date_tokens;
use serde::Serialize;

use super::{fail, load_config};

#[derive(Debug, Serialize)]
struct DoctorReport {
    config_path: PathBuf,
    project_dir: PathBuf,
    daily_note_path: String,
    daily_note_name: String,
    target_file: PathBuf,
    target_exists: bool,
    /// True when the target changes with the date
    dated: bool,
    section: String,
    position: &'static str,
    create_section_if_missing: bool,
    log_level: String,
    log_file: Option<PathBuf>,
}

impl DoctorReport {
    fn new(rc: &ResolvedConfig, target_file: PathBuf) -> Self {
        Self {
            config_path: rc.config_path.clone(),
            project_dir: rc.project_dir.clone(),
            daily_note_path: rc.daily_note_path.clone(),
            daily_note_name: rc.daily_note_name.clone(),
            target_exists: target_file.is_file(),
            dated: has_date_tokens(&rc.daily_note_path) || has_date_tokens(&rc.daily_note_name),
            target_file,
            section: rc.section.clone(),
            position: rc.position.as_str(),
            create_section_if_missing: rc.create_section_if_missing,
            log_level: rc.logging.level.clone(),
            log_file: rc.logging.file.clone(),
        }
    }
}

pub fn run(config: Option<&Path>, debug: bool, json: bool) {
    let rc = load_config("doctor", config, debug);

    let target_file = match rc.target_file(Local::now().date_naive()) {
        Ok(p) => p,
        Err(e) => fail("doctor", e),
    };
    let report = DoctorReport::new(&rc, target_file);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => fail("doctor", e),
        }
        return;
    }

    println!("OK   markin doctor");
    println!("path: {}", report.config_path.display());
    println!("project_dir: {}", report.project_dir.display());
    println!("daily_note_path: {}", report.daily_note_path);
    println!("daily_note_name: {}", report.daily_note_name);
    println!(
        "target_file: {}{}",
        report.target_file.display(),
        if report.target_exists { "" } else { " (will be created)" }
    );
    println!("dated: {}", report.dated);
    println!("section: {}", report.section);
    println!("position: {}", report.position);
    println!("create_section_if_missing: {}", report.create_section_if_missing);
    println!("logging.level: {}", report.log_level);
    if let Some(ref file) = report.log_file {
        println!("logging.file: {}", file.display());
    }
}
