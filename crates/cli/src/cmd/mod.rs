pub mod completions;
pub mod doctor;
pub mod fl;
pub mod init;

use markin_core::config::loader::{default_config_path, ConfigLoader};
use markin_core::config::types::ResolvedConfig;
use std::path::Path;

use crate::logging;

/// Load configuration for `command`, or print the failure and exit.
///
/// Logging is installed from the loaded configuration, so a config that
/// fails to load is reported on stderr without a subscriber.
pub(crate) fn load_config(command: &str, config: Option<&Path>, debug: bool) -> ResolvedConfig {
    match ConfigLoader::load(config) {
        Ok(rc) => {
            logging::init(&rc.logging, debug);
            rc
        }
        Err(e) => {
            eprintln!("FAIL markin {command}");
            eprintln!("{e}");
            if config.is_none() {
                eprintln!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}

/// Print a failure line plus `detail` and exit with status 1.
pub(crate) fn fail(command: &str, detail: impl std::fmt::Display) -> ! {
    eprintln!("FAIL markin {command}");
    eprintln!("{detail}");
    logging::flush();
    std::process::exit(1);
}
