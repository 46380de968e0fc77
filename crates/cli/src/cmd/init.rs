use std::path::Path;

use markin_core::config::loader::{default_config_path, generate_sample_config};
use markin_core::config::types::LoggingConfig;
use tracing::info;

use super::fail;
use crate::logging;

pub fn run(config: Option<&Path>, debug: bool) {
    logging::init(&LoggingConfig::default(), debug);

    let path = config.map_or_else(default_config_path, Path::to_path_buf);

    if let Err(e) = generate_sample_config(&path) {
        fail("init", e);
    }

    info!(path = %path.display(), "sample config written");
    println!("OK   markin init");
    println!("path: {}", path.display());
}
