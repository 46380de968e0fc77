//! YAML configuration: loading, env expansion and sample generation.

pub mod loader;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, SAMPLE_CONFIG, default_config_path, generate_sample_config,
};
pub use types::{ConfigFile, LoggingConfig, ResolvedConfig};
