//! Configuration loading and management

mod io;
mod scope;
mod settings;

pub use io::{
    global_config_dir, global_config_path, load_layer, save_layer, workspace_config_path,
    ConfigPaths,
};
pub use scope::{resolve, ConfigScope, ScopedConfig, Values};
pub use settings::{keys, split_patterns, MonitorSettings};

/// Errors reading, writing or interpreting settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Invalid setting value: {0}")]
    Invalid(#[from] serde_json::Error),
}
