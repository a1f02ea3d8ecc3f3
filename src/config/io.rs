//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::scope::{ScopedConfig, Values};
use super::{ConfigError, ConfigScope};

/// Where each settings layer lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub global: PathBuf,
    pub workspace: Option<PathBuf>,
}

impl ConfigPaths {
    /// Paths for the user's global config and, optionally, a workspace
    pub fn discover(workspace_dir: Option<&Path>) -> Self {
        Self {
            global: global_config_path(),
            workspace: workspace_dir.map(workspace_config_path),
        }
    }

    pub fn for_scope(&self, scope: ConfigScope) -> Option<&Path> {
        match scope {
            ConfigScope::Global => Some(self.global.as_path()),
            ConfigScope::Workspace => self.workspace.as_deref(),
        }
    }

    /// Load both layers; a missing file is an empty layer
    pub fn load(&self) -> Result<ScopedConfig, ConfigError> {
        let global = load_layer(&self.global)?;
        let workspace = match &self.workspace {
            Some(path) => Some(load_layer(path)?),
            None => None,
        };
        Ok(ScopedConfig::new(global, workspace))
    }
}

/// Get the global config directory path (~/.termwatch/)
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".termwatch")
}

/// Get the global config file path (~/.termwatch/config.toml)
pub fn global_config_path() -> PathBuf {
    global_config_dir().join("config.toml")
}

/// Get the workspace config file path (<dir>/.termwatch/config.toml)
pub fn workspace_config_path(dir: &Path) -> PathBuf {
    dir.join(".termwatch").join("config.toml")
}

/// Read one settings layer from a TOML file
pub fn load_layer(path: &Path) -> Result<Values, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Values::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(toml::from_str::<Values>(&content)?)
}

/// Save one settings layer with atomic write and file locking.
///
/// TOML has no null, so `null` entries are left out of the file.
pub fn save_layer(path: &Path, values: &Values) -> Result<(), ConfigError> {
    let persisted: Values = values
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let content = toml::to_string_pretty(&persisted)?;
    write_atomic(path, &content)
}

fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Lock file is separate from the config so the rename below cannot drop it
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)?;
    lock_file.lock_exclusive()?;

    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.sync_all()?;

    std::fs::rename(&temp_path, path)?;
    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}
