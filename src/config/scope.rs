//! Two-level settings lookup: a broad global layer and an optional narrow
//! workspace layer that wins key by key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ConfigError, MonitorSettings};

/// One layer of raw setting values
pub type Values = serde_json::Map<String, Value>;

/// Where a setting lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    /// User-wide settings
    Global,
    /// Settings for the currently open workspace
    Workspace,
}

impl std::fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigScope::Global => write!(f, "global"),
            ConfigScope::Workspace => write!(f, "workspace"),
        }
    }
}

/// Merge two layers; keys present in `workspace` override `global`.
///
/// An explicit `null` in the narrow layer still overrides, which is how a
/// workspace turns off a nullable option set globally.
pub fn resolve(global: Option<&Values>, workspace: Option<&Values>) -> Values {
    let mut merged = global.cloned().unwrap_or_default();
    if let Some(workspace) = workspace {
        for (key, value) in workspace {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Raw settings held in their scopes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopedConfig {
    global: Values,
    workspace: Option<Values>,
}

impl ScopedConfig {
    pub fn new(global: Values, workspace: Option<Values>) -> Self {
        Self { global, workspace }
    }

    pub fn has_workspace(&self) -> bool {
        self.workspace.is_some()
    }

    pub fn layer(&self, scope: ConfigScope) -> Option<&Values> {
        match scope {
            ConfigScope::Global => Some(&self.global),
            ConfigScope::Workspace => self.workspace.as_ref(),
        }
    }

    /// Effective value of `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.workspace
            .as_ref()
            .and_then(|ws| ws.get(key))
            .or_else(|| self.global.get(key))
    }

    /// Scope whose value is currently in effect for `key`
    pub fn effective_scope(&self, key: &str) -> Option<ConfigScope> {
        if self.workspace.as_ref().is_some_and(|ws| ws.contains_key(key)) {
            Some(ConfigScope::Workspace)
        } else if self.global.contains_key(key) {
            Some(ConfigScope::Global)
        } else {
            None
        }
    }

    pub fn resolved(&self) -> Values {
        resolve(Some(&self.global), self.workspace.as_ref())
    }

    /// Replace a whole layer (the host reported new values)
    pub fn replace_layer(&mut self, scope: ConfigScope, values: Values) {
        match scope {
            ConfigScope::Global => self.global = values,
            ConfigScope::Workspace => self.workspace = Some(values),
        }
    }

    /// Set one key, returning the scope that was actually written.
    ///
    /// Workspace writes land in the global layer when no workspace is open.
    pub fn update(&mut self, key: &str, value: Value, scope: ConfigScope) -> ConfigScope {
        match (scope, self.workspace.as_mut()) {
            (ConfigScope::Workspace, Some(workspace)) => {
                workspace.insert(key.to_string(), value);
                ConfigScope::Workspace
            }
            (ConfigScope::Workspace, None) => {
                tracing::debug!("No workspace open, writing {} globally", key);
                self.global.insert(key.to_string(), value);
                ConfigScope::Global
            }
            (ConfigScope::Global, _) => {
                self.global.insert(key.to_string(), value);
                ConfigScope::Global
            }
        }
    }

    /// Typed settings from the merged layers
    pub fn settings(&self) -> Result<MonitorSettings, ConfigError> {
        let merged: Values = self
            .resolved()
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .collect();
        Ok(serde_json::from_value(Value::Object(merged))?)
    }
}
