//! Config command implementation

use anyhow::{Context, Result};
use std::path::Path;

use termwatch::config::{ConfigPaths, ConfigScope, ScopedConfig};

/// Show the effective settings and where each value comes from
pub async fn config_command(workspace: Option<&Path>) -> Result<()> {
    let paths = ConfigPaths::discover(workspace);
    let config = paths.load().context("Failed to load settings")?;

    println!("Global:    {}", paths.global.display());
    match &paths.workspace {
        Some(path) => println!("Workspace: {}", path.display()),
        None => println!("Workspace: (none)"),
    }
    println!();

    for line in describe(&config)? {
        println!("  {}", line);
    }

    Ok(())
}

/// One `key = value  (source)` line per setting
fn describe(config: &ScopedConfig) -> Result<Vec<String>> {
    let settings = config.settings()?;
    let serde_json::Value::Object(values) = serde_json::to_value(&settings)? else {
        return Ok(Vec::new());
    };

    let lines = values
        .iter()
        .map(|(key, value)| {
            let source = match config.effective_scope(key) {
                Some(ConfigScope::Workspace) => "workspace",
                Some(ConfigScope::Global) => "global",
                None => "default",
            };
            format!("{} = {}  ({})", key, value, source)
        })
        .collect();
    Ok(lines)
}
