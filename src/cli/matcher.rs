//! Match command implementation

use anyhow::{Context, Result};
use std::path::Path;

use termwatch::config::{split_patterns, ConfigPaths};
use termwatch::monitor::compile_pattern;

/// Check a terminal name against the exclusion patterns.
///
/// `patterns` overrides the configured list (and ignores `enableExclusions`).
pub async fn match_command(
    workspace: Option<&Path>,
    name: &str,
    patterns: Option<String>,
) -> Result<()> {
    let raw = match patterns {
        Some(raw) => raw,
        None => {
            let settings = ConfigPaths::discover(workspace)
                .load()
                .and_then(|config| config.settings())
                .context("Failed to load settings")?;
            if !settings.enable_exclusions {
                println!("Exclusions are disabled; {:?} is watched", name);
                return Ok(());
            }
            settings.exclude_patterns
        }
    };

    match first_match(name, &raw) {
        Some(pattern) => println!("{:?} is excluded by {:?}", name, pattern),
        None => println!("{:?} is watched", name),
    }

    Ok(())
}

fn first_match<'a>(name: &str, raw: &'a str) -> Option<&'a str> {
    split_patterns(raw)
        .into_iter()
        .find(|pattern| compile_pattern(pattern).is_some_and(|re| re.is_match(name)))
}
