//! Init command implementation

use anyhow::{bail, Context, Result};
use std::path::Path;

use termwatch::config::{global_config_path, workspace_config_path};

/// Default configuration content for termwatch init
pub const DEFAULT_CONFIG: &str = r##"# termwatch configuration
# =======================
#
# Settings live in ~/.termwatch/config.toml (global) and, per workspace, in
# <workspace>/.termwatch/config.toml. A workspace value wins over the global one.

# Master switch
enabled = true

# Seconds without output before an idle alert (0 disables idle alerts)
idleTimeout = 60

# Minutes of runtime before a total-runtime alert (0 disables them)
totalTimeout = 30

# Only watch the focused terminal
onlyMonitorActive = false

# ============================================================================
# OBNOXIOUS MODE - blocking alerts with a flashing accent
# ============================================================================
#
#   obnoxiousMode      - every alert is a blocking modal
#   obnoxiousModeTime  - seconds of idleness after which a quiet alert escalates
#   obnoxiousSnooze    - the first idle alert after a snooze is obnoxious
#   obnoxiousColor     - accent color while an obnoxious alert is showing

obnoxiousMode = false
# obnoxiousModeTime = 300
obnoxiousSnooze = false
obnoxiousColor = "#ff0000"

# ============================================================================
# EXCLUSIONS - terminals that are never watched
# ============================================================================
#
# Comma-separated terminal names; `*` matches anything, matching ignores case.

enableExclusions = true
excludePatterns = ""

# ============================================================================
# TERMINATION
# ============================================================================
#
#   useSigInt             - send Ctrl+C before destroying the terminal
#   hardTerminateRetries  - interrupts to try before destroying
#   autoTerminateEnabled  - terminate commands idle for autoTerminateTimeout
#   autoTerminateTimeout  - minutes of idleness before auto-termination

useSigInt = true
hardTerminateRetries = 3
autoTerminateEnabled = false
autoTerminateTimeout = 30
"##;

/// Write the default config to the workspace (when given) or global location
pub async fn init_command(workspace: Option<&Path>, force: bool) -> Result<()> {
    let config_path = match workspace {
        Some(dir) => workspace_config_path(dir),
        None => global_config_path(),
    };

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Wrote default settings");
    println!("Created: {}", config_path.display());

    Ok(())
}
