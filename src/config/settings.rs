//! Monitor settings

use serde::{Deserialize, Serialize};

use crate::domain::Millis;

/// Setting keys as they appear in config files and host payloads
pub mod keys {
    pub const ENABLED: &str = "enabled";
    pub const IDLE_TIMEOUT: &str = "idleTimeout";
    pub const TOTAL_TIMEOUT: &str = "totalTimeout";
    pub const ONLY_MONITOR_ACTIVE: &str = "onlyMonitorActive";
    pub const OBNOXIOUS_MODE: &str = "obnoxiousMode";
    pub const OBNOXIOUS_COLOR: &str = "obnoxiousColor";
    pub const OBNOXIOUS_MODE_TIME: &str = "obnoxiousModeTime";
    pub const OBNOXIOUS_SNOOZE: &str = "obnoxiousSnooze";
    pub const ENABLE_EXCLUSIONS: &str = "enableExclusions";
    pub const EXCLUDE_PATTERNS: &str = "excludePatterns";
    pub const USE_SIG_INT: &str = "useSigInt";
    pub const HARD_TERMINATE_RETRIES: &str = "hardTerminateRetries";
    pub const AUTO_TERMINATE_ENABLED: &str = "autoTerminateEnabled";
    pub const AUTO_TERMINATE_TIMEOUT: &str = "autoTerminateTimeout";
}

/// Resolved monitor settings.
///
/// A timeout of `0` disables that threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSettings {
    /// Master switch
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds without output before an idle alert
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,

    /// Minutes of runtime before a total-runtime alert
    #[serde(default = "default_total_timeout")]
    pub total_timeout: u64,

    /// Ignore every terminal except the focused one
    #[serde(default)]
    pub only_monitor_active: bool,

    /// Every alert is a blocking modal
    #[serde(default)]
    pub obnoxious_mode: bool,

    /// Accent color used while an obnoxious alert flashes
    #[serde(default = "default_obnoxious_color")]
    pub obnoxious_color: String,

    /// Seconds of idleness after which the alert escalates to obnoxious
    #[serde(default)]
    pub obnoxious_mode_time: Option<u64>,

    /// Snoozing makes the next idle alert obnoxious
    #[serde(default)]
    pub obnoxious_snooze: bool,

    #[serde(default = "default_true")]
    pub enable_exclusions: bool,

    /// Comma-separated terminal name globs (`*` is the only wildcard)
    #[serde(default)]
    pub exclude_patterns: String,

    /// Terminate with Ctrl+C first instead of destroying the terminal
    #[serde(default = "default_true")]
    pub use_sig_int: bool,

    /// Interrupts sent before falling back to destroying the terminal
    #[serde(default = "default_hard_terminate_retries")]
    pub hard_terminate_retries: u32,

    #[serde(default)]
    pub auto_terminate_enabled: bool,

    /// Minutes of idleness before automatic termination
    #[serde(default = "default_auto_terminate_timeout")]
    pub auto_terminate_timeout: u64,
}

fn default_true() -> bool {
    true
}

fn default_idle_timeout() -> u64 {
    60
}

fn default_total_timeout() -> u64 {
    30
}

fn default_obnoxious_color() -> String {
    "#ff0000".to_string()
}

fn default_hard_terminate_retries() -> u32 {
    3
}

fn default_auto_terminate_timeout() -> u64 {
    30
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            idle_timeout: default_idle_timeout(),
            total_timeout: default_total_timeout(),
            only_monitor_active: false,
            obnoxious_mode: false,
            obnoxious_color: default_obnoxious_color(),
            obnoxious_mode_time: None,
            obnoxious_snooze: false,
            enable_exclusions: true,
            exclude_patterns: String::new(),
            use_sig_int: true,
            hard_terminate_retries: default_hard_terminate_retries(),
            auto_terminate_enabled: false,
            auto_terminate_timeout: default_auto_terminate_timeout(),
        }
    }
}

impl MonitorSettings {
    pub fn idle_timeout_ms(&self) -> Option<Millis> {
        non_zero(self.idle_timeout.saturating_mul(1_000))
    }

    pub fn total_timeout_ms(&self) -> Option<Millis> {
        non_zero(self.total_timeout.saturating_mul(60_000))
    }

    pub fn obnoxious_timeout_ms(&self) -> Option<Millis> {
        self.obnoxious_mode_time
            .and_then(|secs| non_zero(secs.saturating_mul(1_000)))
    }

    /// Idle time that triggers automatic termination, when enabled
    pub fn auto_terminate_ms(&self) -> Option<Millis> {
        if !self.auto_terminate_enabled {
            return None;
        }
        non_zero(self.auto_terminate_timeout.saturating_mul(60_000))
    }

    /// Exclusion patterns split on commas, trimmed, empties dropped
    pub fn patterns(&self) -> Vec<&str> {
        split_patterns(&self.exclude_patterns)
    }
}

fn non_zero(ms: Millis) -> Option<Millis> {
    (ms > 0).then_some(ms)
}

pub fn split_patterns(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
