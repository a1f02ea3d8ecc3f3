//! Core domain types for termwatch

mod alert;
mod event;
mod execution;

pub use alert::{AlertAction, AlertKind, AlertRequest, AlertTier, SNOOZE_CHOICES};
pub use event::{HostCommand, HostEvent, MonitorCommand};
pub use execution::{truncate_label, TrackedExecution, MAX_LABEL_CHARS};

/// Milliseconds on the monitor's clock
pub type Millis = u64;

/// Host-assigned handle of a running command
pub type ExecutionId = u64;

/// Host-assigned handle of a terminal
pub type TerminalId = u64;

/// Identifies one presented alert so its dismissal can be matched up
pub type AlertToken = u64;

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> Millis {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
