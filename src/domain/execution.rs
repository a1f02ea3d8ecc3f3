use serde::{Deserialize, Serialize};

use super::{AlertToken, ExecutionId, Millis, TerminalId};

/// Maximum number of characters of the command line kept for display
pub const MAX_LABEL_CHARS: usize = 30;

/// Tracking state for one running terminal command.
///
/// Owned by the [`ExecutionRegistry`](crate::monitor::ExecutionRegistry);
/// everything else reads it through the registry and never holds on to it
/// past the execution's end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedExecution {
    /// Host-assigned execution handle
    pub id: ExecutionId,

    /// Terminal the command runs in
    pub terminal: TerminalId,

    /// Current display name of the terminal (used for exclusion matching)
    pub terminal_name: String,

    /// Truncated command line for display
    pub label: String,

    /// When the command started
    pub started_at: Millis,

    /// Last output activity (never earlier than `started_at`)
    pub last_activity_at: Millis,

    /// An idle alert has been raised for the current idle stretch
    pub idle_alerted: bool,

    /// An obnoxious idle alert has been raised for the current idle stretch
    pub obnoxious_alerted: bool,

    /// The total-runtime alert has been raised
    pub total_alerted: bool,

    /// Evaluation is suspended until this instant
    pub snoozed_until: Millis,

    /// The next idle alert must be obnoxious (escalating snooze)
    pub force_next_obnoxious: bool,

    /// Graceful interrupts sent so far
    pub termination_attempts: u32,

    /// A destroy has been requested; waiting for the host to report the end
    pub destroy_requested: bool,

    /// Quiet notification that must be closed when fresh activity arrives
    #[serde(default)]
    pub pending_dismissal: Option<AlertToken>,
}

impl TrackedExecution {
    /// Start tracking a command at `now` with all latches cleared
    pub fn new(
        id: ExecutionId,
        terminal: TerminalId,
        terminal_name: impl Into<String>,
        command_line: &str,
        now: Millis,
    ) -> Self {
        Self {
            id,
            terminal,
            terminal_name: terminal_name.into(),
            label: truncate_label(command_line),
            started_at: now,
            last_activity_at: now,
            idle_alerted: false,
            obnoxious_alerted: false,
            total_alerted: false,
            snoozed_until: 0,
            force_next_obnoxious: false,
            termination_attempts: 0,
            destroy_requested: false,
            pending_dismissal: None,
        }
    }

    /// Milliseconds since the command started
    pub fn elapsed_ms(&self, now: Millis) -> Millis {
        now.saturating_sub(self.started_at)
    }

    /// Milliseconds since the last output activity
    pub fn idle_ms(&self, now: Millis) -> Millis {
        now.saturating_sub(self.last_activity_at)
    }

    pub fn is_snoozed(&self, now: Millis) -> bool {
        now < self.snoozed_until
    }

    /// Record output activity: restarts the idle clock and re-arms idle alerts.
    ///
    /// Returns the quiet notification that should now be closed, if any.
    pub fn touch(&mut self, now: Millis) -> Option<AlertToken> {
        self.last_activity_at = now.max(self.started_at);
        self.idle_alerted = false;
        self.obnoxious_alerted = false;
        self.pending_dismissal.take()
    }

    /// Suspend evaluation for `minutes` and re-arm every alert
    pub fn snooze(&mut self, minutes: u64, now: Millis, escalate: bool) {
        self.snoozed_until = now.saturating_add(minutes.saturating_mul(60_000));
        self.idle_alerted = false;
        self.obnoxious_alerted = false;
        self.total_alerted = false;
        if escalate {
            self.force_next_obnoxious = true;
        }
    }
}

/// Shorten a command line for display, appending an ellipsis when cut
pub fn truncate_label(command_line: &str) -> String {
    let trimmed = command_line.trim();
    if trimmed.chars().count() <= MAX_LABEL_CHARS {
        return trimmed.to_string();
    }
    let mut label: String = trimmed.chars().take(MAX_LABEL_CHARS).collect();
    label.push('…');
    label
}
