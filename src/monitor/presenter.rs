//! Status bar text and the flashing accent, derived from tracking state

use crate::domain::{HostCommand, Millis, MonitorCommand, TerminalId, TrackedExecution};

/// What the status bar should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub text: String,
    pub tooltip: String,
    pub visible: bool,
}

/// Render a duration as `45s`, `1m 05s` or `1h 02m`
pub fn format_duration(ms: Millis) -> String {
    let secs = ms / 1_000;
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3_600 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h {:02}m", secs / 3_600, (secs % 3_600) / 60)
    }
}

/// Icon for the status entry, picked from the execution's state
fn status_icon(exec: &TrackedExecution, now: Millis) -> &'static str {
    if exec.is_snoozed(now) {
        "$(debug-pause)"
    } else if exec.destroy_requested || exec.termination_attempts > 0 {
        "$(stop-circle)"
    } else if exec.idle_alerted || exec.total_alerted {
        "$(bell)"
    } else {
        "$(clock)"
    }
}

/// Derive the status entry.
///
/// Shows the focused terminal's command when it is tracked, otherwise the
/// command idle the longest.
pub fn status_view(
    enabled: bool,
    executions: &[TrackedExecution],
    focused: Option<TerminalId>,
    now: Millis,
) -> StatusView {
    if !enabled {
        return StatusView {
            text: "$(eye-closed) Idle monitor: off".to_string(),
            tooltip: "Terminal idle monitoring is disabled".to_string(),
            visible: true,
        };
    }

    let shown = focused
        .and_then(|terminal| {
            executions
                .iter()
                .filter(|exec| exec.terminal == terminal)
                .max_by_key(|exec| (exec.started_at, exec.id))
        })
        .or_else(|| {
            executions
                .iter()
                .filter(|exec| !exec.destroy_requested)
                .max_by_key(|exec| (exec.idle_ms(now), exec.id))
        });

    let Some(exec) = shown else {
        return StatusView {
            text: "$(clock) Idle monitor: watching".to_string(),
            tooltip: "No running commands".to_string(),
            visible: true,
        };
    };

    let icon = status_icon(exec, now);
    let text = if exec.is_snoozed(now) {
        format!(
            "{} {} · snoozed {}",
            icon,
            exec.label,
            format_duration(exec.snoozed_until.saturating_sub(now))
        )
    } else {
        format!(
            "{} {} · idle {} · total {}",
            icon,
            exec.label,
            format_duration(exec.idle_ms(now)),
            format_duration(exec.elapsed_ms(now))
        )
    };
    let tooltip = match executions.len() {
        1 => "1 command monitored · click for actions".to_string(),
        n => format!("{} commands monitored · click for actions", n),
    };

    StatusView {
        text,
        tooltip,
        visible: true,
    }
}

/// Emits status and flash commands only when they change
#[derive(Debug, Default)]
pub struct StatusPresenter {
    last: Option<StatusView>,
    flash_on: bool,
    flashing: bool,
}

impl StatusPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    /// Command for `view`, or `None` when nothing changed
    pub fn update(&mut self, view: StatusView) -> Option<HostCommand> {
        if self.last.as_ref() == Some(&view) {
            return None;
        }
        let command = HostCommand::SetStatus {
            text: view.text.clone(),
            tooltip: view.tooltip.clone(),
            visible: view.visible,
            command: MonitorCommand::ShowMenu,
        };
        self.last = Some(view);
        Some(command)
    }

    /// Begin flashing with the accent switched on
    pub fn start_flash(&mut self, color: &str) -> HostCommand {
        self.flashing = true;
        self.flash_on = true;
        HostCommand::SetFlash {
            color: Some(color.to_string()),
        }
    }

    /// Toggle the accent; called once per tick while flashing
    pub fn flash_tick(&mut self, color: &str) -> Option<HostCommand> {
        if !self.flashing {
            return None;
        }
        self.flash_on = !self.flash_on;
        Some(HostCommand::SetFlash {
            color: self.flash_on.then(|| color.to_string()),
        })
    }

    /// Stop flashing; `None` when it was not flashing
    pub fn stop_flash(&mut self) -> Option<HostCommand> {
        if !self.flashing {
            return None;
        }
        self.flashing = false;
        self.flash_on = false;
        Some(HostCommand::SetFlash { color: None })
    }
}
