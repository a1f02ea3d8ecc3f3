//! Notification coordination.
//!
//! At most one alert is visible process-wide. Presenting sets the global
//! "showing" slot and the execution's latches in the same step; dismissing
//! clears the slot exactly once per token and starts a short cooldown before
//! the next alert may appear.

use super::evaluator::latch;
use super::presenter::format_duration;
use crate::domain::{
    AlertAction, AlertKind, AlertRequest, AlertTier, AlertToken, ExecutionId, HostCommand, Millis,
    TerminalId, TrackedExecution,
};

/// Quiet period after a dismissal before another alert may be shown
pub const DISMISS_COOLDOWN_MS: Millis = 2_000;

/// The alert currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAlert {
    pub token: AlertToken,
    pub execution: ExecutionId,
    /// Terminal and name captured at presentation, usable after the
    /// execution itself is gone
    pub terminal: TerminalId,
    pub terminal_name: String,
    pub kind: AlertKind,
    pub tier: AlertTier,
    pub shown_at: Millis,
}

impl ActiveAlert {
    pub fn is_obnoxious(&self) -> bool {
        self.tier == AlertTier::Obnoxious
    }
}

/// A dismissed alert together with the action the user picked, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub alert: ActiveAlert,
    pub action: Option<AlertAction>,
}

/// Serializes alert presentation across all executions
#[derive(Debug)]
pub struct NotificationCoordinator {
    showing: Option<ActiveAlert>,
    last_dismissed_at: Option<Millis>,
    next_token: AlertToken,
}

impl Default for NotificationCoordinator {
    fn default() -> Self {
        Self {
            showing: None,
            last_dismissed_at: None,
            next_token: 1,
        }
    }
}

impl NotificationCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_showing(&self) -> bool {
        self.showing.is_some()
    }

    pub fn active(&self) -> Option<&ActiveAlert> {
        self.showing.as_ref()
    }

    pub fn last_dismissed_at(&self) -> Option<Millis> {
        self.last_dismissed_at
    }

    /// Whether a new alert (idle or total) may be presented at `now`
    pub fn gate_open(&self, now: Millis) -> bool {
        if self.showing.is_some() {
            return false;
        }
        match self.last_dismissed_at {
            Some(at) => now.saturating_sub(at) >= DISMISS_COOLDOWN_MS,
            None => true,
        }
    }

    /// Put `request` on screen for `exec`.
    ///
    /// Returns `None` when another alert holds the slot. On success the
    /// execution's latches are set and the host commands to show the alert
    /// are returned.
    pub fn present(
        &mut self,
        exec: &mut TrackedExecution,
        request: AlertRequest,
        now: Millis,
    ) -> Option<HostCommand> {
        if self.showing.is_some() {
            return None;
        }

        let token = self.next_token;
        self.next_token += 1;

        latch(exec, request);
        let (title, message) = alert_text(exec, request.kind, now);
        let command = match request.tier {
            AlertTier::Quiet => {
                exec.pending_dismissal = Some(token);
                HostCommand::ShowNotification {
                    token,
                    title,
                    message,
                }
            }
            AlertTier::Obnoxious => HostCommand::ShowModal {
                token,
                title,
                message,
                buttons: AlertAction::buttons_for(request.kind)
                    .iter()
                    .map(AlertAction::label)
                    .collect(),
            },
        };

        tracing::info!(
            execution = exec.id,
            kind = ?request.kind,
            tier = ?request.tier,
            "Raising alert {}",
            token
        );
        self.showing = Some(ActiveAlert {
            token,
            execution: exec.id,
            terminal: exec.terminal,
            terminal_name: exec.terminal_name.clone(),
            kind: request.kind,
            tier: request.tier,
            shown_at: now,
        });
        Some(command)
    }

    /// Clear the slot if `token` is the alert on screen.
    ///
    /// Later calls with the same token return `None`, so racing dismissal
    /// paths apply their effects once.
    pub fn dismiss(&mut self, token: AlertToken, now: Millis) -> Option<ActiveAlert> {
        if self.showing.as_ref().map(|alert| alert.token) != Some(token) {
            return None;
        }
        let alert = self.showing.take()?;
        self.last_dismissed_at = Some(now);
        tracing::debug!("Alert {} dismissed", token);
        Some(alert)
    }

    /// Dismiss `token` and decode the user's choice
    pub fn resolve(
        &mut self,
        token: AlertToken,
        choice: Option<&str>,
        now: Millis,
    ) -> Option<Resolution> {
        let alert = self.dismiss(token, now)?;
        let action = choice.and_then(AlertAction::from_label);
        if let (Some(label), None) = (choice, action) {
            tracing::warn!("Unknown alert choice {:?}", label);
        }
        Some(Resolution { alert, action })
    }
}

fn alert_text(exec: &TrackedExecution, kind: AlertKind, now: Millis) -> (String, String) {
    match kind {
        AlertKind::Idle => (
            "Terminal idle".to_string(),
            format!(
                "`{}` in {} has produced no output for {}.",
                exec.label,
                exec.terminal_name,
                format_duration(exec.idle_ms(now))
            ),
        ),
        AlertKind::Total => (
            "Long-running command".to_string(),
            format!(
                "`{}` in {} has been running for {}.",
                exec.label,
                exec.terminal_name,
                format_duration(exec.elapsed_ms(now))
            ),
        ),
    }
}
