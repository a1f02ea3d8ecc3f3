//! The monitor loop body.
//!
//! [`Monitor`] owns the registry, the coordinator and the settings. The host
//! bridge feeds it events as they arrive and calls [`Monitor::tick`] once per
//! [`TICK_INTERVAL_MS`]; everything runs to completion on one thread, so no
//! locking is involved.

use super::coordinator::ActiveAlert;
use super::evaluator::{evaluate, Decision, EvalContext};
use super::presenter::{format_duration, status_view};
use super::termination::{terminate, TerminationPolicy};
use super::{ExclusionFilter, ExecutionRegistry, NotificationCoordinator, StatusPresenter};
use crate::config::{MonitorSettings, ScopedConfig};
use crate::domain::{
    AlertRequest, AlertToken, ExecutionId, HostCommand, HostEvent, Millis, TerminalId,
    TrackedExecution,
};
use crate::host::Host;

/// Polling cadence
pub const TICK_INTERVAL_MS: Millis = 1_000;

/// Idle/runtime monitor for every terminal the host reports
pub struct Monitor<H: Host> {
    pub(super) host: H,
    pub(super) config: ScopedConfig,
    pub(super) settings: MonitorSettings,
    pub(super) exclusions: ExclusionFilter,
    pub(super) registry: ExecutionRegistry,
    pub(super) coordinator: NotificationCoordinator,
    pub(super) presenter: StatusPresenter,
    pub(super) focused: Option<TerminalId>,
}

impl<H: Host> Monitor<H> {
    /// Create a monitor; unreadable settings fall back to the defaults
    pub fn new(host: H, config: ScopedConfig) -> Self {
        let settings = config.settings().unwrap_or_else(|e| {
            tracing::warn!("Invalid settings, using defaults: {}", e);
            MonitorSettings::default()
        });
        let exclusions = ExclusionFilter::from_settings(&settings);
        Self {
            host,
            config,
            settings,
            exclusions,
            registry: ExecutionRegistry::new(),
            coordinator: NotificationCoordinator::new(),
            presenter: StatusPresenter::new(),
            focused: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    pub fn config(&self) -> &ScopedConfig {
        &self.config
    }

    pub fn registry(&self) -> &ExecutionRegistry {
        &self.registry
    }

    pub fn coordinator(&self) -> &NotificationCoordinator {
        &self.coordinator
    }

    pub fn focused(&self) -> Option<TerminalId> {
        self.focused
    }

    /// Apply one host event
    pub fn handle_event(&mut self, event: HostEvent, now: Millis) {
        match event {
            HostEvent::ExecutionStarted {
                execution,
                terminal,
                terminal_name,
                command_line,
            } => {
                let replaced = self.registry.on_execution_started(
                    execution,
                    terminal,
                    &terminal_name,
                    &command_line,
                    now,
                    &self.exclusions,
                );
                if let Some(old) = replaced {
                    self.forget(old, now);
                }
            }
            HostEvent::Activity { execution } => {
                if let Some(token) = self.registry.on_activity(execution, now) {
                    self.dismiss_quiet(token, now);
                }
            }
            HostEvent::ExecutionEnded { execution } => {
                if let Some(exec) = self.registry.on_execution_ended(execution) {
                    self.forget(exec, now);
                }
            }
            HostEvent::TerminalFocused { terminal } => {
                self.focused = terminal;
            }
            HostEvent::TerminalRenamed { terminal, name } => {
                self.registry.rename_terminal(terminal, &name);
            }
            HostEvent::TerminalClosed { terminal } => {
                for exec in self.registry.remove_terminal(terminal) {
                    self.forget(exec, now);
                }
                if self.focused == Some(terminal) {
                    self.focused = None;
                }
            }
            HostEvent::ConfigChanged { scope, values } => {
                tracing::debug!("Settings changed in {} scope", scope);
                self.config.replace_layer(scope, values);
                self.apply_settings(now);
            }
            HostEvent::AlertResponse { token, choice } => {
                self.on_alert_response(token, choice.as_deref(), now);
            }
            HostEvent::NotificationClosed { token } => {
                self.dismiss_alert(token, now);
            }
            HostEvent::MenuSelection { choice } => {
                if let Some(choice) = choice {
                    self.on_menu_selection(&choice, now);
                }
            }
            HostEvent::Command { name } => self.run_command(name, now),
        }
    }

    /// One polling step: evaluate every tracked execution, then refresh the
    /// status bar
    pub fn tick(&mut self, now: Millis) {
        if self.settings.enabled {
            if self.coordinator.active().is_some_and(ActiveAlert::is_obnoxious) {
                if let Some(command) = self.presenter.flash_tick(&self.settings.obnoxious_color) {
                    self.dispatch(command);
                }
            }
            // Handles are copied up front; processing one may remove others
            for id in self.registry.ids() {
                self.process_execution(id, now);
            }
        }
        self.refresh_status(now);
    }

    fn process_execution(&mut self, id: ExecutionId, now: Millis) {
        let Some(exec) = self.registry.get(id) else {
            return;
        };

        if self.exclusions.is_excluded(&exec.terminal_name) {
            if let Some(exec) = self.registry.on_execution_ended(id) {
                tracing::debug!("Execution {} excluded by pattern", id);
                self.forget(exec, now);
            }
            return;
        }
        if self.settings.only_monitor_active && self.focused != Some(exec.terminal) {
            return;
        }

        let ctx = EvalContext::from_settings(&self.settings, now, self.coordinator.gate_open(now));
        match evaluate(exec, &ctx) {
            Decision::None => {}
            Decision::AutoTerminate => {
                tracing::info!(
                    "Auto-terminating execution {} after {} idle",
                    id,
                    format_duration(exec.idle_ms(now))
                );
                self.terminate_execution(id);
            }
            Decision::Alert(request) => self.raise_alert(id, request, now),
        }
    }

    fn raise_alert(&mut self, id: ExecutionId, request: AlertRequest, now: Millis) {
        let Some(exec) = self.registry.get_mut(id) else {
            return;
        };
        let Some(command) = self.coordinator.present(exec, request, now) else {
            return;
        };
        self.dispatch(command);
        if request.is_obnoxious() {
            let flash = self.presenter.start_flash(&self.settings.obnoxious_color);
            self.dispatch(flash);
        }
    }

    /// Run the termination protocol once for a tracked execution
    pub(super) fn terminate_execution(&mut self, id: ExecutionId) {
        let policy = TerminationPolicy::from_settings(&self.settings);
        let Some(exec) = self.registry.get_mut(id) else {
            return;
        };
        let step = terminate(exec, &policy);
        let command = step.command(exec.terminal);
        self.dispatch(command);
    }

    fn on_alert_response(&mut self, token: AlertToken, choice: Option<&str>, now: Millis) {
        let Some(resolution) = self.coordinator.resolve(token, choice, now) else {
            tracing::debug!("Response for alert {} that is no longer showing", token);
            return;
        };
        self.after_dismiss(&resolution.alert);
        if let Some(action) = resolution.action {
            self.apply_action((&resolution.alert).into(), action, now);
        }
    }

    /// Cleanup for an execution that just left the registry
    pub(super) fn forget(&mut self, exec: TrackedExecution, now: Millis) {
        if let Some(token) = exec.pending_dismissal {
            self.dismiss_quiet(token, now);
        }
    }

    /// Close a quiet notification on the monitor's initiative
    pub(super) fn dismiss_quiet(&mut self, token: AlertToken, now: Millis) {
        if self.dismiss_alert(token, now).is_some() {
            self.dispatch(HostCommand::CloseNotification { token });
        }
    }

    /// Free the global alert slot held by `token`; a no-op when it is not
    /// the alert on screen
    fn dismiss_alert(&mut self, token: AlertToken, now: Millis) -> Option<ActiveAlert> {
        let alert = self.coordinator.dismiss(token, now)?;
        self.after_dismiss(&alert);
        Some(alert)
    }

    fn after_dismiss(&mut self, alert: &ActiveAlert) {
        if let Some(exec) = self.registry.get_mut(alert.execution) {
            if exec.pending_dismissal == Some(alert.token) {
                exec.pending_dismissal = None;
            }
        }
        if alert.is_obnoxious() {
            if let Some(command) = self.presenter.stop_flash() {
                self.dispatch(command);
            }
        }
    }

    fn refresh_status(&mut self, now: Millis) {
        let view = status_view(
            self.settings.enabled,
            &self.registry.all(),
            self.focused,
            now,
        );
        if let Some(command) = self.presenter.update(view) {
            self.dispatch(command);
        }
    }

    /// Hand a command to the host; failures are logged and dropped
    pub(super) fn dispatch(&mut self, command: HostCommand) {
        let kind = command.kind();
        if let Err(e) = self.host.dispatch(command) {
            tracing::warn!("Host command {} failed: {}", kind, e);
        }
    }
}
