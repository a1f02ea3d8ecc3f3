//! User actions: alert buttons, quick menu entries and palette commands

use serde_json::Value;

use super::coordinator::ActiveAlert;
use super::menu::{menu_entries, MenuEntry};
use super::{ExclusionFilter, Monitor};
use crate::config::{keys, ConfigScope};
use crate::domain::{
    AlertAction, ExecutionId, HostCommand, Millis, MonitorCommand, TerminalId, TrackedExecution,
};
use crate::host::Host;

/// What an action applies to, remembered apart from the tracking record so
/// it still makes sense after the execution has ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTarget {
    pub execution: ExecutionId,
    pub terminal: TerminalId,
    pub terminal_name: String,
}

impl From<&ActiveAlert> for ActionTarget {
    fn from(alert: &ActiveAlert) -> Self {
        Self {
            execution: alert.execution,
            terminal: alert.terminal,
            terminal_name: alert.terminal_name.clone(),
        }
    }
}

impl From<&TrackedExecution> for ActionTarget {
    fn from(exec: &TrackedExecution) -> Self {
        Self {
            execution: exec.id,
            terminal: exec.terminal,
            terminal_name: exec.terminal_name.clone(),
        }
    }
}

impl<H: Host> Monitor<H> {
    /// Route a user action back into tracking state.
    ///
    /// Reset, snooze and terminate quietly do nothing when the execution has
    /// already ended.
    pub fn apply_action(&mut self, target: ActionTarget, action: AlertAction, now: Millis) {
        tracing::debug!("Applying {} to execution {}", action, target.execution);
        match action {
            AlertAction::ResetTimer => {
                if let Some(token) = self.registry.on_activity(target.execution, now) {
                    self.dismiss_quiet(token, now);
                }
            }
            AlertAction::Snooze(minutes) => {
                let escalate = self.settings.obnoxious_snooze;
                let pending = self.registry.get_mut(target.execution).and_then(|exec| {
                    exec.snooze(minutes, now, escalate);
                    exec.pending_dismissal.take()
                });
                if let Some(token) = pending {
                    self.dismiss_quiet(token, now);
                }
            }
            AlertAction::Terminate => {
                if self.registry.contains(target.execution) {
                    self.terminate_execution(target.execution);
                }
            }
            AlertAction::ExcludeTerminal => self.exclude_terminal(&target, now),
        }
    }

    /// Apply `action` to the focused terminal's command (side channel).
    ///
    /// Returns `false` when the focused terminal has no tracked command.
    pub fn act_on_focused(&mut self, action: AlertAction, now: Millis) -> bool {
        let Some(target) = self.focused_target() else {
            tracing::debug!("No tracked command in the focused terminal for {}", action);
            return false;
        };
        let pending = self
            .registry
            .get(target.execution)
            .and_then(|exec| exec.pending_dismissal);
        if let Some(token) = pending {
            self.dismiss_quiet(token, now);
        }
        self.apply_action(target, action, now);
        true
    }

    fn focused_target(&self) -> Option<ActionTarget> {
        let terminal = self.focused?;
        self.registry.for_terminal(terminal).map(ActionTarget::from)
    }

    /// Add the terminal's name to the exclusion list and stop tracking it
    fn exclude_terminal(&mut self, target: &ActionTarget, now: Millis) {
        // A comma would split the name into two patterns
        let pattern = target.terminal_name.trim().replace(',', "*");
        if !pattern.is_empty() {
            let mut patterns: Vec<String> = self
                .settings
                .patterns()
                .into_iter()
                .map(str::to_string)
                .collect();
            if !patterns.iter().any(|p| p.eq_ignore_ascii_case(&pattern)) {
                patterns.push(pattern.clone());
            }
            if !self.settings.enable_exclusions {
                self.write_setting(
                    keys::ENABLE_EXCLUSIONS,
                    Value::Bool(true),
                    ConfigScope::Workspace,
                    now,
                );
            }
            self.write_setting(
                keys::EXCLUDE_PATTERNS,
                Value::String(patterns.join(", ")),
                ConfigScope::Workspace,
                now,
            );
            tracing::info!("Excluded terminal {:?}", pattern);
        }

        if let Some(exec) = self.registry.on_execution_ended(target.execution) {
            self.forget(exec, now);
        }
    }

    /// Update one setting, persist it through the host and re-apply
    pub fn write_setting(&mut self, key: &str, value: Value, scope: ConfigScope, now: Millis) {
        let written = self.config.update(key, value.clone(), scope);
        self.dispatch(HostCommand::WriteSetting {
            key: key.to_string(),
            value,
            scope: written,
        });
        self.apply_settings(now);
    }

    /// Re-read settings after a change; invalid settings keep the previous ones
    pub fn apply_settings(&mut self, now: Millis) {
        match self.config.settings() {
            Ok(settings) => self.settings = settings,
            Err(e) => {
                tracing::warn!("Keeping previous settings: {}", e);
                return;
            }
        }

        self.exclusions = ExclusionFilter::from_settings(&self.settings);
        for exec in self.registry.remove_excluded(&self.exclusions) {
            tracing::debug!("Execution {} excluded by pattern", exec.id);
            self.forget(exec, now);
        }

        if !self.settings.enabled {
            let quiet = self
                .coordinator
                .active()
                .filter(|alert| !alert.is_obnoxious())
                .map(|alert| alert.token);
            if let Some(token) = quiet {
                self.dismiss_quiet(token, now);
            }
            if let Some(command) = self.presenter.stop_flash() {
                self.dispatch(command);
            }
        }
    }

    /// Turn monitoring on or off in whichever scope currently decides it
    pub fn set_enabled(&mut self, enabled: bool, now: Millis) {
        let scope = self
            .config
            .effective_scope(keys::ENABLED)
            .unwrap_or(ConfigScope::Global);
        self.write_setting(keys::ENABLED, Value::Bool(enabled), scope, now);
        tracing::info!("Monitoring {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Palette command entry point
    pub fn run_command(&mut self, command: MonitorCommand, now: Millis) {
        match command {
            MonitorCommand::Enable => self.set_enabled(true, now),
            MonitorCommand::Disable => self.set_enabled(false, now),
            MonitorCommand::OpenSettings => self.dispatch(HostCommand::OpenSettings),
            MonitorCommand::ShowMenu => self.show_menu(),
            MonitorCommand::ResetTimer => {
                self.act_on_focused(AlertAction::ResetTimer, now);
            }
            MonitorCommand::Snooze5 => {
                self.act_on_focused(AlertAction::Snooze(5), now);
            }
            MonitorCommand::Snooze10 => {
                self.act_on_focused(AlertAction::Snooze(10), now);
            }
            MonitorCommand::Snooze15 => {
                self.act_on_focused(AlertAction::Snooze(15), now);
            }
            MonitorCommand::Terminate => {
                self.act_on_focused(AlertAction::Terminate, now);
            }
            MonitorCommand::Exclude => {
                self.act_on_focused(AlertAction::ExcludeTerminal, now);
            }
        }
    }

    pub fn show_menu(&mut self) {
        let has_target = self.focused_target().is_some();
        let items = menu_entries(&self.settings, has_target)
            .iter()
            .map(MenuEntry::label)
            .collect();
        self.dispatch(HostCommand::ShowMenu { items });
    }

    pub fn on_menu_selection(&mut self, choice: &str, now: Millis) {
        match MenuEntry::from_label(choice) {
            Some(MenuEntry::Action(action)) => {
                self.act_on_focused(action, now);
            }
            Some(MenuEntry::AutoTerminate(on)) => self.write_setting(
                keys::AUTO_TERMINATE_ENABLED,
                Value::Bool(on),
                ConfigScope::Workspace,
                now,
            ),
            Some(MenuEntry::GracefulSignal(on)) => {
                self.write_setting(keys::USE_SIG_INT, Value::Bool(on), ConfigScope::Global, now)
            }
            Some(MenuEntry::Monitoring(on)) => self.set_enabled(on, now),
            Some(MenuEntry::OpenSettings) => self.dispatch(HostCommand::OpenSettings),
            None => tracing::warn!("Unknown menu choice {:?}", choice),
        }
    }
}
