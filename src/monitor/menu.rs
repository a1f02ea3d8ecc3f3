//! Quick menu shown from the status bar or the command palette

use crate::config::MonitorSettings;
use crate::domain::{AlertAction, SNOOZE_CHOICES};

/// One entry of the quick menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    /// Act on the focused terminal's command
    Action(AlertAction),
    /// Switch automatic termination on or off
    AutoTerminate(bool),
    /// `true` terminates with Ctrl+C first, `false` destroys right away
    GracefulSignal(bool),
    /// Switch monitoring on or off
    Monitoring(bool),
    OpenSettings,
}

impl MenuEntry {
    pub fn label(&self) -> String {
        match self {
            MenuEntry::Action(action) => action.label(),
            MenuEntry::AutoTerminate(true) => "Enable Auto-Terminate".to_string(),
            MenuEntry::AutoTerminate(false) => "Disable Auto-Terminate".to_string(),
            MenuEntry::GracefulSignal(true) => "Use Interrupt Signal".to_string(),
            MenuEntry::GracefulSignal(false) => "Use Hard Kill".to_string(),
            MenuEntry::Monitoring(true) => "Enable Monitoring".to_string(),
            MenuEntry::Monitoring(false) => "Disable Monitoring".to_string(),
            MenuEntry::OpenSettings => "Open Settings".to_string(),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        if let Some(action) = AlertAction::from_label(label) {
            return Some(MenuEntry::Action(action));
        }
        [
            MenuEntry::AutoTerminate(true),
            MenuEntry::AutoTerminate(false),
            MenuEntry::GracefulSignal(true),
            MenuEntry::GracefulSignal(false),
            MenuEntry::Monitoring(true),
            MenuEntry::Monitoring(false),
            MenuEntry::OpenSettings,
        ]
        .into_iter()
        .find(|entry| entry.label() == label.trim())
    }
}

/// Entries for the current state; execution actions only when a command
/// in the focused terminal is tracked
pub fn menu_entries(settings: &MonitorSettings, has_target: bool) -> Vec<MenuEntry> {
    let mut entries = Vec::new();
    if has_target {
        entries.push(MenuEntry::Action(AlertAction::ResetTimer));
        entries.extend(
            SNOOZE_CHOICES
                .iter()
                .map(|minutes| MenuEntry::Action(AlertAction::Snooze(*minutes))),
        );
        entries.push(MenuEntry::Action(AlertAction::Terminate));
        entries.push(MenuEntry::Action(AlertAction::ExcludeTerminal));
    }
    entries.push(MenuEntry::AutoTerminate(!settings.auto_terminate_enabled));
    entries.push(MenuEntry::GracefulSignal(!settings.use_sig_int));
    entries.push(MenuEntry::OpenSettings);
    entries.push(MenuEntry::Monitoring(!settings.enabled));
    entries
}
