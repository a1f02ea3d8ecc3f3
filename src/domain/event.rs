//! Messages exchanged with the host that owns the terminals.
//!
//! The host pushes [`HostEvent`]s in and receives [`HostCommand`]s back. Both
//! travel as JSON objects tagged by `"type"`, one per line on the stdio bridge.

use serde::{Deserialize, Serialize};

use super::{AlertToken, ExecutionId, TerminalId};
use crate::config::ConfigScope;

/// Something that happened on the host side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A command started running in a terminal
    ExecutionStarted {
        execution: ExecutionId,
        terminal: TerminalId,
        terminal_name: String,
        #[serde(default)]
        command_line: String,
    },
    /// The command produced output
    Activity { execution: ExecutionId },
    /// The command finished, or its output stream closed
    ExecutionEnded { execution: ExecutionId },
    /// The focused terminal changed
    TerminalFocused {
        #[serde(default)]
        terminal: Option<TerminalId>,
    },
    TerminalRenamed { terminal: TerminalId, name: String },
    /// The terminal went away together with everything running in it
    TerminalClosed { terminal: TerminalId },
    /// Settings in one scope were replaced
    ConfigChanged {
        scope: ConfigScope,
        values: serde_json::Map<String, serde_json::Value>,
    },
    /// The user answered a modal alert (or the host dropped it)
    AlertResponse {
        token: AlertToken,
        #[serde(default)]
        choice: Option<String>,
    },
    /// A quiet notification was closed by the user
    NotificationClosed { token: AlertToken },
    /// The user picked an entry from the quick menu
    MenuSelection {
        #[serde(default)]
        choice: Option<String>,
    },
    /// A command palette entry was triggered
    Command { name: MonitorCommand },
}

/// Commands exposed to the host's command palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorCommand {
    Enable,
    Disable,
    OpenSettings,
    ShowMenu,
    ResetTimer,
    Snooze5,
    Snooze10,
    Snooze15,
    Terminate,
    Exclude,
}

/// Something the host should do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCommand {
    /// Write raw bytes to the terminal (e.g. Ctrl+C)
    SendSignal { terminal: TerminalId, data: String },
    /// Kill the terminal outright
    DestroyTerminal { terminal: TerminalId },
    /// Show a dismissible, non-blocking notification
    ShowNotification {
        token: AlertToken,
        title: String,
        message: String,
    },
    /// Close a notification previously shown with `token`
    CloseNotification { token: AlertToken },
    /// Show a blocking modal; answered by [`HostEvent::AlertResponse`]
    ShowModal {
        token: AlertToken,
        title: String,
        message: String,
        buttons: Vec<String>,
    },
    SetStatus {
        text: String,
        tooltip: String,
        visible: bool,
        command: MonitorCommand,
    },
    /// Start (`Some(color)`) or stop (`None`) the flashing UI accent
    SetFlash { color: Option<String> },
    /// Show the quick menu; answered by [`HostEvent::MenuSelection`]
    ShowMenu { items: Vec<String> },
    /// Persist a setting in the given scope
    WriteSetting {
        key: String,
        value: serde_json::Value,
        scope: ConfigScope,
    },
    OpenSettings,
}

impl HostCommand {
    /// Short name for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            HostCommand::SendSignal { .. } => "send_signal",
            HostCommand::DestroyTerminal { .. } => "destroy_terminal",
            HostCommand::ShowNotification { .. } => "show_notification",
            HostCommand::CloseNotification { .. } => "close_notification",
            HostCommand::ShowModal { .. } => "show_modal",
            HostCommand::SetStatus { .. } => "set_status",
            HostCommand::SetFlash { .. } => "set_flash",
            HostCommand::ShowMenu { .. } => "show_menu",
            HostCommand::WriteSetting { .. } => "write_setting",
            HostCommand::OpenSettings => "open_settings",
        }
    }
}
