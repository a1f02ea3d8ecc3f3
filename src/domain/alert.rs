use serde::{Deserialize, Serialize};

/// Which threshold an alert is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// No output for longer than the idle timeout
    Idle,
    /// Running for longer than the total timeout
    Total,
}

/// How loudly an alert is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTier {
    /// Dismissible, non-blocking notification
    Quiet,
    /// Blocking modal with action buttons and a flashing accent
    Obnoxious,
}

/// An alert the evaluator wants raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertRequest {
    pub kind: AlertKind,
    pub tier: AlertTier,
}

impl AlertRequest {
    pub fn quiet(kind: AlertKind) -> Self {
        Self {
            kind,
            tier: AlertTier::Quiet,
        }
    }

    pub fn obnoxious(kind: AlertKind) -> Self {
        Self {
            kind,
            tier: AlertTier::Obnoxious,
        }
    }

    pub fn is_obnoxious(&self) -> bool {
        self.tier == AlertTier::Obnoxious
    }
}

/// A user action on an alert or on the quick menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertAction {
    /// Restart the idle clock
    ResetTimer,
    /// Suspend evaluation for the given number of minutes
    Snooze(u64),
    /// Run the termination protocol once
    Terminate,
    /// Add the terminal's name to the exclusion patterns
    ExcludeTerminal,
}

/// Snooze lengths offered to the user, in minutes
pub const SNOOZE_CHOICES: [u64; 3] = [5, 10, 15];

impl AlertAction {
    /// Button / menu label
    pub fn label(&self) -> String {
        match self {
            AlertAction::ResetTimer => "Reset Timer".to_string(),
            AlertAction::Snooze(minutes) => format!("Snooze {}m", minutes),
            AlertAction::Terminate => "Terminate".to_string(),
            AlertAction::ExcludeTerminal => "Exclude Terminal".to_string(),
        }
    }

    /// Parse a button / menu label back into an action
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Reset Timer" => Some(AlertAction::ResetTimer),
            "Terminate" => Some(AlertAction::Terminate),
            "Exclude Terminal" => Some(AlertAction::ExcludeTerminal),
            other => other
                .strip_prefix("Snooze ")
                .and_then(|rest| rest.strip_suffix('m'))
                .and_then(|minutes| minutes.parse::<u64>().ok())
                .filter(|minutes| *minutes > 0)
                .map(AlertAction::Snooze),
        }
    }

    /// Buttons offered on an obnoxious alert of the given kind
    pub fn buttons_for(kind: AlertKind) -> Vec<AlertAction> {
        let mut buttons = Vec::with_capacity(6);
        if kind == AlertKind::Idle {
            buttons.push(AlertAction::ResetTimer);
        }
        buttons.extend(SNOOZE_CHOICES.iter().map(|m| AlertAction::Snooze(*m)));
        buttons.push(AlertAction::Terminate);
        buttons.push(AlertAction::ExcludeTerminal);
        buttons
    }
}

impl std::fmt::Display for AlertAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
