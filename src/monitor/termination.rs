//! Termination protocol: interrupt first, destroy when interrupts keep failing

use crate::config::MonitorSettings;
use crate::domain::{HostCommand, TerminalId, TrackedExecution};

/// Bytes written to the terminal for a graceful interrupt (Ctrl+C)
pub const INTERRUPT_SEQUENCE: &str = "\u{3}";

/// How termination escalates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationPolicy {
    /// Try Ctrl+C before destroying the terminal
    pub use_graceful_signal: bool,
    /// Interrupts allowed before the terminal is destroyed
    pub max_graceful_retries: u32,
}

impl TerminationPolicy {
    pub fn from_settings(settings: &MonitorSettings) -> Self {
        Self {
            use_graceful_signal: settings.use_sig_int,
            max_graceful_retries: settings.hard_terminate_retries,
        }
    }
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        Self {
            use_graceful_signal: true,
            max_graceful_retries: 3,
        }
    }
}

/// Outcome of one termination attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationStep {
    /// Ctrl+C was sent; the process is expected to exit on its own
    Interrupt { attempt: u32 },
    /// The terminal is destroyed; nothing further will be tried
    Destroy,
}

impl TerminationStep {
    pub fn is_final(&self) -> bool {
        matches!(self, TerminationStep::Destroy)
    }

    /// Host command carrying out this step
    pub fn command(&self, terminal: TerminalId) -> HostCommand {
        match self {
            TerminationStep::Interrupt { .. } => HostCommand::SendSignal {
                terminal,
                data: INTERRUPT_SEQUENCE.to_string(),
            },
            TerminationStep::Destroy => HostCommand::DestroyTerminal { terminal },
        }
    }
}

/// Advance the protocol for `exec` by one invocation.
///
/// Attempts only ever go up: the record is dropped once the host reports the
/// execution ended.
pub fn terminate(exec: &mut TrackedExecution, policy: &TerminationPolicy) -> TerminationStep {
    let step = if !policy.use_graceful_signal {
        TerminationStep::Destroy
    } else {
        exec.termination_attempts = exec.termination_attempts.saturating_add(1);
        if exec.termination_attempts > policy.max_graceful_retries {
            TerminationStep::Destroy
        } else {
            TerminationStep::Interrupt {
                attempt: exec.termination_attempts,
            }
        }
    };

    if step.is_final() {
        exec.destroy_requested = true;
    }
    tracing::info!(
        execution = exec.id,
        terminal = exec.terminal,
        "Terminating {:?}: {:?}",
        exec.label,
        step
    );
    step
}
