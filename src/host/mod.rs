//! The host environment that owns terminals, widgets and settings storage.
//!
//! The monitor never talks to terminals directly; it hands [`HostCommand`]s
//! to a [`Host`] and learns about the outside world from [`HostEvent`]s.
//!
//! [`HostEvent`]: crate::domain::HostEvent

mod stdio;

pub use stdio::{parse_event, EventReader, StdioHost};

use crate::domain::HostCommand;

/// Errors delivering a command to the host
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Host I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode host command: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Host is gone")]
    Closed,
}

/// Receiver of monitor commands.
///
/// Dispatch is fire-and-forget: a failure means the command had no effect
/// (for example the terminal was already closed) and the monitor moves on.
pub trait Host {
    fn dispatch(&mut self, command: HostCommand) -> Result<(), HostError>;
}

/// Collects commands in memory (tests, batching)
impl Host for Vec<HostCommand> {
    fn dispatch(&mut self, command: HostCommand) -> Result<(), HostError> {
        self.push(command);
        Ok(())
    }
}

impl<H: Host + ?Sized> Host for &mut H {
    fn dispatch(&mut self, command: HostCommand) -> Result<(), HostError> {
        (**self).dispatch(command)
    }
}
