//! termwatch - terminal idle monitor
//!
//! termwatch watches the commands running in a host's terminals and nags
//! when one stalls (no output for too long) or runs away (running for too
//! long). Alerts escalate from a quiet notification to a blocking modal with
//! a flashing accent, and a stuck command can be interrupted or killed.
//!
//! ## Pieces
//!
//! - [`monitor`]: the decision engine, driven by [`monitor::Monitor::tick`]
//! - [`domain`]: tracking records and the host message types
//! - [`config`]: settings with global/workspace scopes and TOML persistence
//! - [`host`]: the host collaborator trait and a JSON-lines stdio bridge

pub mod config;
pub mod domain;
pub mod host;
pub mod monitor;

pub use domain::*;
