//! Idle/runtime monitoring of terminal commands.
//!
//! Per tick, for each tracked execution:
//!
//! 1. [`ExclusionFilter`] drops executions in excluded terminals
//! 2. [`evaluate`] decides between nothing, auto-termination and an alert
//! 3. [`NotificationCoordinator`] shows at most one alert process-wide
//! 4. [`terminate`] escalates from Ctrl+C to destroying the terminal
//!
//! [`Monitor`] wires these together and talks to the [`Host`](crate::host::Host).

mod actions;
mod coordinator;
mod evaluator;
mod exclusion;
mod menu;
mod poller;
mod presenter;
mod registry;
mod termination;

pub use actions::ActionTarget;
pub use coordinator::{ActiveAlert, NotificationCoordinator, Resolution, DISMISS_COOLDOWN_MS};
pub use evaluator::{evaluate, idle_decision, latch, total_decision, Decision, EvalContext};
pub use exclusion::{compile_pattern, is_excluded, ExclusionFilter};
pub use menu::{menu_entries, MenuEntry};
pub use poller::{Monitor, TICK_INTERVAL_MS};
pub use presenter::{format_duration, status_view, StatusPresenter, StatusView};
pub use registry::ExecutionRegistry;
pub use termination::{terminate, TerminationPolicy, TerminationStep, INTERRUPT_SEQUENCE};
