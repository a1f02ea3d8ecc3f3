//! Threshold evaluation.
//!
//! Pure decision logic run once per tick for each tracked execution. The
//! evaluator never mutates state: latches are set by [`latch`] only when the
//! alert is actually presented, so a deferred decision simply fires again on
//! a later tick.

use crate::config::MonitorSettings;
use crate::domain::{AlertKind, AlertRequest, Millis, TrackedExecution};

/// Inputs for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    pub now: Millis,
    pub idle_timeout_ms: Option<Millis>,
    pub total_timeout_ms: Option<Millis>,
    /// Separate escalation timer; `None` means no escalation by time
    pub obnoxious_timeout_ms: Option<Millis>,
    pub obnoxious_mode: bool,
    pub auto_terminate_ms: Option<Millis>,
    /// No alert is showing and the post-dismissal cooldown has passed
    pub gate_open: bool,
}

impl EvalContext {
    pub fn from_settings(settings: &MonitorSettings, now: Millis, gate_open: bool) -> Self {
        Self {
            now,
            idle_timeout_ms: settings.idle_timeout_ms(),
            total_timeout_ms: settings.total_timeout_ms(),
            obnoxious_timeout_ms: settings.obnoxious_timeout_ms(),
            obnoxious_mode: settings.obnoxious_mode,
            auto_terminate_ms: settings.auto_terminate_ms(),
            gate_open,
        }
    }
}

/// What to do with an execution this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to do (or deferred to a later tick)
    None,
    /// Idle long enough to be killed; bypasses alert gating
    AutoTerminate,
    Alert(AlertRequest),
}

/// Decide what happens to `exec` at `ctx.now`.
///
/// Order: exemptions, auto-terminate (never gated), then idle and total
/// alerts, both held back while another alert is showing or cooling down.
pub fn evaluate(exec: &TrackedExecution, ctx: &EvalContext) -> Decision {
    if exec.destroy_requested || exec.is_snoozed(ctx.now) {
        return Decision::None;
    }

    let idle = exec.idle_ms(ctx.now);
    if ctx.auto_terminate_ms.is_some_and(|limit| idle >= limit) {
        return Decision::AutoTerminate;
    }

    if !ctx.gate_open {
        return Decision::None;
    }

    idle_decision(exec, ctx)
        .or_else(|| total_decision(exec, ctx))
        .map_or(Decision::None, Decision::Alert)
}

/// Idle alert rules, first match wins
pub fn idle_decision(exec: &TrackedExecution, ctx: &EvalContext) -> Option<AlertRequest> {
    if exec.obnoxious_alerted {
        return None;
    }

    let idle = exec.idle_ms(ctx.now);
    let past_idle = ctx.idle_timeout_ms.is_some_and(|limit| idle >= limit);

    if ctx.obnoxious_timeout_ms.is_some_and(|limit| idle >= limit) {
        return Some(AlertRequest::obnoxious(AlertKind::Idle));
    }
    if exec.force_next_obnoxious && past_idle {
        return Some(AlertRequest::obnoxious(AlertKind::Idle));
    }
    if ctx.obnoxious_mode && past_idle && !exec.idle_alerted {
        return Some(AlertRequest::obnoxious(AlertKind::Idle));
    }
    if !exec.idle_alerted && past_idle {
        return Some(AlertRequest::quiet(AlertKind::Idle));
    }
    None
}

/// Total-runtime alert, raised once per execution (re-armed by snooze)
pub fn total_decision(exec: &TrackedExecution, ctx: &EvalContext) -> Option<AlertRequest> {
    if exec.total_alerted {
        return None;
    }
    let limit = ctx.total_timeout_ms?;
    if exec.elapsed_ms(ctx.now) < limit {
        return None;
    }
    if ctx.obnoxious_mode || exec.force_next_obnoxious {
        Some(AlertRequest::obnoxious(AlertKind::Total))
    } else {
        Some(AlertRequest::quiet(AlertKind::Total))
    }
}

/// Record that `request` was presented for `exec`
pub fn latch(exec: &mut TrackedExecution, request: AlertRequest) {
    match request.kind {
        AlertKind::Idle => {
            exec.idle_alerted = true;
            if request.is_obnoxious() {
                exec.obnoxious_alerted = true;
                exec.force_next_obnoxious = false;
            }
        }
        AlertKind::Total => {
            exec.total_alerted = true;
            if request.is_obnoxious() {
                exec.force_next_obnoxious = false;
            }
        }
    }
}
