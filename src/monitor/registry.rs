//! Execution registry: the single owner of per-command tracking state

use std::collections::HashMap;

use super::ExclusionFilter;
use crate::domain::{AlertToken, ExecutionId, Millis, TerminalId, TrackedExecution};

/// Tracks every running, non-excluded terminal command (in-memory only)
#[derive(Debug, Default)]
pub struct ExecutionRegistry {
    executions: HashMap<ExecutionId, TrackedExecution>,
}

impl ExecutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a command unless its terminal is excluded.
    ///
    /// A repeated start for a known handle restarts its tracking. Returns the
    /// record that start displaced, so its pending alert can be cleaned up.
    pub fn on_execution_started(
        &mut self,
        id: ExecutionId,
        terminal: TerminalId,
        terminal_name: &str,
        command_line: &str,
        now: Millis,
        exclusions: &ExclusionFilter,
    ) -> Option<TrackedExecution> {
        if exclusions.is_excluded(terminal_name) {
            tracing::debug!(
                "Not tracking execution {} in excluded terminal {:?}",
                id,
                terminal_name
            );
            return self.executions.remove(&id);
        }
        let exec = TrackedExecution::new(id, terminal, terminal_name, command_line, now);
        tracing::debug!("Tracking execution {} ({})", id, exec.label);
        let replaced = self.executions.insert(id, exec);
        if replaced.is_some() {
            tracing::debug!("Execution {} restarted", id);
        }
        replaced
    }

    /// Output arrived: restart the idle clock.
    ///
    /// Returns the quiet notification for this execution that should close.
    pub fn on_activity(&mut self, id: ExecutionId, now: Millis) -> Option<AlertToken> {
        self.executions.get_mut(&id).and_then(|exec| exec.touch(now))
    }

    /// Forget an execution; unknown handles are ignored
    pub fn on_execution_ended(&mut self, id: ExecutionId) -> Option<TrackedExecution> {
        let removed = self.executions.remove(&id);
        if removed.is_some() {
            tracing::debug!("Execution {} ended", id);
        }
        removed
    }

    /// Forget every execution running in `terminal`
    pub fn remove_terminal(&mut self, terminal: TerminalId) -> Vec<TrackedExecution> {
        self.drain_where(|exec| exec.terminal == terminal)
    }

    /// Forget every execution whose terminal is now excluded
    pub fn remove_excluded(&mut self, exclusions: &ExclusionFilter) -> Vec<TrackedExecution> {
        if exclusions.is_empty() {
            return Vec::new();
        }
        self.drain_where(|exec| exclusions.is_excluded(&exec.terminal_name))
    }

    pub fn rename_terminal(&mut self, terminal: TerminalId, name: &str) {
        for exec in self.executions.values_mut() {
            if exec.terminal == terminal {
                exec.terminal_name = name.to_string();
            }
        }
    }

    pub fn get(&self, id: ExecutionId) -> Option<&TrackedExecution> {
        self.executions.get(&id)
    }

    pub fn get_mut(&mut self, id: ExecutionId) -> Option<&mut TrackedExecution> {
        self.executions.get_mut(&id)
    }

    pub fn contains(&self, id: ExecutionId) -> bool {
        self.executions.contains_key(&id)
    }

    /// Most recently started execution in `terminal`
    pub fn for_terminal(&self, terminal: TerminalId) -> Option<&TrackedExecution> {
        self.executions
            .values()
            .filter(|exec| exec.terminal == terminal)
            .max_by_key(|exec| (exec.started_at, exec.id))
    }

    /// Handles in a stable order, safe to iterate while mutating the registry
    pub fn ids(&self) -> Vec<ExecutionId> {
        let mut ids: Vec<ExecutionId> = self.executions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Copy of every tracked execution, ordered by handle
    pub fn all(&self) -> Vec<TrackedExecution> {
        let mut all: Vec<TrackedExecution> = self.executions.values().cloned().collect();
        all.sort_by_key(|exec| exec.id);
        all
    }

    pub fn len(&self) -> usize {
        self.executions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }

    fn drain_where(&mut self, pred: impl Fn(&TrackedExecution) -> bool) -> Vec<TrackedExecution> {
        let ids: Vec<ExecutionId> = self
            .executions
            .values()
            .filter(|exec| pred(exec))
            .map(|exec| exec.id)
            .collect();
        let mut removed: Vec<TrackedExecution> = ids
            .into_iter()
            .filter_map(|id| self.executions.remove(&id))
            .collect();
        removed.sort_by_key(|exec| exec.id);
        removed
    }
}
