// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guarded expiry timers for transient UI signals.
//!
//! Short-lived flags (tool-completed badges, terminal reset grace windows)
//! are cleared by deadline timers rather than by closures capturing state.
//! Each entry captures a guard value at schedule time; when the timer fires
//! the reducer compares the guard against current state and no-ops if a
//! newer event superseded it. Keys encode `(signal kind, node)` so setting
//! a timer replaces any live one for the same signal — at most one expiry
//! is ever pending per node and kind.

use gantry_core::NodeKey;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

const TOOL_COMPLETED_PREFIX: &str = "tool-completed:";
const NODE_RESET_PREFIX: &str = "node-reset:";
const SWEEP: &str = "sweep";

/// Identifier for one pending expiry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ExpiryId(String);

impl ExpiryId {
    /// Clears a node's transient tool-completed flag.
    pub(crate) fn tool_completed(key: &NodeKey) -> Self {
        Self(format!("{TOOL_COMPLETED_PREFIX}{key}"))
    }

    /// Resets one errored node back to a blank record.
    pub(crate) fn node_reset(key: &NodeKey) -> Self {
        Self(format!("{NODE_RESET_PREFIX}{key}"))
    }

    /// Sweeps the entire status map after a terminal grace window.
    pub(crate) fn sweep() -> Self {
        Self(SWEEP.to_string())
    }

    pub(crate) fn is_tool_completed(&self) -> bool {
        self.0.starts_with(TOOL_COMPLETED_PREFIX)
    }

    pub(crate) fn is_node_reset(&self) -> bool {
        self.0.starts_with(NODE_RESET_PREFIX)
    }

    pub(crate) fn is_sweep(&self) -> bool {
        self.0 == SWEEP
    }

    /// The node this expiry targets, for node-scoped kinds.
    pub(crate) fn node_key(&self) -> Option<&str> {
        self.0
            .strip_prefix(TOOL_COMPLETED_PREFIX)
            .or_else(|| self.0.strip_prefix(NODE_RESET_PREFIX))
    }
}

impl fmt::Display for ExpiryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Expiry {
    fires_at: Instant,
    guard: u64,
}

/// Deadline map for all pending expiries.
#[derive(Debug, Default)]
pub(crate) struct ExpiryQueue {
    timers: HashMap<ExpiryId, Expiry>,
}

impl ExpiryQueue {
    /// Schedule (or replace) an expiry. The guard is handed back on firing.
    pub(crate) fn set(&mut self, id: ExpiryId, after: Duration, now: Instant, guard: u64) {
        self.timers.insert(
            id,
            Expiry {
                fires_at: now + after,
                guard,
            },
        );
    }

    pub(crate) fn cancel(&mut self, id: &ExpiryId) {
        self.timers.remove(id);
    }

    pub(crate) fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Remove and return all expiries due at `now` with their guards.
    pub(crate) fn fired(&mut self, now: Instant) -> Vec<(ExpiryId, u64)> {
        let due: Vec<ExpiryId> = self
            .timers
            .iter()
            .filter(|(_, t)| t.fires_at <= now)
            .map(|(id, _)| id.clone())
            .collect();

        due.into_iter()
            .filter_map(|id| self.timers.remove(&id).map(|t| (id, t.guard)))
            .collect()
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.fires_at).min()
    }

    #[cfg(test)]
    pub(crate) fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }
}

#[cfg(test)]
#[path = "expiry_tests.rs"]
mod tests;
