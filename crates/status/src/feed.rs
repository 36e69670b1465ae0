// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared handle around the status board.
//!
//! The board itself is single-threaded by design: every event is folded to
//! completion before the next one is looked at. `StatusFeed` wraps it in a
//! mutex so the transport task and presentation readers can share one board
//! without either seeing a half-applied update.

use crate::reducer::StatusBoard;
use crate::views::NodeStatusMap;
use gantry_core::clock::{Clock, SystemClock};
use gantry_core::event::ExecEvent;
use gantry_core::status::NodeStatus;
use gantry_core::ReducerConfig;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

/// Cloneable handle to one status board and its clock.
#[derive(Clone)]
pub struct StatusFeed {
    board: Arc<Mutex<StatusBoard>>,
    clock: Arc<dyn Clock>,
}

impl StatusFeed {
    /// Feed over the real system clock.
    pub fn new(cfg: ReducerConfig) -> Self {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    /// Feed over an explicit clock, for deterministic tests.
    pub fn with_clock(cfg: ReducerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            board: Arc::new(Mutex::new(StatusBoard::new(cfg))),
            clock,
        }
    }

    /// Apply one live event. Returns `true` when it cancelled the run.
    pub fn apply(&self, event: &ExecEvent) -> bool {
        self.board.lock().apply(event, self.clock.as_ref())
    }

    /// Fold all log entries beyond the cursor.
    pub fn ingest(&self, log: &[ExecEvent]) {
        self.board.lock().ingest(log, self.clock.as_ref());
    }

    /// Fire any due expiry timers.
    pub fn tick(&self) {
        self.board.lock().tick(self.clock.as_ref());
    }

    /// Earliest pending expiry deadline, if any timer is live.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.board.lock().next_deadline()
    }

    /// Discard all state for a fresh run.
    pub fn reset(&self) {
        self.board.lock().reset();
    }

    pub fn status_of(&self, key: &str) -> Option<NodeStatus> {
        self.board.lock().status_of(key).cloned()
    }

    pub fn snapshot(&self) -> NodeStatusMap {
        self.board.lock().snapshot()
    }

    /// Label of the node most recently seen running or thinking.
    pub fn current_node(&self) -> Option<String> {
        self.board
            .lock()
            .most_recently_active()
            .map(|k| k.as_str().to_string())
    }

    /// Labels of all unsettled nodes, sorted.
    pub fn active_nodes(&self) -> Vec<String> {
        self.board
            .lock()
            .active_nodes()
            .into_iter()
            .map(|k| k.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
