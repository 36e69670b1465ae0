// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only projections over the status map.
//!
//! Presentation layers only ever see these derived views; the map itself
//! stays owned by the reducer.

use crate::reducer::StatusBoard;
use gantry_core::status::{NodeState, NodeStatus};
use gantry_core::NodeKey;
use std::collections::HashMap;

/// The published projection: node label to visible status.
pub type NodeStatusMap = HashMap<String, NodeStatus>;

impl StatusBoard {
    /// Status of one node, if it has ever accepted an event this run.
    pub fn status_of(&self, key: &str) -> Option<&NodeStatus> {
        self.nodes.get(key)
    }

    /// Full copy of the visible map, keyed by label string for consumers
    /// that serialize it onward.
    pub fn snapshot(&self) -> NodeStatusMap {
        self.nodes
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.clone()))
            .collect()
    }

    /// Keys of all nodes not yet settled (neither idle nor completed).
    pub fn active_nodes(&self) -> Vec<&NodeKey> {
        let mut keys: Vec<&NodeKey> = self
            .nodes
            .iter()
            .filter(|(_, v)| v.state.is_active())
            .map(|(k, _)| k)
            .collect();
        keys.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        keys
    }

    /// The running or thinking node whose latest event is most recent.
    pub fn most_recently_active(&self) -> Option<&NodeKey> {
        self.nodes
            .iter()
            .filter(|(_, v)| matches!(v.state, NodeState::Running | NodeState::Thinking))
            .max_by_key(|(_, v)| v.last_event_at_ms)
            .map(|(k, _)| k)
    }
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;
