// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node-key extraction and system-node filtering.
//!
//! The event log interleaves real pipeline steps with infrastructure
//! pseudo-nodes emitted by the graph runtime (control-flow wrappers,
//! start/end sentinels, keep-alive pings). Only real steps may appear in the
//! status map, so classification happens before any state is touched. The
//! deny-list and cancellation markers are declared centrally here so the
//! rules stay auditable in one place.

use crate::event::ExecEvent;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Case-insensitive substrings identifying infrastructure pseudo-nodes.
///
/// Labels matching any of these never create a status entry.
pub const SYSTEM_NODE_MARKERS: &[&str] = &[
    "__start__",
    "__end__",
    "langgraph",
    "runnablesequence",
    "runnablelambda",
    "channelwrite",
    "channel_write",
    "branch:",
    "build_graph",
    "ping",
    "keepalive",
];

/// The distinguished top-level scope bracketing the whole run.
///
/// Its `scope:end` means the run is over; it never creates a node entry.
pub const RUN_SCOPE: &str = "workflow_execution";

/// Case-insensitive substrings marking a terminal error as a cancellation.
pub const CANCELLATION_MARKERS: &[&str] = &["cancel"];

/// Identifier for one pipeline step, derived from event payload labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKey(pub String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for NodeKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for NodeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Whether a label names the run-bracketing top-level scope.
pub fn is_run_scope(label: &str) -> bool {
    label.eq_ignore_ascii_case(RUN_SCOPE)
}

/// Whether a terminal-error message indicates the run was cancelled.
pub fn is_cancellation(message: &str) -> bool {
    let lower = message.to_lowercase();
    CANCELLATION_MARKERS.iter().any(|m| lower.contains(m))
}

/// Anonymous placeholders like `node-42` carry no user-facing identity.
fn is_numeric_placeholder(label: &str) -> bool {
    label
        .strip_prefix("node-")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Whether a label belongs to an infrastructure pseudo-node.
pub fn is_system_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    is_run_scope(label)
        || is_numeric_placeholder(&lower)
        || SYSTEM_NODE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Extract the node key for an event, or `None` when the event should be
/// ignored (no label, or an infrastructure pseudo-node).
///
/// Pure function of the event payload; no side effects.
pub fn node_key_of(event: &ExecEvent) -> Option<NodeKey> {
    let label = event.node_label()?;
    if is_system_label(label) {
        return None;
    }
    Some(NodeKey::new(label))
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
