// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-node execution status as consumed by presentation layers.
//!
//! One `NodeStatus` exists per accepted node key. The record holds only the
//! visible projection of a node; the reducer's streaming accumulators and
//! buffering metadata live privately alongside the reducer and never appear
//! here. Serializes in camelCase because the canonical consumer is a
//! TypeScript canvas.

use crate::time_fmt::format_duration_ms;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution state of one pipeline node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    #[default]
    Idle,
    Running,
    Thinking,
    Completed,
    Error,
}

impl NodeState {
    /// Whether the node should appear in the active set (not settled).
    pub fn is_active(&self) -> bool {
        !matches!(self, NodeState::Idle | NodeState::Completed)
    }

    /// Whether the node reached a settled end state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeState::Completed | NodeState::Error)
    }

    /// Lenient parse for status-ping overrides; unknown values are `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "idle" => Some(NodeState::Idle),
            "running" => Some(NodeState::Running),
            "thinking" => Some(NodeState::Thinking),
            "completed" | "complete" | "done" => Some(NodeState::Completed),
            "error" | "failed" => Some(NodeState::Error),
            _ => None,
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Idle => write!(f, "idle"),
            NodeState::Running => write!(f, "running"),
            NodeState::Thinking => write!(f, "thinking"),
            NodeState::Completed => write!(f, "completed"),
            NodeState::Error => write!(f, "error"),
        }
    }
}

/// Monotonically accumulated token usage for one node.
///
/// Counters only grow for the lifetime of one workflow run; overlapping
/// sub-scopes of the same node sum into the same record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCost {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    /// Display string recomputed from the accumulated total, e.g. `"$0.0375"`
    pub cost: String,
}

impl TokenCost {
    /// Accumulate one report's counters onto the running totals.
    pub fn add(&mut self, prompt: u64, completion: u64, total: u64) {
        self.prompt_tokens += prompt;
        self.completion_tokens += completion;
        self.total_tokens += total;
    }
}

/// Live status of one pipeline node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub state: NodeState,
    /// Current reasoning/content text, capped to the configured length
    pub thinking: String,
    /// Word-boundary-safe truncation of `thinking` for compact display
    pub thinking_preview: String,
    /// Sticky: set on the first scope start, kept across nested/retried scopes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Display name of the currently executing tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_tool: Option<String>,
    /// Transient "tool just finished" flag; auto-expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_completed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_completed_at_ms: Option<u64>,
    pub token_cost: TokenCost,
    /// Last terminal error message (never set for cancellations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Epoch ms at which the node's latest event was applied
    pub last_event_at_ms: u64,
}

impl NodeStatus {
    /// Blank idle record, used for lazy creation and terminal resets.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Record the start of a scope; the first start wins and later ones
    /// must not restart the clock.
    pub fn mark_started(&mut self, now_ms: u64) {
        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(now_ms);
        }
    }

    /// Close out timing bookkeeping at `now_ms`.
    pub fn mark_ended(&mut self, now_ms: u64) {
        self.ended_at_ms = Some(now_ms);
        self.duration_ms = self
            .started_at_ms
            .map(|start| now_ms.saturating_sub(start));
    }

    /// Short badge text for the node's run duration, once known.
    pub fn duration_display(&self) -> Option<String> {
        self.duration_ms.map(format_duration_ms)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
