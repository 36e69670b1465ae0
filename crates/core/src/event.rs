// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution event types consumed by the status reducer.
//!
//! Events arrive from the transport as an ordered, append-only sequence of
//! JSON records tagged with `{"type": "kind:name", ...}`. Every payload field
//! is optional so that a partial record degrades to "no change" for that
//! field instead of failing to decode. Unknown type tags deserialize to
//! `Other` carrying the raw value, preserving forward compatibility with
//! transports that grow new event kinds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failed to decode an execution event from its wire form.
#[derive(Debug, Error)]
pub enum EventDecodeError {
    #[error("malformed event record: {0}")]
    Json(#[from] serde_json::Error),
}

/// One record in the execution event log.
///
/// Serializes with `{"type": "scope:start", ...fields}` format. The tags map
/// the transport's callback stream (chain start/end, token stream, tool
/// lifecycle, usage reports) onto a stable namespaced scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExecEvent {
    /// A start/end-bracketed unit of execution began for one node.
    #[serde(rename = "scope:start")]
    ScopeStart {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Short preview of the node's input, when the transport captured one
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input_preview: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// The scope closed. Closing the distinguished run scope ends the run.
    #[serde(rename = "scope:end")]
    ScopeEnd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// Single-shot reasoning text (not streamed).
    #[serde(rename = "reasoning:step")]
    ReasoningStep {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thought: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    #[serde(rename = "tool:start")]
    ToolStart {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_name: Option<String>,
        /// Descriptive context, e.g. a search query
        #[serde(default, skip_serializing_if = "Option::is_none")]
        query: Option<String>,
        /// Descriptive context, e.g. a target file path
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    #[serde(rename = "tool:end")]
    ToolEnd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// An incremental fragment of streamed model output.
    #[serde(rename = "stream:token")]
    TokenDelta {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// Token-usage counters for one model call, to be priced and accumulated.
    #[serde(rename = "cost:report")]
    CostReport {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
        #[serde(default)]
        prompt_tokens: u64,
        #[serde(default)]
        completion_tokens: u64,
        #[serde(default)]
        total_tokens: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// The run (or one node) failed. A cancellation marker in the message
    /// means the whole run was cancelled rather than a node erroring.
    #[serde(rename = "run:error")]
    TerminalError {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// The surrounding workflow finished.
    #[serde(rename = "run:complete")]
    TerminalComplete {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// Explicit last-write-wins override of a node's visible state.
    #[serde(rename = "status:ping")]
    StatusPing {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thinking: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// Catch-all for unknown event types (extensibility).
    ///
    /// The raw record is preserved so callers can log or inspect it.
    #[serde(untagged)]
    Other(serde_json::Value),
}

impl ExecEvent {
    /// Decode one event from its JSON wire form.
    pub fn from_json(raw: &str) -> Result<Self, EventDecodeError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn name(&self) -> &str {
        match self {
            ExecEvent::ScopeStart { .. } => "scope:start",
            ExecEvent::ScopeEnd { .. } => "scope:end",
            ExecEvent::ReasoningStep { .. } => "reasoning:step",
            ExecEvent::ToolStart { .. } => "tool:start",
            ExecEvent::ToolEnd { .. } => "tool:end",
            ExecEvent::TokenDelta { .. } => "stream:token",
            ExecEvent::CostReport { .. } => "cost:report",
            ExecEvent::TerminalError { .. } => "run:error",
            ExecEvent::TerminalComplete { .. } => "run:complete",
            ExecEvent::StatusPing { .. } => "status:ping",
            ExecEvent::Other(_) => "other",
        }
    }

    /// The label identifying the node this event belongs to, if any.
    ///
    /// `agent_label` is the user-facing name matching canvas nodes and is
    /// preferred; `name` is the transport's internal fallback.
    pub fn node_label(&self) -> Option<&str> {
        let (agent_label, name) = match self {
            ExecEvent::ScopeStart {
                agent_label, name, ..
            }
            | ExecEvent::ScopeEnd {
                agent_label, name, ..
            }
            | ExecEvent::ReasoningStep {
                agent_label, name, ..
            }
            | ExecEvent::ToolStart {
                agent_label, name, ..
            }
            | ExecEvent::ToolEnd {
                agent_label, name, ..
            }
            | ExecEvent::TokenDelta {
                agent_label, name, ..
            }
            | ExecEvent::CostReport {
                agent_label, name, ..
            }
            | ExecEvent::TerminalError {
                agent_label, name, ..
            }
            | ExecEvent::TerminalComplete {
                agent_label, name, ..
            }
            | ExecEvent::StatusPing {
                agent_label, name, ..
            } => (agent_label, name),
            ExecEvent::Other(_) => return None,
        };
        agent_label
            .as_deref()
            .or(name.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn log_summary(&self) -> String {
        let t = self.name();
        let label = self.node_label().unwrap_or("-");
        match self {
            ExecEvent::ToolStart { tool_name, .. } | ExecEvent::ToolEnd { tool_name, .. } => {
                format!("{t} node={label} tool={}", tool_name.as_deref().unwrap_or("-"))
            }
            ExecEvent::TokenDelta { content, .. } => {
                format!(
                    "{t} node={label} len={}",
                    content.as_deref().map(str::len).unwrap_or(0)
                )
            }
            ExecEvent::CostReport {
                model,
                total_tokens,
                ..
            } => format!(
                "{t} node={label} model={} total={total_tokens}",
                model.as_deref().unwrap_or("unknown")
            ),
            ExecEvent::TerminalError { error, .. } => {
                format!("{t} node={label} error={}", error.as_deref().unwrap_or("-"))
            }
            ExecEvent::Other(raw) => {
                let tag = raw.get("type").and_then(|v| v.as_str()).unwrap_or("?");
                format!("{t} tag={tag}")
            }
            _ => format!("{t} node={label}"),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
