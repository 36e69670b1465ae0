// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the behavioral tests.

use gantry_core::event::ExecEvent;
use serde_json::json;

pub fn event(value: serde_json::Value) -> ExecEvent {
    serde_json::from_value(value).unwrap()
}

pub fn scope_start(label: &str) -> ExecEvent {
    event(json!({"type": "scope:start", "agent_label": label}))
}

pub fn scope_end(label: &str) -> ExecEvent {
    event(json!({"type": "scope:end", "agent_label": label}))
}

/// One healthy single-node run: scope, tool round trip, usage, scope end.
pub fn example_log() -> Vec<ExecEvent> {
    vec![
        scope_start("nodeA"),
        event(json!({
            "type": "tool:start",
            "agent_label": "nodeA",
            "tool_name": "web_search",
            "query": "x",
        })),
        event(json!({"type": "tool:end", "agent_label": "nodeA", "tool_name": "web_search"})),
        event(json!({
            "type": "cost:report",
            "agent_label": "nodeA",
            "model": "gpt-4o",
            "prompt_tokens": 100,
            "completion_tokens": 50,
            "total_tokens": 150,
        })),
        scope_end("nodeA"),
    ]
}
