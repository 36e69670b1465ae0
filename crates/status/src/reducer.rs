// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The central fold from execution events to per-node status.
//!
//! `StatusBoard` owns the status map, the per-node stream buffers, the
//! expiry queue, and the log cursor. Events are applied strictly in arrival
//! order; `ingest` folds only the slice of the log beyond the cursor, so a
//! steadily growing, never-truncated log is re-presented cheaply without
//! rescanning already-applied events.
//!
//! Every branch is total: a partial payload degrades to "no change" for the
//! missing field and processing of later events is never interrupted.

use crate::expiry::{ExpiryId, ExpiryQueue};
use crate::stream::StreamState;
use crate::tools;
use gantry_core::classify::{is_cancellation, is_run_scope, node_key_of};
use gantry_core::clock::Clock;
use gantry_core::event::ExecEvent;
use gantry_core::pricing::cost_string;
use gantry_core::status::{NodeState, NodeStatus};
use gantry_core::text::{cap, recent_window, sanitize, truncate};
use gantry_core::{NodeKey, ReducerConfig};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Folds the execution event log into a per-node status map.
#[derive(Debug)]
pub struct StatusBoard {
    pub(crate) cfg: ReducerConfig,
    pub(crate) nodes: HashMap<NodeKey, NodeStatus>,
    streams: HashMap<NodeKey, StreamState>,
    expiry: ExpiryQueue,
    /// Index of the first log entry not yet folded.
    cursor: usize,
    /// Bumped on every run boundary; stale sweep timers check it.
    generation: u64,
}

impl StatusBoard {
    pub fn new(cfg: ReducerConfig) -> Self {
        Self {
            cfg,
            nodes: HashMap::new(),
            streams: HashMap::new(),
            expiry: ExpiryQueue::default(),
            cursor: 0,
            generation: 0,
        }
    }

    /// Fold all log entries beyond the cursor, in order.
    ///
    /// A cancellation event stops the batch: the remaining backlog belongs
    /// to the cancelled run and must not repopulate the map it just wiped.
    pub fn ingest(&mut self, log: &[ExecEvent], clock: &dyn Clock) {
        while self.cursor < log.len() {
            let event = &log[self.cursor];
            self.cursor += 1;
            if self.apply(event, clock) {
                return;
            }
        }
    }

    /// Apply one event. Returns `true` when the event cancelled the run.
    pub fn apply(&mut self, event: &ExecEvent, clock: &dyn Clock) -> bool {
        trace!(event = %event.log_summary(), "apply");
        let now = clock.now();
        let now_ms = clock.epoch_ms();

        // Run-level transitions come first: they may not carry a node label
        // at all, or carry the run scope's, which never keys an entry.
        match event {
            ExecEvent::TerminalError {
                error: Some(message),
                ..
            } if is_cancellation(message) => {
                debug!(%message, "run cancelled, clearing all node state");
                self.cancel_run();
                return true;
            }
            ExecEvent::TerminalComplete { .. } => {
                if let Some(key) = node_key_of(event) {
                    self.reset_node(&key);
                }
                self.schedule_sweep(now);
                return false;
            }
            ExecEvent::ScopeEnd { .. }
                if event.node_label().is_some_and(is_run_scope) =>
            {
                debug!("run scope closed, scheduling reset sweep");
                self.schedule_sweep(now);
                return false;
            }
            ExecEvent::ScopeStart { .. }
                if event.node_label().is_some_and(is_run_scope) =>
            {
                debug!("run scope opened, superseding pending reset sweep");
                self.expiry.cancel(&ExpiryId::sweep());
                return false;
            }
            _ => {}
        }

        let Some(key) = node_key_of(event) else {
            return false;
        };

        match event {
            ExecEvent::ScopeStart { input_preview, .. } => {
                if let Some(preview) = input_preview.as_deref() {
                    trace!(node = %key, input = preview, "scope start");
                }
                // A repeated scope start must not reset accumulated cost or
                // restart the clock; only the reasoning text starts over.
                // A node starting also means execution resumed, so any sweep
                // left over from the previous run's end must not fire.
                self.expiry.cancel(&ExpiryId::sweep());
                self.expiry.cancel(&ExpiryId::node_reset(&key));
                if let Some(stream) = self.streams.get_mut(&key) {
                    stream.clear_text();
                }
                let entry = self.nodes.entry(key).or_insert_with(NodeStatus::blank);
                entry.state = NodeState::Running;
                entry.thinking.clear();
                entry.thinking_preview.clear();
                entry.error = None;
                entry.mark_started(now_ms);
                entry.last_event_at_ms = now_ms;
            }

            ExecEvent::ReasoningStep { thought, .. } => {
                let clean = thought.as_deref().map(sanitize).unwrap_or_default();
                if clean.is_empty() {
                    return false;
                }
                let entry = self.nodes.entry(key).or_insert_with(NodeStatus::blank);
                entry.state = NodeState::Thinking;
                entry.thinking = cap(&clean, self.cfg.max_thinking_len);
                entry.thinking_preview = truncate(&entry.thinking, self.cfg.preview_len);
                entry.last_event_at_ms = now_ms;
            }

            ExecEvent::ToolStart {
                tool_name,
                query,
                path,
                ..
            } => {
                self.expiry.cancel(&ExpiryId::tool_completed(&key));
                let entry = self.nodes.entry(key).or_insert_with(NodeStatus::blank);
                entry.state = NodeState::Running;
                entry.active_tool = tool_name.as_deref().map(tools::display_name);
                entry.tool_completed = None;
                entry.tool_completed_at_ms = None;
                entry.mark_started(now_ms);
                if let Some(context) = query.as_deref().or(path.as_deref()) {
                    let clean = sanitize(context);
                    if !clean.is_empty() {
                        entry.thinking = cap(&clean, self.cfg.max_thinking_len);
                        entry.thinking_preview =
                            truncate(&entry.thinking, self.cfg.preview_len);
                    }
                }
                entry.last_event_at_ms = now_ms;
            }

            ExecEvent::ToolEnd { tool_name, .. } => {
                let entry = self.nodes.entry(key.clone()).or_insert_with(NodeStatus::blank);
                entry.state = NodeState::Running;
                entry.active_tool = None;
                entry.tool_completed = tool_name.as_deref().map(tools::completed_label);
                entry.tool_completed_at_ms = Some(now_ms);
                entry.last_event_at_ms = now_ms;
                // The guard is the flag's own timestamp: a fresher tool-end
                // re-arms the timer and the stale one no-ops on firing.
                self.expiry.set(
                    ExpiryId::tool_completed(&key),
                    Duration::from_millis(self.cfg.tool_completed_ttl_ms),
                    now,
                    now_ms,
                );
            }

            ExecEvent::TokenDelta { content, .. } => {
                let Some(delta) = content.as_deref() else {
                    return false;
                };
                let stream = self
                    .streams
                    .entry(key.clone())
                    .or_insert_with(|| StreamState::new(now));
                stream.push(delta);
                if stream.should_flush(now, &self.cfg) {
                    let window = stream.flush(now, &self.cfg);
                    let clean = sanitize(&window);
                    let entry = self.nodes.entry(key).or_insert_with(NodeStatus::blank);
                    entry.state = NodeState::Thinking;
                    entry.thinking = cap(
                        recent_window(&clean, self.cfg.recent_window_len),
                        self.cfg.max_thinking_len,
                    );
                    entry.thinking_preview =
                        truncate(&entry.thinking, self.cfg.preview_len);
                    entry.last_event_at_ms = now_ms;
                }
            }

            ExecEvent::CostReport {
                model,
                prompt_tokens,
                completion_tokens,
                total_tokens,
                ..
            } => {
                // Some transports omit the total; the parts still count.
                let total = if *total_tokens == 0 {
                    prompt_tokens + completion_tokens
                } else {
                    *total_tokens
                };
                trace!(
                    node = %key,
                    total,
                    increment = %cost_string(total, model.as_deref()),
                    "cost report"
                );
                // Remember the model so a later report that omits it still
                // prices against the right rate.
                let stream = self
                    .streams
                    .entry(key.clone())
                    .or_insert_with(|| StreamState::new(now));
                if model.is_some() {
                    stream.model.clone_from(model);
                }
                let pricing_model = stream.model.clone();
                let entry = self.nodes.entry(key).or_insert_with(NodeStatus::blank);
                entry
                    .token_cost
                    .add(*prompt_tokens, *completion_tokens, total);
                entry.token_cost.cost =
                    cost_string(entry.token_cost.total_tokens, pricing_model.as_deref());
                entry.last_event_at_ms = now_ms;
            }

            ExecEvent::ScopeEnd { .. } => {
                if let Some(stream) = self.streams.get_mut(&key) {
                    stream.clear_text();
                }
                let entry = self.nodes.entry(key).or_insert_with(NodeStatus::blank);
                entry.state = NodeState::Completed;
                entry.thinking.clear();
                entry.thinking_preview.clear();
                entry.active_tool = None;
                entry.mark_ended(now_ms);
                entry.last_event_at_ms = now_ms;
            }

            ExecEvent::TerminalError { error, .. } => {
                if let Some(stream) = self.streams.get_mut(&key) {
                    stream.clear_text();
                }
                let entry = self.nodes.entry(key.clone()).or_insert_with(NodeStatus::blank);
                entry.state = NodeState::Error;
                entry.error = error.clone();
                entry.thinking.clear();
                entry.thinking_preview.clear();
                entry.active_tool = None;
                entry.mark_ended(now_ms);
                entry.last_event_at_ms = now_ms;
                // Leave the final frame visible for the grace window, then
                // blank the node unless a new scope started in the meantime.
                self.expiry.set(
                    ExpiryId::node_reset(&key),
                    Duration::from_millis(self.cfg.reset_grace_ms),
                    now,
                    now_ms,
                );
            }

            ExecEvent::StatusPing {
                state,
                thinking,
                tool,
                ..
            } => {
                let entry = self.nodes.entry(key).or_insert_with(NodeStatus::blank);
                if let Some(parsed) = state.as_deref().and_then(NodeState::parse) {
                    entry.state = parsed;
                }
                if let Some(text) = thinking.as_deref() {
                    let clean = sanitize(text);
                    entry.thinking = cap(&clean, self.cfg.max_thinking_len);
                    entry.thinking_preview =
                        truncate(&entry.thinking, self.cfg.preview_len);
                }
                if let Some(t) = tool.as_deref() {
                    entry.active_tool = Some(tools::display_name(t));
                }
                entry.last_event_at_ms = now_ms;
            }

            // Handled above.
            ExecEvent::TerminalComplete { .. } => {}

            ExecEvent::Other(raw) => {
                trace!(tag = ?raw.get("type"), "ignoring unknown event kind");
            }
        }

        false
    }

    /// Fire all due expiries, re-checking each guard against current state.
    pub fn tick(&mut self, clock: &dyn Clock) {
        for (id, guard) in self.expiry.fired(clock.now()) {
            if id.is_sweep() {
                if guard == self.generation {
                    debug!("reset sweep fired, blanking all nodes");
                    self.blank_all();
                }
                continue;
            }
            let Some(key) = id.node_key() else { continue };
            if id.is_tool_completed() {
                if let Some(entry) = self.nodes.get_mut(key) {
                    if entry.tool_completed_at_ms == Some(guard) {
                        entry.tool_completed = None;
                        entry.tool_completed_at_ms = None;
                    }
                }
            } else if id.is_node_reset() {
                let stale = self
                    .nodes
                    .get(key)
                    .is_some_and(|e| e.state == NodeState::Error && e.ended_at_ms == Some(guard));
                if stale {
                    let key = NodeKey::new(key);
                    self.reset_node(&key);
                }
            }
        }
    }

    /// Earliest pending expiry deadline, for the host's timer loop.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.expiry.next_deadline()
    }

    /// Discard everything and start a fresh run.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.streams.clear();
        self.expiry.cancel_all();
        self.cursor = 0;
        self.generation += 1;
    }

    /// Synchronous cancellation wipe: every entry blanks in the same update,
    /// all timers die, and the cursor rewinds for the next run's log.
    fn cancel_run(&mut self) {
        self.blank_all();
        self.expiry.cancel_all();
        self.cursor = 0;
        self.generation += 1;
    }

    fn blank_all(&mut self) {
        for entry in self.nodes.values_mut() {
            *entry = NodeStatus::blank();
        }
        self.streams.clear();
    }

    fn reset_node(&mut self, key: &NodeKey) {
        self.streams.remove(key);
        self.expiry.cancel(&ExpiryId::tool_completed(key));
        self.expiry.cancel(&ExpiryId::node_reset(key));
        if let Some(entry) = self.nodes.get_mut(key) {
            *entry = NodeStatus::blank();
        }
    }

    fn schedule_sweep(&mut self, now: Instant) {
        self.expiry.set(
            ExpiryId::sweep(),
            Duration::from_millis(self.cfg.reset_grace_ms),
            now,
            self.generation,
        );
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
#[path = "reducer_tests.rs"]
mod tests;
