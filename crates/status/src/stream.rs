// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-node buffering of high-frequency token deltas.
//!
//! Token-level streaming can arrive at hundreds of events per second; it is
//! coalesced into periodic UI-sized updates instead of recomputing visible
//! text on every delta. A flush happens when either the time quantum has
//! elapsed since the previous flush or the pending buffer is large enough,
//! whichever comes first. Everything here is internal to the reducer — the
//! accumulator and buffering metadata are never exposed in `NodeStatus`.

use gantry_core::{text, ReducerConfig};
use std::time::Instant;

/// Streaming state for one node.
#[derive(Debug)]
pub(crate) struct StreamState {
    /// Pending deltas not yet part of visible state
    buffer: String,
    last_flush: Instant,
    update_count: u64,
    /// Raw accumulator for the run; unbounded while the node is live
    accumulated: String,
    /// Last model seen in a cost report, for cumulative pricing
    pub(crate) model: Option<String>,
}

impl StreamState {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            buffer: String::new(),
            last_flush: now,
            update_count: 0,
            accumulated: String::new(),
            model: None,
        }
    }

    /// Append one delta to the pending buffer.
    pub(crate) fn push(&mut self, delta: &str) {
        self.buffer.push_str(delta);
        self.update_count += 1;
    }

    /// Whether pending text should be folded into visible state now.
    pub(crate) fn should_flush(&self, now: Instant, cfg: &ReducerConfig) -> bool {
        if self.buffer.is_empty() {
            return false;
        }
        let elapsed_ms = now.duration_since(self.last_flush).as_millis() as u64;
        elapsed_ms > cfg.flush_quantum_ms || self.buffer.chars().count() > cfg.flush_buffer_len
    }

    /// Move pending text onto the accumulator and return the bounded recency
    /// window that visible `thinking` text is derived from.
    pub(crate) fn flush(&mut self, now: Instant, cfg: &ReducerConfig) -> String {
        self.accumulated.push_str(&self.buffer);
        self.buffer.clear();
        self.last_flush = now;
        text::recent_window(&self.accumulated, cfg.recent_window_len).to_string()
    }

    /// Drop pending and accumulated text (scope end / terminal events).
    ///
    /// The model sticks around so late cost reports still price correctly.
    pub(crate) fn clear_text(&mut self) {
        self.buffer.clear();
        self.accumulated.clear();
    }

    #[cfg(test)]
    pub(crate) fn update_count(&self) -> u64 {
        self.update_count
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
