// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reducer tuning parameters.
//!
//! All thresholds that shape the visible status stream live here so hosts
//! can override them from a TOML fragment; the defaults match the tuned
//! values of the reference frontend.

use serde::Deserialize;
use thiserror::Error;

/// Failed to parse a reducer config fragment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid reducer config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables for the status reducer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReducerConfig {
    /// Hard cap on visible reasoning text, in characters.
    pub max_thinking_len: usize,
    /// Target length of the word-boundary-safe preview.
    pub preview_len: usize,
    /// Stream buffer flush quantum in milliseconds.
    pub flush_quantum_ms: u64,
    /// Stream buffer flush size threshold in characters.
    pub flush_buffer_len: usize,
    /// Recency window of the accumulator shown as `thinking`, in characters.
    pub recent_window_len: usize,
    /// How long the tool-completed flag stays visible, in milliseconds.
    pub tool_completed_ttl_ms: u64,
    /// Grace window before terminal states are swept back to idle.
    pub reset_grace_ms: u64,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            max_thinking_len: 5000,
            preview_len: 120,
            flush_quantum_ms: 100,
            flush_buffer_len: 20,
            recent_window_len: 2000,
            tool_completed_ttl_ms: 2000,
            reset_grace_ms: 3000,
        }
    }
}

impl ReducerConfig {
    /// Parse overrides from a TOML fragment; absent keys keep defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
