// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Model pricing for token-cost display.
//!
//! Rates are USD per one million tokens (blended, updated December 2025).
//! Lookup is a case-insensitive substring match on the model identifier so
//! dated variants ("claude-sonnet-4-5-20250929") resolve to their family
//! rate. Entries are ordered most-specific first because the first match
//! wins.

/// USD per 1M tokens by model-id substring.
pub const COST_PER_1M_TOKENS: &[(&str, f64)] = &[
    // OpenAI reasoning models
    ("o3-mini", 4.00),
    ("o4-mini", 3.00),
    ("o3", 20.00),
    // OpenAI GPT-4o series
    ("gpt-4o-mini", 0.15),
    ("gpt-4o", 2.50),
    // Anthropic Claude 4.5
    ("claude-opus-4-5", 15.00),
    ("claude-sonnet-4-5", 3.00),
    ("claude-haiku-4-5", 1.00),
    // Google Gemini
    ("gemini-3-pro", 2.00),
    ("gemini-2.5-flash", 0.075),
    ("gemini-2.0-flash", 0.075),
];

/// Fallback rate for unknown models.
pub const DEFAULT_RATE: f64 = 1.00;

/// USD-per-1M-token rate for a model identifier.
pub fn rate_for(model: &str) -> f64 {
    let lower = model.to_lowercase();
    COST_PER_1M_TOKENS
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_RATE)
}

/// Format a cumulative token count as a display cost string, e.g. `"$0.0375"`.
///
/// `model` may be `None` or unrecognized; the default rate applies.
pub fn cost_string(total_tokens: u64, model: Option<&str>) -> String {
    let rate = model.map(rate_for).unwrap_or(DEFAULT_RATE);
    let cost = (total_tokens as f64 / 1_000_000.0) * rate;
    format!("${cost:.4}")
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
