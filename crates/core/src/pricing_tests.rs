// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    gpt_4o          = { "gpt-4o", 2.50 },
    gpt_4o_mini     = { "gpt-4o-mini", 0.15 },
    o3              = { "o3", 20.00 },
    o3_mini         = { "o3-mini", 4.00 },
    sonnet_dated    = { "claude-sonnet-4-5-20250929", 3.00 },
    opus            = { "claude-opus-4-5", 15.00 },
    gemini_flash    = { "gemini-2.5-flash", 0.075 },
    case_insensitive = { "GPT-4o", 2.50 },
    unknown         = { "llama-9", 1.00 },
)]
fn rate_lookup(model: &str, expected: f64) {
    assert_eq!(rate_for(model), expected);
}

#[test]
fn mini_variants_do_not_collide_with_base_rates() {
    // Substring matching must pick the specific entry, not a prefix family
    assert_eq!(rate_for("gpt-4o-mini-2024"), 0.15);
    assert_eq!(rate_for("o3-mini-high"), 4.00);
}

#[test]
fn cost_string_formats_four_decimals() {
    assert_eq!(cost_string(150, Some("gpt-4o")), "$0.0004");
    assert_eq!(cost_string(1_000_000, Some("gpt-4o")), "$2.5000");
    assert_eq!(cost_string(0, Some("gpt-4o")), "$0.0000");
}

#[test]
fn cost_string_without_model_uses_default_rate() {
    assert_eq!(cost_string(1_000_000, None), "$1.0000");
}
