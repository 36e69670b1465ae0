// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::{event, example_log, scope_start};
use gantry_core::clock::FakeClock;
use gantry_core::status::NodeState;
use gantry_core::text::truncate;
use gantry_core::ReducerConfig;
use gantry_status::StatusBoard;
use serde_json::json;
use similar_asserts::assert_eq;
use std::time::Duration;

#[test]
fn replaying_the_same_log_yields_the_same_map() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());

    let log = example_log();
    board.ingest(&log, &clock);
    let once = board.snapshot();

    clock.advance(Duration::from_millis(500));
    board.ingest(&log, &clock);
    assert_eq!(board.snapshot(), once);
}

#[test]
fn token_totals_sum_across_reports_and_scope_starts() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());

    let totals = [100u64, 250, 7, 1000];
    for total in totals {
        board.apply(&scope_start("nodeA"), &clock);
        board.apply(
            &event(json!({
                "type": "cost:report",
                "agent_label": "nodeA",
                "model": "claude-sonnet-4-5",
                "total_tokens": total,
            })),
            &clock,
        );
    }

    let status = board.status_of("nodeA").unwrap();
    assert_eq!(status.token_cost.total_tokens, totals.iter().sum::<u64>());
}

#[test]
fn start_time_is_sticky_across_repeated_scope_starts() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());

    clock.advance(Duration::from_millis(1_000));
    board.apply(&scope_start("nodeA"), &clock);
    clock.advance(Duration::from_millis(5_000));
    board.apply(&scope_start("nodeA"), &clock);

    assert_eq!(board.status_of("nodeA").unwrap().started_at_ms, Some(1_000));
}

#[test]
fn truncation_is_word_safe_and_bounded() {
    let text = "the quick brown fox jumps over the lazy dog and keeps on running far away";
    let preview = truncate(text, 50);
    assert!(preview.chars().count() <= 53);
    assert!(preview.ends_with("..."));
    // Cut lands on a word boundary
    assert_eq!(preview, "the quick brown fox jumps over the lazy dog and...");

    // No space inside the tail window forces a hard cut.
    let solid = "a".repeat(80);
    let hard = truncate(&solid, 50);
    assert_eq!(hard.chars().count(), 53);

    assert_eq!(truncate("", 50), "");
}

#[test]
fn cancellation_blanks_every_entry_in_one_update() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());

    board.apply(&scope_start("a"), &clock);
    board.apply(
        &event(json!({"type": "reasoning:step", "agent_label": "b", "thought": "working"})),
        &clock,
    );
    board.apply(
        &event(json!({"type": "tool:start", "agent_label": "c", "tool_name": "task"})),
        &clock,
    );

    board.apply(
        &event(json!({"type": "run:error", "error": "Workflow cancelled by user"})),
        &clock,
    );

    let map = board.snapshot();
    assert_eq!(map.len(), 3);
    for status in map.values() {
        assert_eq!(status.state, NodeState::Idle);
        assert_eq!(status.thinking, "");
        assert_eq!(status.thinking_preview, "");
    }
}

#[test]
fn system_labels_never_enter_the_map() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());

    for label in ["ping", "node-42", "__start__"] {
        board.apply(&scope_start(label), &clock);
        board.apply(
            &event(json!({"type": "stream:token", "agent_label": label, "content": "x".repeat(50)})),
            &clock,
        );
    }
    assert!(board.snapshot().is_empty());
}

#[test]
fn example_run_settles_into_a_completed_costed_node() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());

    clock.advance(Duration::from_millis(200));
    board.ingest(&example_log(), &clock);

    let status = board.status_of("nodeA").unwrap();
    assert_eq!(status.state, NodeState::Completed);
    assert_eq!(status.token_cost.prompt_tokens, 100);
    assert_eq!(status.token_cost.completion_tokens, 50);
    assert_eq!(status.token_cost.total_tokens, 150);
    assert!(status.active_tool.is_none());
    assert_eq!(status.ended_at_ms, Some(200));
}

#[test]
fn status_map_serializes_camel_case_for_the_canvas() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());
    board.ingest(&example_log(), &clock);

    let json = serde_json::to_value(board.snapshot()).unwrap();
    let node = &json["nodeA"];
    assert_eq!(node["state"], "completed");
    assert_eq!(node["tokenCost"]["promptTokens"], 100);
    assert_eq!(node["tokenCost"]["totalTokens"], 150);
    assert!(node.get("activeTool").is_none());
}
