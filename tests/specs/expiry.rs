// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::{event, scope_end, scope_start};
use gantry_core::clock::FakeClock;
use gantry_core::status::NodeState;
use gantry_core::ReducerConfig;
use gantry_status::StatusBoard;
use serde_json::json;
use std::time::Duration;

#[test]
fn tool_completed_expires_on_schedule_unless_superseded() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());

    board.apply(
        &event(json!({"type": "tool:end", "agent_label": "nodeA", "tool_name": "web_search"})),
        &clock,
    );

    clock.advance(Duration::from_millis(1_000));
    board.tick(&clock);
    assert!(board.status_of("nodeA").unwrap().tool_completed.is_some());

    clock.advance(Duration::from_millis(1_100));
    board.tick(&clock);
    assert!(board.status_of("nodeA").unwrap().tool_completed.is_none());

    // Superseding flag: the older deadline passing must not clear it.
    board.apply(
        &event(json!({"type": "tool:end", "agent_label": "nodeA", "tool_name": "read_file"})),
        &clock,
    );
    clock.advance(Duration::from_millis(1_000));
    board.apply(
        &event(json!({"type": "tool:end", "agent_label": "nodeA", "tool_name": "task"})),
        &clock,
    );
    clock.advance(Duration::from_millis(1_100));
    board.tick(&clock);
    assert_eq!(
        board.status_of("nodeA").unwrap().tool_completed.as_deref(),
        Some("Subagent Task")
    );
    clock.advance(Duration::from_millis(1_000));
    board.tick(&clock);
    assert!(board.status_of("nodeA").unwrap().tool_completed.is_none());
}

#[test]
fn run_completion_sweeps_the_map_after_the_grace_window() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());

    board.apply(&scope_start("a"), &clock);
    board.apply(&scope_end("a"), &clock);
    board.apply(&scope_end("workflow_execution"), &clock);

    // The final frame stays up during the grace window.
    assert_eq!(
        board.status_of("a").map(|s| s.state),
        Some(NodeState::Completed)
    );

    clock.advance(Duration::from_millis(3_100));
    board.tick(&clock);
    assert_eq!(board.status_of("a").map(|s| s.state), Some(NodeState::Idle));
}

#[test]
fn a_run_restarting_in_band_supersedes_the_sweep() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());

    board.apply(&scope_start("a"), &clock);
    board.apply(&scope_end("workflow_execution"), &clock);

    // The next run announces itself through the same event stream.
    clock.advance(Duration::from_millis(1_000));
    board.apply(&scope_start("workflow_execution"), &clock);
    board.apply(&scope_start("b"), &clock);

    clock.advance(Duration::from_millis(2_500));
    board.tick(&clock);
    assert_eq!(
        board.status_of("b").map(|s| s.state),
        Some(NodeState::Running)
    );
}

#[test]
fn a_new_run_invalidates_a_pending_sweep() {
    let clock = FakeClock::new();
    let mut board = StatusBoard::new(ReducerConfig::default());

    board.apply(&scope_start("a"), &clock);
    board.apply(&scope_end("workflow_execution"), &clock);

    clock.advance(Duration::from_millis(1_000));
    board.reset();
    board.apply(&scope_start("b"), &clock);

    clock.advance(Duration::from_millis(2_500));
    board.tick(&clock);
    assert_eq!(
        board.status_of("b").map(|s| s.state),
        Some(NodeState::Running)
    );
}
