// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::spawn_pump;
use crate::feed::StatusFeed;
use gantry_core::event::ExecEvent;
use gantry_core::status::NodeState;
use gantry_core::ReducerConfig;
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;

fn event(value: serde_json::Value) -> ExecEvent {
    serde_json::from_value(value).unwrap()
}

fn fast_config() -> ReducerConfig {
    ReducerConfig {
        tool_completed_ttl_ms: 30,
        reset_grace_ms: 30,
        ..ReducerConfig::default()
    }
}

#[tokio::test]
async fn pump_applies_events_in_order() {
    let feed = StatusFeed::new(fast_config());
    let (tx, rx) = mpsc::channel(16);
    let pump = spawn_pump(feed.clone(), rx);

    tx.send(event(json!({"type": "scope:start", "agent_label": "a"})))
        .await
        .unwrap();
    tx.send(event(json!({"type": "scope:end", "agent_label": "a"})))
        .await
        .unwrap();
    drop(tx);
    pump.await.unwrap();

    assert_eq!(
        feed.status_of("a").map(|s| s.state),
        Some(NodeState::Completed)
    );
}

#[tokio::test]
async fn pump_expires_transient_flags_while_the_stream_is_quiet() {
    let feed = StatusFeed::new(fast_config());
    let (tx, rx) = mpsc::channel(16);
    let pump = spawn_pump(feed.clone(), rx);

    tx.send(event(json!({"type": "tool:end", "agent_label": "a", "tool_name": "web_search"})))
        .await
        .unwrap();

    // No further events; the pump must wake itself for the deadline.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(feed.status_of("a").unwrap().tool_completed.is_none());

    drop(tx);
    pump.await.unwrap();
}

#[tokio::test]
async fn pump_stops_when_the_channel_closes() {
    let feed = StatusFeed::new(fast_config());
    let (tx, rx) = mpsc::channel::<ExecEvent>(1);
    let pump = spawn_pump(feed, rx);
    drop(tx);
    pump.await.unwrap();
}
