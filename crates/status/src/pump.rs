// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async event pump driving a [`StatusFeed`] from a channel.
//!
//! The transport pushes decoded events into an mpsc channel; the pump folds
//! them in arrival order and wakes itself for the board's next expiry
//! deadline in between, so transient flags clear on time even when the
//! stream goes quiet.

use crate::feed::StatusFeed;
use gantry_core::event::ExecEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Run the pump until the sending side of the channel closes.
pub fn spawn_pump(feed: StatusFeed, mut events: mpsc::Receiver<ExecEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("status pump started");
        loop {
            match feed.next_deadline() {
                Some(deadline) => {
                    let deadline = tokio::time::Instant::from_std(deadline);
                    tokio::select! {
                        received = events.recv() => match received {
                            Some(event) => {
                                feed.apply(&event);
                            }
                            None => break,
                        },
                        () = tokio::time::sleep_until(deadline) => feed.tick(),
                    }
                }
                None => match events.recv().await {
                    Some(event) => {
                        feed.apply(&event);
                    }
                    None => break,
                },
            }
        }
        // Settle any expiries already due before shutting down.
        feed.tick();
        debug!("status pump stopped");
    })
}

#[cfg(test)]
#[path = "pump_tests.rs"]
mod tests;
