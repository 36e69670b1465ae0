// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gantry-status: the execution-event-to-node-status reducer.
//!
//! Folds an ordered, append-only stream of execution events into a live
//! per-node status map for the workflow canvas: reasoning text with stream
//! throttling, tool lifecycle flags with timed expiry, accumulated token
//! cost, and cancellation-safe resets. See `gantry-core` for the event
//! model and classification rules.

mod expiry;
mod stream;

pub mod feed;
pub mod pump;
pub mod reducer;
pub mod tools;
pub mod views;

pub use feed::StatusFeed;
pub use pump::spawn_pump;
pub use reducer::StatusBoard;
pub use views::NodeStatusMap;
