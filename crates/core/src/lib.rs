// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gantry-core: event model, classification, and status data model for the
//! Gantry workflow-canvas status reducer.

pub mod classify;
pub mod clock;
pub mod config;
pub mod event;
pub mod pricing;
pub mod status;
pub mod text;
pub mod time_fmt;

pub use classify::{
    is_cancellation, is_run_scope, is_system_label, node_key_of, NodeKey, CANCELLATION_MARKERS,
    RUN_SCOPE, SYSTEM_NODE_MARKERS,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, ReducerConfig};
pub use event::{EventDecodeError, ExecEvent};
pub use status::{NodeState, NodeStatus, TokenCost};
pub use time_fmt::format_duration_ms;
