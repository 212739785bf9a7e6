use std::{env, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub fn http_port() -> u16 {
    env::var("ARENA_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

/// Capacity for inbound game events (connects, movement, timer ticks).
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Capacity of each session's outbound queue before events are dropped.
pub const OUTBOUND_CHANNEL_CAPACITY: usize = 64;

/// Fixed period of each session's gameState broadcast timer.
pub const BROADCAST_INTERVAL: Duration = Duration::from_millis(50);
