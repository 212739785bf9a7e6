use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a process-unique, monotonically increasing session identifier.
///
/// Ids are never reused for the lifetime of the server, which keeps player
/// map keys and registry entries stable across reconnects.
pub fn next_session_id() -> u64 {
    NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed)
}
