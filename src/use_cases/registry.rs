// The live session set and its outbound queues.

use crate::use_cases::types::SessionEvent;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::debug;

/// The set of sessions currently attached to the world task.
///
/// Owned by the world task, so every enumeration sees exactly the live set
/// at the moment of the call. Delivery is fire-and-forget: a full or
/// closed outbound queue drops the event instead of stalling the world
/// loop on a slow client.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<u64, mpsc::Sender<SessionEvent>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    pub fn insert(&mut self, session_id: u64, outbound_tx: mpsc::Sender<SessionEvent>) {
        self.sessions.insert(session_id, outbound_tx);
    }

    pub fn remove(&mut self, session_id: u64) {
        self.sessions.remove(&session_id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sends an event to a single session.
    pub fn send_to(&self, session_id: u64, event: SessionEvent) {
        if let Some(outbound_tx) = self.sessions.get(&session_id) {
            Self::deliver(session_id, outbound_tx, event);
        }
    }

    /// Sends an event to every live session.
    pub fn broadcast(&self, event: &SessionEvent) {
        for (session_id, outbound_tx) in &self.sessions {
            Self::deliver(*session_id, outbound_tx, event.clone());
        }
    }

    /// Sends an event to every live session except `skip`.
    pub fn broadcast_except(&self, skip: u64, event: &SessionEvent) {
        for (session_id, outbound_tx) in &self.sessions {
            if *session_id != skip {
                Self::deliver(*session_id, outbound_tx, event.clone());
            }
        }
    }

    fn deliver(session_id: u64, outbound_tx: &mpsc::Sender<SessionEvent>, event: SessionEvent) {
        match outbound_tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!(session_id, "outbound queue full; dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                // Session is mid-close; its Disconnect event prunes the entry.
                debug!(session_id, "outbound queue closed; dropping event");
            }
        }
    }
}
