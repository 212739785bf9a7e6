// Use-case level inputs/outputs for the world loop.

use crate::domain::{Collectible, Direction, Player};
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Events flowing from connections (and their broadcast timers) into the
/// world task.
#[derive(Debug)]
pub enum GameEvent {
    /// A transport connection opened. The world registers the outbound
    /// queue, spawns the player, and replies with [`SessionEvent::Init`].
    Connect {
        session_id: u64,
        outbound_tx: mpsc::Sender<SessionEvent>,
    },
    /// A directional movement command from a connected client.
    Move { session_id: u64, direction: Direction },
    /// A broadcast timer tick requesting a full-state fan-out to every
    /// live session.
    Snapshot,
    /// The connection closed. The world removes the player and notifies
    /// the remaining sessions.
    Disconnect { session_id: u64 },
}

/// Events fanned out from the world task to individual sessions.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Private bootstrap for a new session; the snapshot includes its own
    /// freshly spawned player.
    Init {
        session_id: u64,
        snapshot: WorldSnapshot,
    },
    /// Another player entered; never delivered to the player it describes.
    PlayerJoined { player: Player },
    /// Periodic full-state broadcast.
    GameState(WorldSnapshot),
    /// A player disconnected; delivered to every remaining session.
    PlayerLeft { session_id: u64 },
}

/// A full copy of the world taken at a single point between event
/// applications, so it never reflects a half-applied movement.
#[derive(Debug, Clone)]
pub struct WorldSnapshot {
    pub players: HashMap<u64, Player>,
    pub collectibles: Vec<Collectible>,
}
