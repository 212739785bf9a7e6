use crate::domain::systems::movement;
use crate::domain::{Player, WorldState};
use crate::use_cases::registry::SessionRegistry;
use crate::use_cases::types::{GameEvent, SessionEvent, WorldSnapshot};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Authoritative world loop.
///
/// The single consumer of all connect, movement, timer, and disconnect
/// events, so a snapshot always reflects a fully-applied set of prior
/// movements. Runs until every event sender is dropped.
pub async fn world_task(mut events_rx: mpsc::Receiver<GameEvent>, mut world: WorldState) {
    let mut registry = SessionRegistry::new();

    while let Some(event) = events_rx.recv().await {
        match event {
            GameEvent::Connect {
                session_id,
                outbound_tx,
            } => {
                let player = Player::spawn(session_id);
                world.players.insert(session_id, player.clone());
                registry.insert(session_id, outbound_tx);
                info!(session_id, connected = registry.len(), "player joined");

                // Init goes only to the new session and includes its own player.
                registry.send_to(
                    session_id,
                    SessionEvent::Init {
                        session_id,
                        snapshot: snapshot_of(&world),
                    },
                );
                registry.broadcast_except(session_id, &SessionEvent::PlayerJoined { player });
            }
            GameEvent::Move {
                session_id,
                direction,
            } => {
                // A command can race a just-processed disconnect; drop it quietly.
                let Some(player) = world.players.get_mut(&session_id) else {
                    debug!(session_id, "movement for unknown player; ignoring");
                    continue;
                };
                (player.x, player.y) = movement::step(player.x, player.y, direction);
            }
            GameEvent::Snapshot => {
                registry.broadcast(&SessionEvent::GameState(snapshot_of(&world)));
            }
            GameEvent::Disconnect { session_id } => {
                world.players.remove(&session_id);
                registry.remove(session_id);
                info!(session_id, connected = registry.len(), "player left");
                registry.broadcast(&SessionEvent::PlayerLeft { session_id });
            }
        }
    }
}

fn snapshot_of(world: &WorldState) -> WorldSnapshot {
    WorldSnapshot {
        players: world.players.clone(),
        collectibles: world.collectibles.clone(),
    }
}
