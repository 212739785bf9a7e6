// Wire protocol DTOs and conversions for the public session messages.

use crate::domain::{Collectible, Direction, Player};
use crate::use_cases::SessionEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    // Private bootstrap for a new connection: its id plus the full world.
    Init {
        id: String,
        players: HashMap<String, PlayerDto>,
        collectibles: Vec<CollectibleDto>,
    },
    // A new player entered; sent to every other connection.
    PlayerJoined { id: String, player: PlayerDto },
    // Periodic full-state broadcast, no deltas and no change detection.
    GameState {
        players: HashMap<String, PlayerDto>,
        collectibles: Vec<CollectibleDto>,
    },
    // A player disconnected; the payload is the departed id.
    PlayerLeft(String),
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    // One discrete movement step for the sender's player.
    MovePlayer(DirectionDto),
}

/// Direction token carried by `movePlayer`. Unknown tokens fail to parse
/// and are dropped by the connection loop.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionDto {
    Up,
    Down,
    Left,
    Right,
}

impl From<DirectionDto> for Direction {
    fn from(direction: DirectionDto) -> Self {
        match direction {
            DirectionDto::Up => Direction::Up,
            DirectionDto::Down => Direction::Down,
            DirectionDto::Left => Direction::Left,
            DirectionDto::Right => Direction::Right,
        }
    }
}

/// Player record as serialized in init, playerJoined, and gameState payloads.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerDto {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub score: i32,
    pub width: u32,
    pub height: u32,
}

impl From<&Player> for PlayerDto {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.to_string(),
            x: player.x,
            y: player.y,
            score: player.score,
            width: player.width,
            height: player.height,
        }
    }
}

/// Collectible record as serialized in init and gameState payloads.
#[derive(Debug, Clone, Serialize)]
pub struct CollectibleDto {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub value: i32,
    pub width: u32,
    pub height: u32,
}

impl From<&Collectible> for CollectibleDto {
    fn from(collectible: &Collectible) -> Self {
        Self {
            id: collectible.id.clone(),
            x: collectible.x,
            y: collectible.y,
            value: collectible.value,
            width: collectible.width,
            height: collectible.height,
        }
    }
}

fn players_dto(players: &HashMap<u64, Player>) -> HashMap<String, PlayerDto> {
    players
        .iter()
        .map(|(id, player)| (id.to_string(), PlayerDto::from(player)))
        .collect()
}

fn collectibles_dto(collectibles: &[Collectible]) -> Vec<CollectibleDto> {
    collectibles.iter().map(CollectibleDto::from).collect()
}

impl From<SessionEvent> for ServerMessage {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::Init {
                session_id,
                snapshot,
            } => ServerMessage::Init {
                id: session_id.to_string(),
                players: players_dto(&snapshot.players),
                collectibles: collectibles_dto(&snapshot.collectibles),
            },
            SessionEvent::PlayerJoined { player } => ServerMessage::PlayerJoined {
                id: player.id.to_string(),
                player: PlayerDto::from(&player),
            },
            SessionEvent::GameState(snapshot) => ServerMessage::GameState {
                players: players_dto(&snapshot.players),
                collectibles: collectibles_dto(&snapshot.collectibles),
            },
            SessionEvent::PlayerLeft { session_id } => {
                ServerMessage::PlayerLeft(session_id.to_string())
            }
        }
    }
}
