// World records owned by the world task.

use crate::domain::tuning;
use std::collections::HashMap;

/// One connected participant. Created when its connection opens, removed
/// when it closes; exclusively owned by [`WorldState`] in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: u64,
    pub x: i32,
    pub y: i32,
    // Carried on the wire for clients; nothing server-side mutates it.
    pub score: i32,
    pub width: u32,
    pub height: u32,
}

impl Player {
    /// Fresh player record at the spawn position.
    pub fn spawn(id: u64) -> Self {
        Self {
            id,
            x: 0,
            y: 0,
            score: 0,
            width: tuning::PLAYER_WIDTH,
            height: tuning::PLAYER_HEIGHT,
        }
    }
}

/// A static pickup item. The set is fixed at startup; items are never
/// collected, moved, or respawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collectible {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub value: i32,
    pub width: u32,
    pub height: u32,
}

/// Movement command token accepted from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The authoritative world: players keyed by session id plus the fixed
/// collectible set. Mutated in place by the world task only, so the player
/// key set always mirrors the live session set.
#[derive(Debug)]
pub struct WorldState {
    pub players: HashMap<u64, Player>,
    pub collectibles: Vec<Collectible>,
}

impl WorldState {
    pub fn new(collectibles: Vec<Collectible>) -> Self {
        Self {
            players: HashMap::new(),
            collectibles,
        }
    }
}
