// Domain layer: world records and movement rules.

pub mod state;
pub mod systems;
pub mod tuning;

pub use state::{Collectible, Direction, Player, WorldState};
