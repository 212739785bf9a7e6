// Gameplay tuning for the session world. Keep this separate from
// runtime/server configuration (ports, channel capacities, broadcast
// cadence).

use crate::domain::state::Collectible;

/// Distance one movement command travels along its axis, in pixels.
pub const MOVE_STEP: i32 = 5;

/// Player collision/render box in pixels.
pub const PLAYER_WIDTH: u32 = 20;
pub const PLAYER_HEIGHT: u32 = 20;

/// Collectible collision/render box in pixels.
pub const COLLECTIBLE_WIDTH: u32 = 15;
pub const COLLECTIBLE_HEIGHT: u32 = 15;

/// The fixed collectible table spawned once at process start.
pub fn starting_collectibles() -> Vec<Collectible> {
    [("col1", 100, 100, 1), ("col2", 300, 200, 2)]
        .into_iter()
        .map(|(id, x, y, value)| Collectible {
            id: id.to_string(),
            x,
            y,
            value,
            width: COLLECTIBLE_WIDTH,
            height: COLLECTIBLE_HEIGHT,
        })
        .collect()
}
