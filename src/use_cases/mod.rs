// Use cases layer: the authoritative world loop and session fan-out.

pub mod game;
pub mod registry;
pub mod types;

pub use registry::SessionRegistry;
pub use types::{GameEvent, SessionEvent, WorldSnapshot};
