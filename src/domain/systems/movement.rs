use crate::domain::state::Direction;
use crate::domain::tuning::MOVE_STEP;

/// Applies a single movement command to a position.
///
/// One discrete step along one axis; no bounds checking and no collision.
/// Repeated identical commands compound linearly.
pub fn step(x: i32, y: i32, direction: Direction) -> (i32, i32) {
    match direction {
        Direction::Up => (x, y - MOVE_STEP),
        Direction::Down => (x, y + MOVE_STEP),
        Direction::Left => (x - MOVE_STEP, y),
        Direction::Right => (x + MOVE_STEP, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_direction_moves_exactly_one_axis() {
        assert_eq!(step(10, 20, Direction::Up), (10, 20 - MOVE_STEP));
        assert_eq!(step(10, 20, Direction::Down), (10, 20 + MOVE_STEP));
        assert_eq!(step(10, 20, Direction::Left), (10 - MOVE_STEP, 20));
        assert_eq!(step(10, 20, Direction::Right), (10 + MOVE_STEP, 20));
    }

    #[test]
    fn positions_are_unbounded() {
        // No clamping: coordinates may go negative or keep growing.
        assert_eq!(step(0, 0, Direction::Left), (-MOVE_STEP, 0));
        assert_eq!(step(0, 0, Direction::Up), (0, -MOVE_STEP));
        assert_eq!(
            step(i32::MAX - MOVE_STEP, 0, Direction::Right),
            (i32::MAX, 0)
        );
    }

    #[test]
    fn repeated_commands_compound_linearly() {
        let (mut x, mut y) = (0, 0);
        for _ in 0..4 {
            (x, y) = step(x, y, Direction::Down);
        }
        assert_eq!((x, y), (0, 4 * MOVE_STEP));
    }
}
