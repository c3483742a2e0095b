use anyhow::Result;

use crate::snake::Direction::{self, *};

/// The four movement keys as sampled for one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    pub const NONE: KeyState = KeyState::new(false, false, false, false);
    pub const UP: KeyState = KeyState::new(true, false, false, false);
    pub const DOWN: KeyState = KeyState::new(false, true, false, false);
    pub const LEFT: KeyState = KeyState::new(false, false, true, false);
    pub const RIGHT: KeyState = KeyState::new(false, false, false, true);

    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        KeyState { up, down, left, right }
    }

    pub const fn and(self, other: KeyState) -> Self {
        KeyState::new(
            self.up || other.up,
            self.down || other.down,
            self.left || other.left,
            self.right || other.right,
        )
    }

    /// Whether every key held in `required` is also held here.
    pub fn holds(&self, required: KeyState) -> bool {
        (!required.up || self.up)
            && (!required.down || self.down)
            && (!required.left || self.left)
            && (!required.right || self.right)
    }
}

/// Key combinations in priority order; diagonals come before the cardinals.
const DIRECTION_RULES: [(KeyState, Direction); 8] = [
    (KeyState::LEFT.and(KeyState::UP), UpLeft),
    (KeyState::LEFT.and(KeyState::DOWN), DownLeft),
    (KeyState::RIGHT.and(KeyState::UP), UpRight),
    (KeyState::RIGHT.and(KeyState::DOWN), DownRight),
    (KeyState::LEFT, Left),
    (KeyState::RIGHT, Right),
    (KeyState::UP, Up),
    (KeyState::DOWN, Down),
];

/// The direction asked for by `keys`, or `None` if no movement key is held.
pub fn resolve_direction(keys: KeyState) -> Option<Direction> {
    DIRECTION_RULES
        .iter()
        .find(|(required, _)| keys.holds(*required))
        .map(|(_, direction)| *direction)
}

/// Where the game loop gets its per-tick input from.
pub trait InputSource {
    /// Whether the player asked to quit since the last poll.
    fn poll_quit(&mut self) -> Result<bool>;

    /// The movement keys held for this tick.
    fn sample_keys(&mut self) -> Result<KeyState>;

    /// Forgets any keys still held over from a previous game.
    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keys() {
        assert_eq!(resolve_direction(KeyState::NONE), None);
    }

    #[test]
    fn test_cardinals() {
        assert_eq!(resolve_direction(KeyState::UP), Some(Up));
        assert_eq!(resolve_direction(KeyState::DOWN), Some(Down));
        assert_eq!(resolve_direction(KeyState::LEFT), Some(Left));
        assert_eq!(resolve_direction(KeyState::RIGHT), Some(Right));
    }

    #[test]
    fn test_diagonals() {
        assert_eq!(resolve_direction(KeyState::new(true, false, true, false)), Some(UpLeft));
        assert_eq!(resolve_direction(KeyState::new(false, true, true, false)), Some(DownLeft));
        assert_eq!(resolve_direction(KeyState::new(true, false, false, true)), Some(UpRight));
        assert_eq!(resolve_direction(KeyState::new(false, true, false, true)), Some(DownRight));
    }

    #[test]
    fn test_precedence() {
        // Left beats right, and the up diagonal beats the down one
        assert_eq!(resolve_direction(KeyState::new(true, true, true, true)), Some(UpLeft));
        assert_eq!(resolve_direction(KeyState::new(true, true, false, true)), Some(UpRight));
        assert_eq!(resolve_direction(KeyState::new(false, false, true, true)), Some(Left));
        assert_eq!(resolve_direction(KeyState::new(true, true, false, false)), Some(Up));
    }
}
