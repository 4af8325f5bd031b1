//! Raw key identifiers to game actions. Key names follow the spellings a
//! browser-style input layer delivers (`"ArrowUp"`, `"w"`, `" "`).

use crate::engine::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    /// Space: starts from idle/game-over, otherwise toggles pause. The
    /// scheduler resolves which, since it knows the current status.
    StartOrPause,
    Ignored,
}

pub fn map_key(key: &str) -> KeyAction {
    if key == " " {
        return KeyAction::StartOrPause;
    }

    match direction_from_key(key) {
        Some(direction) => KeyAction::Turn(direction),
        None => KeyAction::Ignored,
    }
}

/// Arrow keys and WASD (case-insensitive). Anything else is `None`.
pub fn direction_from_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        "w" | "W" => Some(Direction::Up),
        "s" | "S" => Some(Direction::Down),
        "a" | "A" => Some(Direction::Left),
        "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_directions() {
        assert_eq!(map_key("ArrowUp"), KeyAction::Turn(Direction::Up));
        assert_eq!(map_key("ArrowDown"), KeyAction::Turn(Direction::Down));
        assert_eq!(map_key("ArrowLeft"), KeyAction::Turn(Direction::Left));
        assert_eq!(map_key("ArrowRight"), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_wasd_is_case_insensitive() {
        assert_eq!(map_key("w"), KeyAction::Turn(Direction::Up));
        assert_eq!(map_key("W"), KeyAction::Turn(Direction::Up));
        assert_eq!(map_key("s"), KeyAction::Turn(Direction::Down));
        assert_eq!(map_key("A"), KeyAction::Turn(Direction::Left));
        assert_eq!(map_key("d"), KeyAction::Turn(Direction::Right));
        assert_eq!(map_key("D"), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_space_is_start_or_pause() {
        assert_eq!(map_key(" "), KeyAction::StartOrPause);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        assert_eq!(map_key("Escape"), KeyAction::Ignored);
        assert_eq!(map_key("x"), KeyAction::Ignored);
        assert_eq!(map_key("Enter"), KeyAction::Ignored);
        assert_eq!(map_key(""), KeyAction::Ignored);
    }
}
