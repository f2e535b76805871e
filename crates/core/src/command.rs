//! Discrete player commands and the keyboard mapping that produces them.

use serde::{Deserialize, Serialize};

use crate::RotationDirection;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateClockwise,
    RotateCounterClockwise,
}

impl Command {
    /// Map a DOM `KeyboardEvent.key` value. Left/right follow the arrows as
    /// drawn: `ArrowLeft` moves toward column 0.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Command::MoveLeft),
            "ArrowRight" => Some(Command::MoveRight),
            "ArrowDown" => Some(Command::SoftDrop),
            "ArrowUp" | "w" | "W" => Some(Command::RotateClockwise),
            "q" | "Q" => Some(Command::RotateCounterClockwise),
            " " => Some(Command::HardDrop),
            _ => None,
        }
    }

    /// Column delta for horizontal moves.
    pub fn direction(self) -> Option<i32> {
        match self {
            Command::MoveLeft => Some(-1),
            Command::MoveRight => Some(1),
            _ => None,
        }
    }

    pub fn rotation(self) -> Option<RotationDirection> {
        match self {
            Command::RotateClockwise => Some(RotationDirection::Clockwise),
            Command::RotateCounterClockwise => Some(RotationDirection::CounterClockwise),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(Command::from_key("ArrowLeft"), Some(Command::MoveLeft));
        assert_eq!(Command::from_key("ArrowRight"), Some(Command::MoveRight));
        assert_eq!(Command::from_key("ArrowDown"), Some(Command::SoftDrop));
        assert_eq!(Command::from_key("ArrowUp"), Some(Command::RotateClockwise));
        assert_eq!(Command::from_key("Enter"), None);
    }

    #[test]
    fn test_left_is_negative() {
        assert_eq!(Command::MoveLeft.direction(), Some(-1));
        assert_eq!(Command::MoveRight.direction(), Some(1));
        assert_eq!(Command::SoftDrop.direction(), None);
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            Command::from_key("q").and_then(Command::rotation),
            Some(RotationDirection::CounterClockwise)
        );
        assert_eq!(
            Command::from_key("W").and_then(Command::rotation),
            Some(RotationDirection::Clockwise)
        );
    }
}
