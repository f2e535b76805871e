//! Move, rotate and drop attempts. Each returns the accepted placement, or
//! `None` when it would collide; callers keep the old state on `None`.

use crate::collision::can_place;
use emputris_core::{ActivePiece, Board, Position, RotationDirection, Shape};

/// Try to move the piece horizontally by `dx` columns.
pub fn try_move(board: &Board, player: &ActivePiece, dx: i32) -> Option<Position> {
    let moved = player.position.offset(dx, 0);
    can_place(board, &player.shape, moved).then_some(moved)
}

/// Try to rotate in place. No kicks: a rotation that collides at the current
/// position is rejected even if a shifted one would fit.
pub fn try_rotate(
    board: &Board,
    player: &ActivePiece,
    direction: RotationDirection,
) -> Option<Shape> {
    let rotated = player.shape.rotate(direction);
    can_place(board, &rotated, player.position).then_some(rotated)
}

/// Try to move the piece one row down.
pub fn try_drop(board: &Board, player: &ActivePiece) -> Option<Position> {
    let dropped = player.position.offset(0, 1);
    can_place(board, &player.shape, dropped).then_some(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emputris_core::Piece;

    #[test]
    fn test_move_left() {
        let board = Board::default();
        let player = ActivePiece::spawn(Piece::T, board.columns());
        assert_eq!(try_move(&board, &player, -1), Some(Position::new(3, 0)));
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let board = Board::default();
        let player = ActivePiece::at(Piece::O, Position::new(0, 5));
        assert_eq!(try_move(&board, &player, -1), None);
    }

    #[test]
    fn test_move_blocked_by_stack() {
        let mut board = Board::default();
        board.set(3, 6, 4);
        let player = ActivePiece::at(Piece::O, Position::new(4, 5));
        assert_eq!(try_move(&board, &player, -1), None);
        assert_eq!(try_move(&board, &player, 1), Some(Position::new(5, 5)));
    }

    #[test]
    fn test_simple_rotation() {
        let board = Board::default();
        let player = ActivePiece::at(Piece::T, Position::new(4, 5));
        let rotated = try_rotate(&board, &player, RotationDirection::Clockwise);
        assert_eq!(rotated, Some(player.shape.rotate_cw()));
    }

    #[test]
    fn test_rotation_against_wall_is_rejected() {
        // vertical I hugging the left wall: the horizontal bar would poke out
        let board = Board::default();
        let player = ActivePiece::at(Piece::I, Position::new(-1, 5));
        assert_eq!(try_rotate(&board, &player, RotationDirection::Clockwise), None);
        assert_eq!(
            try_rotate(&board, &player, RotationDirection::CounterClockwise),
            None
        );
    }

    #[test]
    fn test_drop_until_floor() {
        let board = Board::default();
        let mut player = ActivePiece::spawn(Piece::O, board.columns());
        let mut steps = 0;
        while let Some(next) = try_drop(&board, &player) {
            player.position = next;
            steps += 1;
        }
        assert_eq!(steps, 18);
        assert_eq!(player.position, Position::new(4, 18));
    }
}
