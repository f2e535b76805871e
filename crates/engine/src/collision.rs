//! collision detection - walls, floor, other blocks

use emputris_core::{Board, Position, Shape};

/// Does `shape` placed at `position` hit a wall, the floor, or a locked cell?
///
/// Cells above the top row (negative `y`) never collide, so a piece may spawn
/// partly outside the board.
#[inline]
pub fn collides(board: &Board, shape: &Shape, position: Position) -> bool {
    shape.cells().any(|(dx, dy, _)| {
        let x = position.x + dx as i32;
        let y = position.y + dy as i32;
        if x < 0 || x >= board.columns() as i32 || y >= board.rows() as i32 {
            return true;
        }
        y >= 0 && board.get(x as usize, y as usize) != 0
    })
}

/// can we place here? (just !collides)
pub fn can_place(board: &Board, shape: &Shape, position: Position) -> bool {
    !collides(board, shape, position)
}
