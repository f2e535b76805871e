//! The falling piece: its current grid and where that grid sits on the board.

use serde::{Deserialize, Serialize};

use crate::{create_piece, Piece, Shape};

/// Offset of a shape's top-left cell within the board. `y` may be negative
/// while a piece is still partly above the visible rows.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ActivePiece {
    pub piece: Piece,
    pub shape: Shape,
    pub position: Position,
}

impl ActivePiece {
    /// Spawn position: top row, box centered on the board (integer halves).
    pub fn spawn(piece: Piece, columns: usize) -> Self {
        let shape = create_piece(piece);
        let x = (columns / 2) as i32 - (shape.width() / 2) as i32;
        Self {
            piece,
            shape,
            position: Position::new(x, 0),
        }
    }

    pub fn at(piece: Piece, position: Position) -> Self {
        Self {
            piece,
            shape: create_piece(piece),
            position,
        }
    }

    /// Occupied cells in board coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        let Position { x, y } = self.position;
        self.shape
            .cells()
            .map(move |(dx, dy, value)| (x + dx as i32, y + dy as i32, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_is_centered() {
        assert_eq!(ActivePiece::spawn(Piece::O, 10).position, Position::new(4, 0));
        assert_eq!(ActivePiece::spawn(Piece::T, 10).position, Position::new(4, 0));
        assert_eq!(ActivePiece::spawn(Piece::I, 10).position, Position::new(3, 0));
        assert_eq!(ActivePiece::spawn(Piece::I, 7).position, Position::new(1, 0));
    }

    #[test]
    fn test_cells_are_offset() {
        let active = ActivePiece::at(Piece::O, Position::new(2, 5));
        let mut cells: Vec<_> = active.cells().collect();
        cells.sort();
        assert_eq!(cells, vec![(2, 5, 2), (2, 6, 2), (3, 5, 2), (3, 6, 2)]);
    }
}
