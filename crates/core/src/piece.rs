//! Piece catalog and shape grids for the seven tetrominoes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum PieceError {
    #[error("unknown piece letter {0:?}, expected one of IOTSZJL")]
    UnknownLetter(char),
    #[error("unknown piece color id {0}, expected 1..=7")]
    UnknownId(u8),
    #[error("shape rows must be non-empty and of equal length")]
    MalformedShape,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum RotationDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Piece {
    /// Catalog order. Selectors that need a deterministic tie-break walk this.
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
    ];

    pub fn from_letter(letter: char) -> Result<Self, PieceError> {
        match letter.to_ascii_uppercase() {
            'I' => Ok(Piece::I),
            'O' => Ok(Piece::O),
            'T' => Ok(Piece::T),
            'S' => Ok(Piece::S),
            'Z' => Ok(Piece::Z),
            'J' => Ok(Piece::J),
            'L' => Ok(Piece::L),
            _ => Err(PieceError::UnknownLetter(letter)),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Piece::I => 'I',
            Piece::O => 'O',
            Piece::T => 'T',
            Piece::S => 'S',
            Piece::Z => 'Z',
            Piece::J => 'J',
            Piece::L => 'L',
        }
    }

    /// Cell value written into every occupied cell of this piece.
    /// Doubles as the index into [`crate::COLORS`].
    pub fn color_id(self) -> u8 {
        match self {
            Piece::T => 1,
            Piece::O => 2,
            Piece::L => 3,
            Piece::J => 4,
            Piece::I => 5,
            Piece::S => 6,
            Piece::Z => 7,
        }
    }

    /// Default (unrotated) orientation.
    pub fn shape(self) -> Shape {
        create_piece(self)
    }
}

impl TryFrom<char> for Piece {
    type Error = PieceError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Piece::from_letter(letter)
    }
}

impl TryFrom<u8> for Piece {
    type Error = PieceError;

    fn try_from(color_id: u8) -> Result<Self, Self::Error> {
        Piece::ALL
            .into_iter()
            .find(|piece| piece.color_id() == color_id)
            .ok_or(PieceError::UnknownId(color_id))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Build the spawn-orientation grid for a piece. Pure: equal inputs give equal grids.
pub fn create_piece(piece: Piece) -> Shape {
    let rows: &[&[u8]] = match piece {
        Piece::T => &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
        Piece::O => &[&[2, 2], &[2, 2]],
        Piece::L => &[&[0, 3, 0], &[0, 3, 0], &[0, 3, 3]],
        Piece::J => &[&[0, 4, 0], &[0, 4, 0], &[4, 4, 0]],
        Piece::I => &[&[0, 5, 0, 0], &[0, 5, 0, 0], &[0, 5, 0, 0], &[0, 5, 0, 0]],
        Piece::S => &[&[0, 6, 6], &[6, 6, 0], &[0, 0, 0]],
        Piece::Z => &[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]],
    };
    Shape::from_fixed_rows(rows)
}

pub fn create_piece_by_letter(letter: char) -> Result<Shape, PieceError> {
    Piece::from_letter(letter).map(create_piece)
}

/// Bounding-box grid of cell values. 0 is not part of the piece.
/// Rotation returns a new grid; a `Shape` is never rotated in place.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Shape {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Shape {
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, PieceError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(PieceError::MalformedShape);
        }
        Ok(Self {
            width,
            height: rows.len(),
            cells: rows.concat(),
        })
    }

    // Catalog grids are square literals, so no validation is needed.
    fn from_fixed_rows(rows: &[&[u8]]) -> Self {
        Self {
            width: rows[0].len(),
            height: rows.len(),
            cells: rows.concat(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at local column `x`, row `y` (row 0 is the top of the box).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.width + x]
    }

    /// Occupied cells as `(x, y, value)` in local coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(move |(i, &value)| (i % self.width, i / self.width, value))
    }

    /// 90° clockwise: `[r][c]` lands on `[c][height - 1 - r]` of the transposed box.
    pub fn rotate_cw(&self) -> Shape {
        let (w, h) = (self.height, self.width);
        let mut cells = vec![0; self.cells.len()];
        for r in 0..self.height {
            for c in 0..self.width {
                cells[c * w + (self.height - 1 - r)] = self.get(c, r);
            }
        }
        Shape {
            width: w,
            height: h,
            cells,
        }
    }

    pub fn rotate_ccw(&self) -> Shape {
        let (w, h) = (self.height, self.width);
        let mut cells = vec![0; self.cells.len()];
        for r in 0..self.height {
            for c in 0..self.width {
                cells[(self.width - 1 - c) * w + r] = self.get(c, r);
            }
        }
        Shape {
            width: w,
            height: h,
            cells,
        }
    }

    pub fn rotate(&self, direction: RotationDirection) -> Shape {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.width).map(<[u8]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = PieceError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Shape::from_rows(&rows)
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(shape: Shape) -> Self {
        shape.to_rows()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", if self.get(x, y) != 0 { "[]" } else { " ." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
