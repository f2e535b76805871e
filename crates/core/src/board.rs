//! board representation - row-major grid of cell values
//! row 0 is the top, row `rows - 1` the floor; dimensions are fixed at creation

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ColumnHeights;

/// Fixed-size grid of cell values. 0 is empty, 1..=7 a piece color id.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<u8>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Self::ROWS, Self::COLUMNS)
    }
}

impl Board {
    pub const ROWS: usize = 20;
    pub const COLUMNS: usize = 10;

    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![0; rows * columns],
        }
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.columns && (y as usize) < self.rows
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.columns + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.cells[y * self.columns + x] = value;
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.columns..(y + 1) * self.columns]
    }

    /// Rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(self.columns.max(1))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|&cell| cell != 0)
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y).iter().all(|&cell| cell == 0)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Remove every full row, bottom-up, dropping the rows above it and
    /// opening an empty row at the top. Returns how many rows went.
    ///
    /// After a removal the same index is examined again, since the row
    /// above has shifted into it.
    pub fn sweep(&mut self) -> u32 {
        let width = self.columns;
        let mut cleared = 0u32;
        let mut y = self.rows;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.cells.copy_within(0..row * width, width);
                self.cells[..width].fill(0);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Zero every cell. Dimensions stay.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub fn column_heights(&self) -> ColumnHeights {
        ColumnHeights::of(self)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rows: Vec<&[u8]> = self.iter_rows().collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows: Vec<Vec<u8>> = Vec::deserialize(deserializer)?;
        let columns = rows.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(serde::de::Error::custom("board needs at least one non-empty row"));
        }
        if rows.iter().any(|row| row.len() != columns) {
            return Err(serde::de::Error::custom("board rows must have equal length"));
        }
        Ok(Board {
            rows: rows.len(),
            columns,
            cells: rows.concat(),
        })
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.iter_rows() {
            for &cell in row {
                write!(f, "{}", if cell != 0 { "[]" } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
