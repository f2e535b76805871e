//! Column height profile, recomputed on demand from a board

use crate::Board;

/// Stack height per column, measured from the floor to the topmost
/// occupied cell (0 for an empty column). Holes below the top cell do not
/// lower the height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnHeights {
    heights: Vec<usize>,
}

impl ColumnHeights {
    pub fn of(board: &Board) -> Self {
        let heights = (0..board.columns())
            .map(|x| Self::compute_height(board, x))
            .collect();
        Self { heights }
    }

    fn compute_height(board: &Board, x: usize) -> usize {
        (0..board.rows())
            .find(|&y| board.get(x, y) != 0)
            .map_or(0, |y| board.rows() - y)
    }

    #[inline(always)]
    pub fn height(&self, x: usize) -> usize {
        self.heights[x]
    }

    #[inline(always)]
    pub fn heights(&self) -> &[usize] {
        &self.heights
    }

    pub fn max_height(&self) -> usize {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Shortest column, first occurrence on ties. `None` only for a zero-width board.
    pub fn min_column(&self) -> Option<usize> {
        let min = self.heights.iter().copied().min()?;
        self.heights.iter().position(|&h| h == min)
    }
}
