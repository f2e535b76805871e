//! Next-piece policies. The game asks its selector for a piece each time the
//! previous one locks, passing the board as it stands after the sweep.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::collision::collides;
use crate::config::ConfigError;
use emputris_core::{ActivePiece, Board, Piece, Shape};

pub trait PieceSelector {
    fn select_next(&mut self, board: &Board, rng: &mut dyn RngCore) -> Piece;
}

fn uniform(rng: &mut dyn RngCore) -> Piece {
    Piece::ALL[rng.gen_range(0..Piece::ALL.len())]
}

/// Uniform over the seven pieces, board ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformSelector;

impl PieceSelector for UniformSelector {
    fn select_next(&mut self, _board: &Board, rng: &mut dyn RngCore) -> Piece {
        uniform(rng)
    }
}

/// "Least convenient" piece: find the shortest column and prefer pieces whose
/// spawn grid does not reach it. Falls back to uniform when every piece does.
#[derive(Clone, Copy, Debug, Default)]
pub struct GapOverlapSelector;

/// Crude footprint test in the shape's local columns: some occupied cell at
/// column `x` has `x <= gap <= x + width`. No drop is simulated.
pub fn can_fill_gap(shape: &Shape, gap: usize) -> bool {
    shape
        .cells()
        .any(|(x, _, _)| x <= gap && gap <= x + shape.width())
}

/// Pieces that cannot fill the shortest column, in catalog order.
pub fn hard_pieces(board: &Board) -> Vec<Piece> {
    let Some(gap) = board.column_heights().min_column() else {
        return Piece::ALL.to_vec();
    };
    Piece::ALL
        .into_iter()
        .filter(|piece| !can_fill_gap(&piece.shape(), gap))
        .collect()
}

impl PieceSelector for GapOverlapSelector {
    fn select_next(&mut self, board: &Board, rng: &mut dyn RngCore) -> Piece {
        match hard_pieces(board).choose(rng) {
            Some(&piece) => piece,
            None => uniform(rng),
        }
    }
}

/// Alternate adversary: the first piece (catalog order) that would lock right
/// after spawning, because one step down from spawn already collides.
/// Defaults to the first catalog piece.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateLockSelector;

impl PieceSelector for ImmediateLockSelector {
    fn select_next(&mut self, board: &Board, _rng: &mut dyn RngCore) -> Piece {
        Piece::ALL
            .into_iter()
            .find(|&piece| {
                let spawned = ActivePiece::spawn(piece, board.columns());
                collides(board, &spawned.shape, spawned.position.offset(0, 1))
            })
            .unwrap_or(Piece::ALL[0])
    }
}

/// Cycles through a fixed list. Deterministic games and replays.
#[derive(Clone, Debug)]
pub struct SequenceSelector {
    pieces: Vec<Piece>,
    index: usize,
}

impl SequenceSelector {
    pub fn new(pieces: Vec<Piece>) -> Result<Self, ConfigError> {
        if pieces.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        Ok(Self { pieces, index: 0 })
    }

    pub fn peek(&self) -> Piece {
        self.pieces[self.index % self.pieces.len()]
    }
}

impl PieceSelector for SequenceSelector {
    fn select_next(&mut self, _board: &Board, _rng: &mut dyn RngCore) -> Piece {
        let piece = self.peek();
        self.index += 1;
        piece
    }
}
