//! Game state representation.

use crate::{ActivePiece, Board, Piece};
use serde::{Deserialize, Serialize};

/// Everything a frame needs: the locked cells, the falling piece and the
/// counters. `score` and `lines_cleared` only ever change together with a
/// sweep or a game-over reset.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub player: ActivePiece,
    pub score: u32,
    pub lines_cleared: u32,
    pub pieces_placed: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Board::default(), Piece::ALL[0])
    }
}

impl GameState {
    /// Fresh counters, with `first` spawned on `board`.
    pub fn new(board: Board, first: Piece) -> Self {
        let player = ActivePiece::spawn(first, board.columns());
        Self {
            board,
            player,
            score: 0,
            lines_cleared: 0,
            pieces_placed: 0,
        }
    }

    pub fn reset_counters(&mut self) {
        self.score = 0;
        self.lines_cleared = 0;
        self.pieces_placed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let s = GameState::default();
        assert_eq!(s.score, 0);
        assert_eq!(s.lines_cleared, 0);
        assert!(s.board.is_empty());
        assert_eq!(s.player.piece, Piece::I);
    }

    #[test]
    fn test_clone_equality() {
        let s1 = GameState::new(Board::new(8, 6), Piece::T);
        let s2 = s1.clone();
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_reset_counters() {
        let mut s = GameState::default();
        s.score = 40;
        s.lines_cleared = 4;
        s.pieces_placed = 12;
        s.reset_counters();
        assert_eq!((s.score, s.lines_cleared, s.pieces_placed), (0, 0, 0));
    }
}
