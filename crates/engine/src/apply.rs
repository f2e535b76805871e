use emputris_core::{ActivePiece, Board};

/// Write the piece's cells into the board.
///
/// The position must already have passed [`crate::collides`]. Cells still
/// above the top row are dropped.
pub fn merge(board: &mut Board, player: &ActivePiece) {
    for (x, y, value) in player.cells() {
        if y < 0 {
            continue;
        }
        debug_assert!(
            board.in_bounds(x, y),
            "merging {} out of bounds at ({x}, {y})",
            player.piece
        );
        if board.in_bounds(x, y) {
            board.set(x as usize, y as usize, value);
        }
    }
}

/// Merge then sweep. Returns lines cleared.
pub fn lock(board: &mut Board, player: &ActivePiece) -> u32 {
    merge(board, player);
    board.sweep()
}
