//! emputris core crate - fundamental types for the falling-block game.

mod active;
mod board;
mod board_heights;
mod command;
mod palette;
mod piece;
mod state;

pub use active::{ActivePiece, Position};
pub use board::Board;
pub use board_heights::ColumnHeights;
pub use command::Command;
pub use palette::{color_of, COLORS};
pub use piece::{create_piece, create_piece_by_letter, Piece, PieceError, RotationDirection, Shape};
pub use state::GameState;
