//! emputris-engine - rules and game loop for the falling-block game.
//!
//! Provides collision, merge, rollback movement, next-piece selectors and the
//! tick-driven [`Game`].

pub mod apply;
pub mod collision;
pub mod config;
pub mod game;
pub mod gravity;
pub mod movement;
pub mod scoring;
pub mod selector;

pub use apply::{lock, merge};
pub use collision::{can_place, collides};
pub use config::{ConfigError, GameConfig, SelectorPolicy};
pub use game::{DropOutcome, Game, GameEvent};
pub use gravity::DropTimer;
pub use movement::{try_drop, try_move, try_rotate};
pub use scoring::ScoringRule;
pub use selector::{
    can_fill_gap, hard_pieces, GapOverlapSelector, ImmediateLockSelector, PieceSelector,
    SequenceSelector, UniformSelector,
};
