//! The game loop: gravity ticks, player commands, lock and respawn.
//!
//! Everything is driven from outside. A host calls [`Game::tick`] with the
//! time since its previous frame and [`Game::apply`] for each input, one call
//! at a time; every call leaves the state whole (a locked piece is always
//! replaced before the call returns).

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::apply::lock;
use crate::collision::collides;
use crate::config::{ConfigError, GameConfig};
use crate::gravity::DropTimer;
use crate::movement::{try_drop, try_move, try_rotate};
use crate::selector::PieceSelector;
use emputris_core::{ActivePiece, Board, Command, GameState, Piece, RotationDirection};

pub const DEFAULT_SEED: u64 = 0x0e3b_5eed;

/// Observable transitions, queued until the host drains them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PieceSpawned(Piece),
    PieceLocked(Piece),
    LinesCleared(u32),
    /// Counters as they were just before the reset.
    GameOver { score: u32, lines_cleared: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    Fell,
    Locked { lines_cleared: u32, game_over: bool },
}

pub struct Game {
    state: GameState,
    config: GameConfig,
    selector: Box<dyn PieceSelector>,
    rng: SmallRng,
    timer: DropTimer,
    events: Vec<GameEvent>,
    paused: bool,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let selector = config.selector.build()?;
        Self::with_selector(config, selector)
    }

    /// Use a selector that is not one of the [`crate::SelectorPolicy`] variants.
    /// `config.selector` is ignored.
    pub fn with_selector(
        config: GameConfig,
        mut selector: Box<dyn PieceSelector>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        let board = Board::new(config.rows, config.columns);
        let first = selector.select_next(&board, &mut rng);
        let mut game = Self {
            state: GameState::new(board, first),
            timer: DropTimer::new(config.drop_interval_ms),
            config,
            selector,
            rng,
            events: vec![GameEvent::PieceSpawned(first)],
            paused: false,
        };
        if game.spawn_collides() {
            game.game_over();
        }
        Ok(game)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for setting up positions. Keep the player in a
    /// non-colliding spot or the next lock writes over locked cells.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn player(&self) -> &ActivePiece {
        &self.state.player
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.state.lines_cleared
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advance the clock. Drops the piece one row when the interval is
    /// reached; does nothing while paused.
    pub fn tick(&mut self, elapsed_ms: f64) -> Option<DropOutcome> {
        if self.paused {
            return None;
        }
        self.timer
            .advance(elapsed_ms)
            .then(|| self.soft_drop())
    }

    /// Route a player command. False if paused or the move was rejected.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.paused {
            return false;
        }
        if let Some(dx) = command.direction() {
            return self.move_piece(dx);
        }
        if let Some(direction) = command.rotation() {
            return self.rotate(direction);
        }
        if command == Command::HardDrop {
            self.hard_drop();
        } else {
            self.soft_drop();
        }
        true
    }

    pub fn move_piece(&mut self, dx: i32) -> bool {
        match try_move(&self.state.board, &self.state.player, dx) {
            Some(position) => {
                self.state.player.position = position;
                true
            }
            None => false,
        }
    }

    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        match try_rotate(&self.state.board, &self.state.player, direction) {
            Some(shape) => {
                self.state.player.shape = shape;
                true
            }
            None => false,
        }
    }

    /// One row down, or lock + sweep + respawn when the row below is taken.
    /// Resets the drop timer either way.
    pub fn soft_drop(&mut self) -> DropOutcome {
        self.timer.reset();
        match try_drop(&self.state.board, &self.state.player) {
            Some(position) => {
                self.state.player.position = position;
                DropOutcome::Fell
            }
            None => self.lock_and_respawn(),
        }
    }

    /// Soft drops until the piece locks. Returns the rows fallen first.
    pub fn hard_drop(&mut self) -> (u32, DropOutcome) {
        let mut rows = 0;
        loop {
            match self.soft_drop() {
                DropOutcome::Fell => rows += 1,
                locked => return (rows, locked),
            }
        }
    }

    fn lock_and_respawn(&mut self) -> DropOutcome {
        let locked = self.state.player.piece;
        let lines_cleared = lock(&mut self.state.board, &self.state.player);
        self.state.pieces_placed = self.state.pieces_placed.saturating_add(1);
        self.events.push(GameEvent::PieceLocked(locked));

        if lines_cleared > 0 {
            self.state.lines_cleared = self.state.lines_cleared.saturating_add(lines_cleared);
            self.state.score = self
                .state
                .score
                .saturating_add(self.config.scoring.points(lines_cleared));
            self.events.push(GameEvent::LinesCleared(lines_cleared));
        }

        let game_over = !self.spawn_next();
        DropOutcome::Locked {
            lines_cleared,
            game_over,
        }
    }

    /// Ask the selector for the next piece and put it at the spawn point.
    /// If it already collides there the game is over: the board and the
    /// counters reset and play continues with that same piece. Returns
    /// false on game over.
    pub fn spawn_next(&mut self) -> bool {
        let piece = self.selector.select_next(&self.state.board, &mut self.rng);
        self.state.player = ActivePiece::spawn(piece, self.state.board.columns());
        self.events.push(GameEvent::PieceSpawned(piece));

        if self.spawn_collides() {
            self.game_over();
            return false;
        }
        true
    }

    fn spawn_collides(&self) -> bool {
        let player = &self.state.player;
        collides(&self.state.board, &player.shape, player.position)
    }

    fn game_over(&mut self) {
        self.events.push(GameEvent::GameOver {
            score: self.state.score,
            lines_cleared: self.state.lines_cleared,
        });
        self.state.board.clear();
        self.state.reset_counters();
        self.timer.reset();
    }

    /// Start over on an empty board, keeping config and selector.
    pub fn reset(&mut self) {
        self.state.board.clear();
        self.state.reset_counters();
        self.timer.reset();
        self.paused = false;
        self.spawn_next();
    }

    /// Take every event queued since the previous drain. The queue grows
    /// until drained.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorPolicy;
    use emputris_core::Position;

    fn game_with(pieces: Vec<Piece>) -> Game {
        let config = GameConfig::default().with_selector(SelectorPolicy::Sequence(pieces));
        Game::new(config).unwrap()
    }

    #[test]
    fn test_new_spawns_first_piece() {
        let mut game = game_with(vec![Piece::T]);
        assert_eq!(game.player().piece, Piece::T);
        assert_eq!(game.player().position, Position::new(4, 0));
        assert_eq!(game.drain_events(), vec![GameEvent::PieceSpawned(Piece::T)]);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            columns: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::new(config),
            Err(ConfigError::InvalidDimensions { .. })
        ));
        let empty = GameConfig::default().with_selector(SelectorPolicy::Sequence(vec![]));
        assert!(matches!(Game::new(empty), Err(ConfigError::EmptySequence)));
    }

    #[test]
    fn test_tick_drops_after_interval() {
        let mut game = game_with(vec![Piece::O]);
        assert_eq!(game.tick(500.0), None);
        assert_eq!(game.tick(499.0), None);
        assert_eq!(game.tick(1.0), Some(DropOutcome::Fell));
        assert_eq!(game.player().position.y, 1);
        // accumulator restarted
        assert_eq!(game.tick(999.0), None);
    }

    #[test]
    fn test_long_frame_drops_once() {
        let mut game = game_with(vec![Piece::O]);
        assert_eq!(game.tick(5000.0), Some(DropOutcome::Fell));
        assert_eq!(game.player().position.y, 1);
    }

    #[test]
    fn test_soft_drop_resets_timer() {
        let mut game = game_with(vec![Piece::O]);
        game.tick(900.0);
        game.soft_drop();
        assert_eq!(game.tick(900.0), None);
    }

    #[test]
    fn test_move_rejected_by_wall_keeps_position() {
        let mut game = game_with(vec![Piece::O]);
        for _ in 0..4 {
            assert!(game.move_piece(-1));
        }
        assert!(!game.move_piece(-1));
        assert_eq!(game.player().position, Position::new(0, 0));
    }

    #[test]
    fn test_rotate_rejected_keeps_shape() {
        let mut game = game_with(vec![Piece::I]);
        game.state_mut().player.position = Position::new(-1, 5);
        let before = game.player().shape.clone();
        assert!(!game.rotate(RotationDirection::Clockwise));
        assert_eq!(game.player().shape, before);
    }

    #[test]
    fn test_hard_drop_locks_and_respawns() {
        let mut game = game_with(vec![Piece::O, Piece::T]);
        game.drain_events();
        let (rows, outcome) = game.hard_drop();
        assert_eq!(rows, 18);
        assert_eq!(
            outcome,
            DropOutcome::Locked {
                lines_cleared: 0,
                game_over: false
            }
        );
        assert_eq!(game.board().get(4, 19), Piece::O.color_id());
        assert_eq!(game.player().piece, Piece::T);
        assert_eq!(game.state().pieces_placed, 1);
        assert_eq!(
            game.drain_events(),
            vec![
                GameEvent::PieceLocked(Piece::O),
                GameEvent::PieceSpawned(Piece::T)
            ]
        );
    }

    #[test]
    fn test_line_clear_scores() {
        let mut config =
            GameConfig::default().with_selector(SelectorPolicy::Sequence(vec![Piece::O]));
        config.scoring = crate::ScoringRule::PerLine(100);
        let mut game = Game::new(config).unwrap();
        for x in 0..10 {
            if x != 4 && x != 5 {
                game.state_mut().board.set(x, 18, 3);
                game.state_mut().board.set(x, 19, 3);
            }
        }
        let (_, outcome) = game.hard_drop();
        assert_eq!(
            outcome,
            DropOutcome::Locked {
                lines_cleared: 2,
                game_over: false
            }
        );
        assert_eq!(game.lines_cleared(), 2);
        assert_eq!(game.score(), 200);
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_paused_game_ignores_input_and_time() {
        let mut game = game_with(vec![Piece::O]);
        game.set_paused(true);
        assert_eq!(game.tick(10_000.0), None);
        assert!(!game.apply(Command::MoveLeft));
        assert_eq!(game.player().position, Position::new(4, 0));
        game.set_paused(false);
        assert!(game.apply(Command::MoveLeft));
    }

    #[test]
    fn test_apply_routes_commands() {
        let mut game = game_with(vec![Piece::T]);
        assert!(game.apply(Command::MoveRight));
        assert_eq!(game.player().position.x, 5);
        assert!(game.apply(Command::RotateCounterClockwise));
        assert_eq!(game.player().shape, Piece::T.shape().rotate_ccw());
        assert!(game.apply(Command::SoftDrop));
        assert_eq!(game.player().position.y, 1);
        assert!(game.apply(Command::RotateClockwise));
        assert_eq!(game.player().shape, Piece::T.shape());
        assert!(game.apply(Command::HardDrop));
        assert_eq!(game.state().pieces_placed, 1);
        assert_eq!(game.player().position, Position::new(4, 0));
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let mut config =
            GameConfig::default().with_selector(SelectorPolicy::Sequence(vec![Piece::O]));
        config.scoring = crate::ScoringRule::PerLine(u32::MAX);
        let mut game = Game::new(config).unwrap();
        game.state_mut().score = 1;
        for x in (0..10).filter(|&x| x != 4 && x != 5) {
            game.state_mut().board.set(x, 19, 3);
        }
        let (_, outcome) = game.hard_drop();
        assert_eq!(
            outcome,
            DropOutcome::Locked {
                lines_cleared: 1,
                game_over: false
            }
        );
        assert_eq!(game.score(), u32::MAX);
        assert_eq!(game.lines_cleared(), 1);
    }

    #[test]
    fn test_short_board_is_rejected_before_spawning() {
        let config = GameConfig {
            rows: 3,
            ..GameConfig::default()
        }
        .with_selector(SelectorPolicy::Sequence(vec![Piece::I]));
        assert!(matches!(
            Game::new(config),
            Err(ConfigError::BoardTooShort(3))
        ));
    }

    #[test]
    fn test_smallest_board_tops_out_cleanly() {
        let config = GameConfig {
            rows: 4,
            columns: 4,
            ..GameConfig::default()
        }
        .with_selector(SelectorPolicy::Sequence(vec![Piece::I]));
        let mut game = Game::new(config).unwrap();
        assert_eq!(game.player().position, Position::new(0, 0));

        // the vertical I fills the whole column on arrival
        let (rows, outcome) = game.hard_drop();
        assert_eq!(rows, 0);
        assert_eq!(
            outcome,
            DropOutcome::Locked {
                lines_cleared: 0,
                game_over: true
            }
        );
        assert!(game.board().is_empty());
        assert_eq!(
            game.soft_drop(),
            DropOutcome::Locked {
                lines_cleared: 0,
                game_over: true
            }
        );
    }

    #[test]
    fn test_first_spawn_on_blocked_board_is_game_over() {
        let mut game = game_with(vec![Piece::O]);
        game.drain_events();
        for x in 0..9 {
            game.state_mut().board.set(x, 1, 6);
        }
        assert!(game.spawn_collides());
        assert!(!game.spawn_next());
        assert!(game.board().is_empty());
        assert!(!game.spawn_collides());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut game = game_with(vec![Piece::O]);
        game.hard_drop();
        game.state_mut().score = 9;
        game.set_paused(true);
        game.reset();
        assert!(game.board().is_empty());
        assert_eq!(game.score(), 0);
        assert!(!game.is_paused());
        assert_eq!(game.player().position, Position::new(4, 0));
    }
}
