//! emputris-wasm - WebAssembly entry points and bindings for the browser page.
//!
//! The page keeps the canvas, the keydown listener and the
//! `requestAnimationFrame` loop. It forwards frames and keys here and draws
//! whatever `snapshot` returns.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::console;

use emputris_core::{
    color_of, create_piece_by_letter, Board, Command, Piece, Shape, COLORS,
};
use emputris_engine::{DropOutcome, Game, GameConfig, GameEvent};

pub const TICK_IDLE: u8 = 0;
pub const TICK_FELL: u8 = 1;
pub const TICK_LOCKED: u8 = 2;
pub const TICK_GAME_OVER: u8 = 3;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn log(msg: &str) {
    console::log_1(&JsValue::from_str(msg));
}

fn debug(msg: &str) {
    console::debug_1(&JsValue::from_str(msg));
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

#[derive(Serialize)]
pub struct JsSnapshot<'a> {
    pub board: &'a Board,
    pub piece: Piece,
    pub shape: &'a Shape,
    pub x: i32,
    pub y: i32,
    pub score: u32,
    pub lines: u32,
    pub paused: bool,
}

#[wasm_bindgen]
pub struct JsGame {
    inner: Game,
    last_timestamp: Option<f64>,
    game_over_pending: bool,
}

#[wasm_bindgen]
impl JsGame {
    /// 20x10 board, least-convenient pieces, seeded from `Math.random`.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<JsGame, JsError> {
        Self::start(GameConfig::default())
    }

    /// Build from a plain JS object with any subset of the `GameConfig`
    /// fields, e.g. `{ selector: "Uniform", scoring: { PerLine: 100 } }`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<JsGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Self::start(config)
    }

    /// Feed a `requestAnimationFrame` timestamp. The first frame only
    /// records the time.
    pub fn frame(&mut self, timestamp_ms: f64) -> u8 {
        let elapsed = self
            .last_timestamp
            .map_or(0.0, |last| timestamp_ms - last);
        self.last_timestamp = Some(timestamp_ms);
        self.tick(elapsed)
    }

    /// Advance by `elapsed_ms`. Returns one of the `TICK_*` codes.
    pub fn tick(&mut self, elapsed_ms: f64) -> u8 {
        let code = match self.inner.tick(elapsed_ms) {
            None => TICK_IDLE,
            Some(DropOutcome::Fell) => TICK_FELL,
            Some(DropOutcome::Locked {
                game_over: false, ..
            }) => TICK_LOCKED,
            Some(DropOutcome::Locked {
                game_over: true, ..
            }) => TICK_GAME_OVER,
        };
        self.flush_events();
        code
    }

    /// Handle a `KeyboardEvent.key`. `p` toggles pause. Returns whether the
    /// key changed anything.
    pub fn key(&mut self, key: &str) -> bool {
        if key == "p" || key == "P" {
            let paused = !self.inner.is_paused();
            self.inner.set_paused(paused);
            return true;
        }
        let handled = match Command::from_key(key) {
            Some(command) => self.inner.apply(command),
            None => false,
        };
        self.flush_events();
        handled
    }

    /// Numeric command: 0 left, 1 right, 2 soft drop, 3 hard drop,
    /// 4 rotate clockwise, 5 rotate counter-clockwise.
    pub fn command(&mut self, command: u8) -> Result<bool, JsError> {
        let command = command_from_u8(command)?;
        let handled = self.inner.apply(command);
        self.flush_events();
        Ok(handled)
    }

    #[wasm_bindgen(js_name = boardRows)]
    pub fn board_rows(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.inner.board())?)
    }

    /// Board, falling piece and counters in one object.
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        let state = self.inner.state();
        let snapshot = JsSnapshot {
            board: &state.board,
            piece: state.player.piece,
            shape: &state.player.shape,
            x: state.player.position.x,
            y: state.player.position.y,
            score: state.score,
            lines: state.lines_cleared,
            paused: self.inner.is_paused(),
        };
        Ok(serde_wasm_bindgen::to_value(&snapshot)?)
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.inner.score()
    }

    #[wasm_bindgen(getter)]
    pub fn lines(&self) -> u32 {
        self.inner.lines_cleared()
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> usize {
        self.inner.board().rows()
    }

    #[wasm_bindgen(getter)]
    pub fn columns(&self) -> usize {
        self.inner.board().columns()
    }

    #[wasm_bindgen(js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.inner.is_paused()
    }

    #[wasm_bindgen(js_name = setPaused)]
    pub fn set_paused(&mut self, paused: bool) {
        self.inner.set_paused(paused);
    }

    pub fn reset(&mut self) {
        self.inner.reset();
        self.last_timestamp = None;
        self.flush_events();
    }

    /// True once per game over; the page shows its alert and calls again next frame.
    #[wasm_bindgen(js_name = takeGameOver)]
    pub fn take_game_over(&mut self) -> bool {
        std::mem::take(&mut self.game_over_pending)
    }
}

impl JsGame {
    fn start(mut config: GameConfig) -> Result<JsGame, JsError> {
        if config.seed.is_none() {
            config.seed = Some(random_seed());
        }
        let mut game = JsGame {
            inner: Game::new(config)?,
            last_timestamp: None,
            game_over_pending: false,
        };
        game.flush_events();
        Ok(game)
    }

    fn flush_events(&mut self) {
        for event in self.inner.drain_events() {
            match event {
                GameEvent::GameOver {
                    score,
                    lines_cleared,
                } => {
                    log(&format!("Game Over (score {score}, lines {lines_cleared})"));
                    self.game_over_pending = true;
                }
                GameEvent::LinesCleared(lines) => {
                    log(&format!("cleared {lines} line(s), score {}", self.inner.score()));
                }
                GameEvent::PieceLocked(piece) => debug(&format!("locked {piece}")),
                GameEvent::PieceSpawned(piece) => debug(&format!("spawned {piece}")),
            }
        }
    }
}

/// Spawn grid for a piece letter. Unknown letters throw.
#[wasm_bindgen(js_name = createPiece)]
pub fn create_piece(letter: char) -> Result<JsValue, JsError> {
    let shape = create_piece_by_letter(letter)?;
    Ok(serde_wasm_bindgen::to_value(&shape)?)
}

/// The 8-entry color table; index 0 (empty) has no color.
#[wasm_bindgen]
pub fn palette() -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(&COLORS)?)
}

#[wasm_bindgen(js_name = colorOf)]
pub fn color_of_js(value: u8) -> Option<String> {
    color_of(value).map(str::to_string)
}

fn command_from_u8(value: u8) -> Result<Command, JsError> {
    match value {
        0 => Ok(Command::MoveLeft),
        1 => Ok(Command::MoveRight),
        2 => Ok(Command::SoftDrop),
        3 => Ok(Command::HardDrop),
        4 => Ok(Command::RotateClockwise),
        5 => Ok(Command::RotateCounterClockwise),
        _ => Err(JsError::new(&format!("unknown command {value}"))),
    }
}
