use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gravity::DEFAULT_DROP_INTERVAL_MS;
use crate::scoring::ScoringRule;
use crate::selector::{
    GapOverlapSelector, ImmediateLockSelector, PieceSelector, SequenceSelector, UniformSelector,
};
use emputris_core::{Board, Piece};

/// Narrowest board the horizontal I bar fits on.
pub const MIN_COLUMNS: usize = 4;
/// Shortest board the vertical I spawn grid fits on.
pub const MIN_ROWS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("board needs at least 4 columns, got {0}")]
    BoardTooNarrow(usize),
    #[error("board needs at least 4 rows, got {0}")]
    BoardTooShort(usize),
    #[error("drop interval must be non-zero")]
    ZeroDropInterval,
    #[error("sequence selector needs at least one piece")]
    EmptySequence,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectorPolicy {
    Uniform,
    /// Gap-overlap adversary.
    #[default]
    LeastConvenient,
    ImmediateLock,
    Sequence(Vec<Piece>),
}

impl SelectorPolicy {
    pub fn build(&self) -> Result<Box<dyn PieceSelector>, ConfigError> {
        let selector: Box<dyn PieceSelector> = match self {
            SelectorPolicy::Uniform => Box::new(UniformSelector),
            SelectorPolicy::LeastConvenient => Box::new(GapOverlapSelector),
            SelectorPolicy::ImmediateLock => Box::new(ImmediateLockSelector),
            SelectorPolicy::Sequence(pieces) => Box::new(SequenceSelector::new(pieces.clone())?),
        };
        Ok(selector)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub drop_interval_ms: u32,
    pub selector: SelectorPolicy,
    pub scoring: ScoringRule,
    /// Fixed seed for reproducible games; `None` uses [`crate::game::DEFAULT_SEED`].
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Uniform pieces, doubling score.
    pub fn classic() -> Self {
        Self {
            selector: SelectorPolicy::Uniform,
            scoring: ScoringRule::Doubling,
            ..Self::least_convenient()
        }
    }

    /// Adversarial pieces, one point per cleared line.
    pub fn least_convenient() -> Self {
        Self {
            rows: Board::ROWS,
            columns: Board::COLUMNS,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            selector: SelectorPolicy::LeastConvenient,
            scoring: ScoringRule::LineCount,
            seed: None,
        }
    }

    pub fn with_selector(mut self, selector: SelectorPolicy) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.columns < MIN_COLUMNS {
            return Err(ConfigError::BoardTooNarrow(self.columns));
        }
        if self.rows < MIN_ROWS {
            return Err(ConfigError::BoardTooShort(self.rows));
        }
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        if matches!(&self.selector, SelectorPolicy::Sequence(p) if p.is_empty()) {
            return Err(ConfigError::EmptySequence);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::least_convenient()
    }
}
