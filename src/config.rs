//! Engine settings: board size, komi, time limit and draw policy.
//!
//! Values are validated here, before they reach the solver, so the core can
//! assume a sane configuration.

use std::time::Duration;

use crate::board::Color;
use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_KOMI, DEFAULT_TIME_LIMIT_SECS, MAX_BOARD_SIZE,
    MAX_TIME_LIMIT_SECS, MIN_BOARD_SIZE, MIN_TIME_LIMIT_SECS,
};
use crate::solver::SolveParams;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("time limit {secs}s is out of range ({min}..={max})")]
    TimeLimitOutOfRange { secs: u64, min: u64, max: u64 },
    #[error("board size {size} is out of range ({min}..={max})")]
    BoardSizeOutOfRange { size: usize, min: usize, max: usize },
}

/// Search time limit in whole seconds, within the accepted range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeLimit(u64);

impl TimeLimit {
    pub fn new(secs: u64) -> Result<Self, ConfigError> {
        if !(MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS).contains(&secs) {
            return Err(ConfigError::TimeLimitOutOfRange {
                secs,
                min: MIN_TIME_LIMIT_SECS,
                max: MAX_TIME_LIMIT_SECS,
            });
        }
        Ok(TimeLimit(secs))
    }

    pub fn secs(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for TimeLimit {
    fn default() -> Self {
        TimeLimit(DEFAULT_TIME_LIMIT_SECS)
    }
}

impl TryFrom<u64> for TimeLimit {
    type Error = ConfigError;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        TimeLimit::new(secs)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub board_size: usize,
    pub komi: f64,
    pub time_limit: TimeLimit,
    /// Color credited with drawn terminal positions during a solve.
    pub draw_winner: Color,
    /// Seed for the fallback move choice; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            komi: DEFAULT_KOMI,
            time_limit: TimeLimit::default(),
            draw_winner: Color::White,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_board_size(mut self, size: usize) -> Result<Self, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ConfigError::BoardSizeOutOfRange {
                size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        self.board_size = size;
        Ok(self)
    }

    pub fn with_time_limit(mut self, secs: u64) -> Result<Self, ConfigError> {
        self.time_limit = TimeLimit::new(secs)?;
        Ok(self)
    }

    pub fn with_komi(mut self, komi: f64) -> Self {
        self.komi = komi;
        self
    }

    pub fn with_draw_winner(mut self, color: Color) -> Self {
        self.draw_winner = color;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn solve_params(&self) -> SolveParams {
        SolveParams {
            komi: self.komi,
            draw_winner: self.draw_winner,
            time_limit: self.time_limit.as_duration(),
        }
    }
}
