//! Search controller for a game in progress.
//!
//! The controller runs one solve per query and turns the [`Outcome`] into a
//! report: the winning color and, when the asked color is the winner, the root
//! move that wins. It also keeps the reported winner stable between queries:
//! once a winner has been reported for a game, a later query that derives a
//! different winner reports the earliest one instead, without a move. The
//! history is cleared by [`Controller::reset`].
//!
//! ## Example
//!
//! ```
//! use go_solver::board::Color;
//! use go_solver::config::EngineConfig;
//! use go_solver::controller::{Controller, Verdict};
//! use go_solver::position::Position;
//!
//! let mut pos = Position::from_diagram(". O . / O X X / X X X").unwrap();
//! let mut controller = Controller::new(EngineConfig::default().with_komi(0.5));
//! let report = controller.query(&mut pos, Color::Black).unwrap();
//! assert_eq!(report.verdict, Verdict::Winner(Color::Black));
//! assert_eq!(report.mv.map(|m| pos.format_move(m)), Some("A3".to_string()));
//! ```

use std::fmt;

use log::{info, warn};

use crate::board::{BoardState, Color, Move, MoveError};
use crate::config::{EngineConfig, TimeLimit};
use crate::solver::{solve, GameResult, Outcome, SolveError};

/// What a query concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Winner(Color),
    Draw,
    /// The search did not finish in time.
    Unknown,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Winner(c) => write!(f, "{c}"),
            Verdict::Draw => write!(f, "draw"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// Verdict plus the move to play, if one is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    pub verdict: Verdict,
    pub mv: Option<Move>,
}

impl Report {
    fn unknown() -> Self {
        Report {
            verdict: Verdict::Unknown,
            mv: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Move(#[from] MoveError),
}

pub struct Controller {
    config: EngineConfig,
    /// Winners reported since the last reset, oldest first.
    reported: Vec<Color>,
    last_outcome: Option<Outcome>,
    rng: fastrand::Rng,
}

impl Controller {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            config,
            reported: Vec::new(),
            last_outcome: None,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Takes effect from the next query.
    pub fn set_time_limit(&mut self, limit: TimeLimit) {
        self.config.time_limit = limit;
    }

    /// Takes effect from the next query. Winners already reported still
    /// stand until [`Controller::reset`].
    pub fn set_komi(&mut self, komi: f64) {
        self.config.komi = komi;
    }

    /// Winners reported since the last reset, oldest first.
    pub fn reported_winners(&self) -> &[Color] {
        &self.reported
    }

    /// Outcome of the most recent completed solve, with its explored line.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Forget everything about the current game.
    pub fn reset(&mut self) {
        self.reported.clear();
        self.last_outcome = None;
    }

    /// Solve `board` for `color` and report the winner.
    ///
    /// A timeout is reported as [`Verdict::Unknown`]; only a corrupted board
    /// is an error.
    pub fn query<B: BoardState + ?Sized>(
        &mut self,
        board: &mut B,
        color: Color,
    ) -> Result<Report, SolveError> {
        self.last_outcome = None;
        let params = self.config.solve_params();

        let outcome = match solve(board, color, &params) {
            Ok(outcome) => outcome,
            Err(SolveError::Timeout) => {
                warn!(
                    "solve for {color} gave up after {}s",
                    self.config.time_limit.secs()
                );
                return Ok(Report::unknown());
            }
            Err(err) => return Err(err),
        };

        let mut report = match outcome.result {
            GameResult::Draw => Report {
                verdict: Verdict::Draw,
                mv: outcome.winning_move,
            },
            result => {
                let winner = result.winner().unwrap_or(color);
                let mv = if winner == color {
                    outcome.winning_move
                } else {
                    None
                };
                Report {
                    verdict: Verdict::Winner(winner),
                    mv,
                }
            }
        };

        if let Verdict::Winner(winner) = report.verdict {
            if let Some(&first) = self.reported.first() {
                if !self.reported.contains(&winner) {
                    warn!("solver now says {winner} wins, keeping earlier verdict {first}");
                    report = Report {
                        verdict: Verdict::Winner(first),
                        mv: None,
                    };
                }
            }
            if let Verdict::Winner(w) = report.verdict {
                self.reported.push(w);
            }
        }

        info!(
            "query {color}: {} ({} nodes)",
            report.verdict, outcome.nodes
        );
        self.last_outcome = Some(outcome);
        Ok(report)
    }

    /// Pick a move for `color` and play it on `board`.
    ///
    /// Plays the solver's winning move when `color` is reported as the
    /// winner; otherwise a random legal move that does not fill its own eye,
    /// or a pass when there is none.
    pub fn genmove<B: BoardState + ?Sized>(
        &mut self,
        board: &mut B,
        color: Color,
    ) -> Result<Move, EngineError> {
        let report = self.query(board, color)?;
        let mv = match (report.verdict, report.mv) {
            (Verdict::Winner(w), Some(mv)) if w == color => mv,
            _ => self.random_move(board, color),
        };
        board.apply_move(mv, color)?;
        Ok(mv)
    }

    fn random_move<B: BoardState + ?Sized>(&mut self, board: &B, color: Color) -> Move {
        let candidates: Vec<Move> = board
            .legal_moves(color)
            .into_iter()
            .filter(|&pt| !board.is_eye(pt, color))
            .map(Move::Play)
            .collect();
        if candidates.is_empty() {
            return Move::Pass;
        }
        candidates[self.rng.usize(..candidates.len())]
    }
}
