//! Go-Solver: an exact endgame solver and territory scorer for small Go boards.
//!
//! This crate decides positions under perfect play with a time-bounded
//! boolean negamax search, and scores boards by area with territory awarded
//! only to regions surrounded by a single color.
//!
//! ## Modules
//!
//! - [`constants`] - Board size bounds and engine defaults
//! - [`board`] - Colors, moves and the [`board::BoardState`] contract
//! - [`position`] - Concrete Go board with captures, ko and undo
//! - [`territory`] - Partition of empty points into territories
//! - [`score`] - Area scoring with komi
//! - [`safety`] - Unconditionally alive stones (Benson's algorithm)
//! - [`solver`] - Exact negamax search with a time budget
//! - [`controller`] - Repeated queries for a game in progress
//! - [`config`] - Validated engine settings
//!
//! ## Example
//!
//! ```
//! use go_solver::board::Color;
//! use go_solver::position::Position;
//! use go_solver::score::score;
//! use go_solver::solver::{solve, GameResult, SolveParams};
//! use std::time::Duration;
//!
//! // Black to play can capture at A3 and take the whole board
//! let mut pos = Position::from_diagram(". O . / O X X / X X X").unwrap();
//! let params = SolveParams {
//!     komi: 0.5,
//!     draw_winner: Color::White,
//!     time_limit: Duration::from_secs(5),
//! };
//! let outcome = solve(&mut pos, Color::Black, &params).unwrap();
//! assert_eq!(outcome.result, GameResult::Win(Color::Black));
//! println!("Winning move: {}", pos.format_move(outcome.winning_move.unwrap()));
//!
//! println!("Score now: {}", score(&pos, 0.5));
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod controller;
pub mod position;
pub mod safety;
pub mod score;
pub mod solver;
pub mod territory;
