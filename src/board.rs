//! Stone colors, moves, and the board-state contract used by the solver.
//!
//! The scorer, the partitioner and the solver never touch a concrete board
//! type. They work through [`BoardState`], which [`crate::position::Position`]
//! implements.

use std::fmt;
use std::str::FromStr;

/// A point on the board, as an index into the board's cell array.
pub type Point = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

/// Short GTP form: `b` or `w`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "b"),
            Color::White => write!(f, "w"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}', expected b, w, black or white")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Color::Black),
            "w" | "white" => Ok(Color::White),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

/// Contents of a board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Black,
    White,
    /// Padding around the playable area.
    Border,
}

impl Stone {
    /// The color of the stone, or `None` for empty and border cells.
    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            Stone::Black => Some(Color::Black),
            Stone::White => Some(Color::White),
            Stone::Empty | Stone::Border => None,
        }
    }
}

impl From<Color> for Stone {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Stone::Black,
            Color::White => Stone::White,
        }
    }
}

/// A move: a stone placed on a point, or a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Pass,
    Play(Point),
}

impl Move {
    #[inline]
    pub fn is_pass(self) -> bool {
        matches!(self, Move::Pass)
    }
}

/// Reason a move could not be played.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("illegal move: point not on board")]
    OffBoard,
    #[error("illegal move: point not empty")]
    Occupied,
    #[error("illegal move: retakes ko")]
    Ko,
    #[error("illegal move: suicide")]
    Suicide,
}

/// Undo was requested with nothing to undo. Seeing this during a search means
/// the apply/undo pairing is broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot undo: move history is empty")]
pub struct UndoError;

/// Board operations the scorer and the solver rely on.
///
/// Implementations must make `undo_move` the exact inverse of a successful
/// `apply_move`, including the player to move and the history.
pub trait BoardState {
    /// Side length of the square board.
    fn size(&self) -> usize;

    /// All playable points in a fixed row-major order.
    fn points(&self) -> Vec<Point>;

    fn color_at(&self, pt: Point) -> Stone;

    /// The on-board orthogonal neighbours of `pt`.
    fn neighbors(&self, pt: Point) -> Vec<Point>;

    /// Legal stone placements for `color`, in the same order as `points`.
    fn legal_moves(&self, color: Color) -> Vec<Point>;

    /// Whether `pt` is a true single-point eye of `color`.
    fn is_eye(&self, pt: Point, color: Color) -> bool;

    fn is_end_of_game(&self) -> bool;

    /// Number of moves (passes included) played so far.
    fn move_count(&self) -> usize;

    fn apply_move(&mut self, mv: Move, color: Color) -> Result<(), MoveError>;

    /// Take back the last move and return it.
    fn undo_move(&mut self) -> Result<Move, UndoError>;
}
