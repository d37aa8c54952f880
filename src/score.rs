//! Area scoring with exclusively-surrounded territory.
//!
//! Each side scores its stones on the board plus every territory that borders
//! only its own stones. Regions touching both colors, or no stones at all,
//! score for nobody. Komi goes to White.

use std::fmt;

use crate::board::{BoardState, Color, Stone};
use crate::territory::partition;

/// Final score of a position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreResult {
    pub black: f64,
    pub white: f64,
}

impl ScoreResult {
    /// Signed margin, `black - white`.
    pub fn margin(&self) -> f64 {
        self.black - self.white
    }

    /// Total score of one side.
    pub fn of(&self, color: Color) -> f64 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// The side with the higher score, `None` on a tie.
    pub fn winner(&self) -> Option<Color> {
        let m = self.margin();
        if m > 0.0 {
            Some(Color::Black)
        } else if m < 0.0 {
            Some(Color::White)
        } else {
            None
        }
    }
}

/// `B+n`, `W+n` or `Draw`.
impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.margin();
        match self.winner() {
            Some(Color::Black) => write!(f, "B+{m}"),
            Some(Color::White) => write!(f, "W+{}", -m),
            None => write!(f, "Draw"),
        }
    }
}

/// Score `board` with the given komi.
pub fn score<B: BoardState + ?Sized>(board: &B, komi: f64) -> ScoreResult {
    let mut black = 0.0;
    let mut white = komi;

    for pt in board.points() {
        match board.color_at(pt) {
            Stone::Black => black += 1.0,
            Stone::White => white += 1.0,
            _ => {}
        }
    }

    for territory in partition(board) {
        match territory.owner() {
            Some(Color::Black) => black += territory.len() as f64,
            Some(Color::White) => white += territory.len() as f64,
            None => {}
        }
    }

    ScoreResult { black, white }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_empty_board_goes_to_komi() {
        let pos = Position::new(5);
        let result = score(&pos, 2.5);
        assert_eq!(result.black, 0.0);
        assert_eq!(result.white, 2.5);
        assert_eq!(result.margin(), -2.5);
        assert_eq!(result.to_string(), "W+2.5");
    }

    #[test]
    fn test_single_stone_owns_board() {
        let pos = Position::from_diagram(". . . / . X . / . . .").unwrap();
        let result = score(&pos, 0.5);
        assert_eq!(result.black, 9.0);
        assert_eq!(result.white, 0.5);
        assert_eq!(result.to_string(), "B+8.5");
    }

    #[test]
    fn test_dame_scores_for_nobody() {
        let pos = Position::from_diagram("X . O / X . O / X . O").unwrap();
        let result = score(&pos, 0.0);
        assert_eq!(result.black, 3.0);
        assert_eq!(result.white, 3.0);
        assert_eq!(result.winner(), None);
        assert_eq!(result.to_string(), "Draw");
    }

    #[test]
    fn test_score_is_idempotent() {
        let pos = Position::from_diagram(". X O . / X X O O / . X O . / X . O .").unwrap();
        let first = score(&pos, 6.5);
        let second = score(&pos, 6.5);
        assert_eq!(first, second);
        assert_eq!(first.of(Color::Black), 7.0);
        assert_eq!(first.of(Color::White), 8.0 + 6.5);
    }
}
