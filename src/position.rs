//! Go position representation and move execution.
//!
//! This module provides the concrete board the solver runs on:
//! - Board state in a 1D array with padding, sized at runtime
//! - Stone placement, capture detection and the simple ko rule
//! - Reversible move history (every move can be undone exactly)
//! - Eye detection used to prune candidate moves
//! - GTP coordinate parsing and text diagrams
//!
//! Colors are absolute (`Black`/`White`), and the color of each move is given
//! by the caller, so the same position can be searched for either side.

use std::fmt;

use crate::board::{BoardState, Color, Move, MoveError, Point, Stone, UndoError};
use crate::constants::{
    CHAR_BLACK, CHAR_EMPTY, CHAR_WHITE, COLUMN_LETTERS, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};

/// Error parsing a GTP coordinate such as `D4`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordError {
    #[error("invalid coordinate '{0}'")]
    Invalid(String),
    #[error("coordinate '{0}' is off the {1}x{1} board")]
    OffBoard(String, usize),
}

/// Error reading a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    #[error("unsupported board size {0}")]
    Size(usize),
    #[error("row {row} has {found} points, expected {expected}")]
    RowLength {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unexpected character '{0}' in diagram")]
    BadChar(char),
}

/// Everything needed to take one move back.
#[derive(Clone, Debug, PartialEq, Eq)]
struct HistoryEntry {
    mv: Move,
    color: Color,
    /// Opponent stones removed by the move.
    captured: Vec<Point>,
    ko_before: Option<Point>,
    to_play_before: Color,
}

/// A Go position (board state plus history).
///
/// The board is a 1D array with a border of padding cells. Rows have stride
/// `size + 1`: each row starts with one padding cell, which doubles as the
/// right-hand border of the previous row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    size: usize,
    cells: Vec<Stone>,
    to_play: Color,
    /// Point that may not be played on the next move.
    ko: Option<Point>,
    history: Vec<HistoryEntry>,
}

impl Position {
    /// Create an empty board.
    ///
    /// # Panics
    /// If `size` is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Self {
        assert!(
            (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size),
            "board size {size} out of range"
        );
        let stride = size + 1;
        let mut p = Position {
            size,
            cells: vec![Stone::Border; (size + 2) * stride + 1],
            to_play: Color::Black,
            ko: None,
            history: Vec::new(),
        };
        p.clear();
        p
    }

    /// Read a diagram: `X` black, `O` white, `.` empty, top row first.
    ///
    /// Rows are separated by newlines or `/`; whitespace inside a row is
    /// ignored, so the output of `Display` reads back unchanged. Stones are
    /// placed directly, with no history, and Black is to play.
    pub fn from_diagram(text: &str) -> Result<Self, DiagramError> {
        let rows: Vec<Vec<char>> = text
            .split(['\n', '/'])
            .map(|row| row.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let size = rows.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(DiagramError::Size(size));
        }

        let mut pos = Position::new(size);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(DiagramError::RowLength {
                    row: r + 1,
                    found: row.len(),
                    expected: size,
                });
            }
            for (c, &ch) in row.iter().enumerate() {
                let stone = match ch.to_ascii_uppercase() {
                    CHAR_BLACK => Stone::Black,
                    CHAR_WHITE => Stone::White,
                    CHAR_EMPTY | '+' => Stone::Empty,
                    other => return Err(DiagramError::BadChar(other)),
                };
                let pt = pos.index(r + 1, c + 1);
                pos.cells[pt] = stone;
            }
        }
        Ok(pos)
    }

    /// Reset to an empty board with Black to play.
    pub fn clear(&mut self) {
        self.cells.fill(Stone::Border);
        for row in 1..=self.size {
            for col in 1..=self.size {
                let pt = self.index(row, col);
                self.cells[pt] = Stone::Empty;
            }
        }
        self.to_play = Color::Black;
        self.ko = None;
        self.history.clear();
    }

    #[inline]
    fn stride(&self) -> usize {
        self.size + 1
    }

    /// Array index of a point, with 1-based row (from the top) and column.
    #[inline]
    fn index(&self, row: usize, col: usize) -> Point {
        row * self.stride() + col
    }

    pub fn to_play(&self) -> Color {
        self.to_play
    }

    /// Change the side to move without recording a move.
    pub fn set_to_play(&mut self, color: Color) {
        self.to_play = color;
    }

    pub fn ko(&self) -> Option<Point> {
        self.ko
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|h| h.mv)
    }

    /// Play a move for the side to move.
    pub fn play(&mut self, mv: Move) -> Result<(), MoveError> {
        let color = self.to_play;
        self.apply_move(mv, color)
    }

    /// Get the 4 orthogonal neighbors (N, E, S, W) of a point, borders included.
    #[inline]
    fn adjacent(&self, pt: Point) -> [Point; 4] {
        let s = self.stride();
        [pt - s, pt + 1, pt + s, pt - 1]
    }

    /// Get the 4 diagonal neighbors (NE, SE, SW, NW) of a point, borders included.
    #[inline]
    fn diagonal(&self, pt: Point) -> [Point; 4] {
        let s = self.stride();
        [pt + 1 - s, pt + s + 1, pt + s - 1, pt - s - 1]
    }

    #[inline]
    fn on_board(&self, pt: Point) -> bool {
        pt < self.cells.len() && self.cells[pt] != Stone::Border
    }

    /// Check if a point is "eyeish" (all on-board neighbors are one color).
    ///
    /// Returns the color of the surrounding stones. May be a false eye.
    pub fn is_eyeish(&self, pt: Point) -> Option<Color> {
        let mut eyecolor: Option<Color> = None;
        for n in self.adjacent(pt) {
            match self.cells[n] {
                Stone::Border => continue,
                Stone::Empty => return None,
                stone => {
                    let c = stone.color()?;
                    match eyecolor {
                        None => eyecolor = Some(c),
                        Some(e) if e != c => return None,
                        Some(_) => {}
                    }
                }
            }
        }
        eyecolor
    }

    /// Check if a point is a true eye.
    ///
    /// A true eye is eyeish and has at most one "bad" diagonal (an opponent
    /// stone) at the edge, and none in the center.
    pub fn eye_color(&self, pt: Point) -> Option<Color> {
        if self.cells.get(pt) != Some(&Stone::Empty) {
            return None;
        }
        let eyecolor = self.is_eyeish(pt)?;
        let falsecolor = Stone::from(eyecolor.opponent());
        let mut at_edge = false;
        let mut false_count = 0;

        for d in self.diagonal(pt) {
            if self.cells[d] == Stone::Border {
                at_edge = true;
            } else if self.cells[d] == falsecolor {
                false_count += 1;
            }
        }

        let tolerance = if at_edge { 1 } else { 0 };
        if false_count > tolerance {
            return None;
        }
        Some(eyecolor)
    }

    /// Whether `color` may play at `pt`, without touching the board.
    pub fn is_legal(&self, pt: Point, color: Color) -> bool {
        if !self.on_board(pt) || self.cells[pt] != Stone::Empty || self.ko == Some(pt) {
            return false;
        }
        let own = Stone::from(color);
        let opp = Stone::from(color.opponent());
        for n in self.adjacent(pt) {
            let c = self.cells[n];
            if c == Stone::Empty {
                return true;
            }
            // `pt` is one of the group's liberties: the group keeps another
            // one, or the opponent group loses its last.
            if c == own && self.group_liberties(n) > 1 {
                return true;
            }
            if c == opp && self.group_liberties(n) == 1 {
                return true;
            }
        }
        false
    }

    /// Collect all stones in a group starting from a point.
    ///
    /// Uses flood-fill to find all connected stones of the same color.
    /// Appends them to `out` and returns how many were added.
    fn collect_group(&self, start: Point, out: &mut Vec<Point>) -> usize {
        let color = self.cells[start];
        let mut stack = vec![start];
        let mut visited = vec![false; self.cells.len()];
        let mut count = 0;

        while let Some(pt) = stack.pop() {
            if visited[pt] {
                continue;
            }
            visited[pt] = true;

            if self.cells[pt] == color {
                out.push(pt);
                count += 1;
                for n in self.adjacent(pt) {
                    if !visited[n] && self.cells[n] == color {
                        stack.push(n);
                    }
                }
            }
        }
        count
    }

    /// Count the number of liberties (distinct empty adjacent points) of a group.
    pub fn group_liberties(&self, start: Point) -> usize {
        let color = self.cells[start];
        if color.color().is_none() {
            return 0;
        }
        let mut stack = vec![start];
        let mut visited = vec![false; self.cells.len()];
        let mut liberty_visited = vec![false; self.cells.len()];
        let mut libs = 0;

        while let Some(pt) = stack.pop() {
            if visited[pt] {
                continue;
            }
            visited[pt] = true;

            for n in self.adjacent(pt) {
                match self.cells[n] {
                    Stone::Empty => {
                        if !liberty_visited[n] {
                            liberty_visited[n] = true;
                            libs += 1;
                        }
                    }
                    c if c == color && !visited[n] => stack.push(n),
                    _ => {}
                }
            }
        }
        libs
    }

    /// Parse a coordinate string (e.g. `D4`, `pass`) against this board's size.
    ///
    /// Columns use letters A-T skipping I, rows count up from the bottom.
    pub fn parse_move(&self, s: &str) -> Result<Move, CoordError> {
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Move::Pass);
        }

        let mut chars = s.chars();
        let col_char = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .ok_or_else(|| CoordError::Invalid(s.to_string()))?;
        let col = COLUMN_LETTERS
            .iter()
            .position(|&b| b as char == col_char)
            .ok_or_else(|| CoordError::Invalid(s.to_string()))?;
        let row: usize = chars
            .as_str()
            .parse()
            .map_err(|_| CoordError::Invalid(s.to_string()))?;

        if col >= self.size || row == 0 || row > self.size {
            return Err(CoordError::OffBoard(s.to_string(), self.size));
        }
        Ok(Move::Play(self.index(self.size - row + 1, col + 1)))
    }

    /// Convert a point to a coordinate string (e.g. `D4`).
    pub fn format_point(&self, pt: Point) -> String {
        let row = pt / self.stride();
        let col = pt % self.stride();
        let letter = COLUMN_LETTERS[col - 1] as char;
        format!("{letter}{}", self.size + 1 - row)
    }

    /// Convert a move to a coordinate string; passes become `pass`.
    pub fn format_move(&self, mv: Move) -> String {
        match mv {
            Move::Pass => "pass".into(),
            Move::Play(pt) => self.format_point(pt),
        }
    }
}

impl BoardState for Position {
    fn size(&self) -> usize {
        self.size
    }

    fn points(&self) -> Vec<Point> {
        let mut pts = Vec::with_capacity(self.size * self.size);
        for row in 1..=self.size {
            for col in 1..=self.size {
                pts.push(self.index(row, col));
            }
        }
        pts
    }

    fn color_at(&self, pt: Point) -> Stone {
        self.cells.get(pt).copied().unwrap_or(Stone::Border)
    }

    fn neighbors(&self, pt: Point) -> Vec<Point> {
        self.adjacent(pt)
            .into_iter()
            .filter(|&n| self.cells[n] != Stone::Border)
            .collect()
    }

    fn legal_moves(&self, color: Color) -> Vec<Point> {
        self.points()
            .into_iter()
            .filter(|&pt| self.is_legal(pt, color))
            .collect()
    }

    fn is_eye(&self, pt: Point, color: Color) -> bool {
        self.eye_color(pt) == Some(color)
    }

    fn is_end_of_game(&self) -> bool {
        let n = self.history.len();
        n >= 2 && self.history[n - 1].mv.is_pass() && self.history[n - 2].mv.is_pass()
    }

    fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Play a move for `color`.
    ///
    /// Handles passes, legality checking, captures and the ko point. The side
    /// to move afterwards is the opponent of `color`. A rejected move leaves
    /// the position untouched.
    fn apply_move(&mut self, mv: Move, color: Color) -> Result<(), MoveError> {
        let ko_before = self.ko;
        let to_play_before = self.to_play;

        let pt = match mv {
            Move::Pass => {
                self.ko = None;
                self.to_play = color.opponent();
                self.history.push(HistoryEntry {
                    mv,
                    color,
                    captured: Vec::new(),
                    ko_before,
                    to_play_before,
                });
                return Ok(());
            }
            Move::Play(pt) => pt,
        };

        if !self.on_board(pt) {
            return Err(MoveError::OffBoard);
        }
        if self.cells[pt] != Stone::Empty {
            return Err(MoveError::Occupied);
        }
        if self.ko == Some(pt) {
            return Err(MoveError::Ko);
        }

        // Filling an opponent eye is the only way to start a ko
        let in_enemy_eye = self.is_eyeish(pt) == Some(color.opponent());

        self.cells[pt] = Stone::from(color);
        let opp = Stone::from(color.opponent());
        let mut captured = Vec::new();

        for n in self.adjacent(pt) {
            if self.cells[n] == opp && self.group_liberties(n) == 0 {
                let start = captured.len();
                self.collect_group(n, &mut captured);
                for &r in &captured[start..] {
                    self.cells[r] = Stone::Empty;
                }
            }
        }

        if captured.is_empty() && self.group_liberties(pt) == 0 {
            self.cells[pt] = Stone::Empty;
            return Err(MoveError::Suicide);
        }

        self.ko = if captured.len() == 1 && in_enemy_eye {
            Some(captured[0])
        } else {
            None
        };
        self.to_play = color.opponent();
        self.history.push(HistoryEntry {
            mv,
            color,
            captured,
            ko_before,
            to_play_before,
        });
        Ok(())
    }

    fn undo_move(&mut self) -> Result<Move, UndoError> {
        let entry = self.history.pop().ok_or(UndoError)?;
        if let Move::Play(pt) = entry.mv {
            self.cells[pt] = Stone::Empty;
            let restored = Stone::from(entry.color.opponent());
            for &c in &entry.captured {
                self.cells[c] = restored;
            }
        }
        self.ko = entry.ko_before;
        self.to_play = entry.to_play_before;
        Ok(entry.mv)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 1..=self.size {
            for col in 1..=self.size {
                let ch = match self.cells[self.index(row, col)] {
                    Stone::Black => CHAR_BLACK,
                    Stone::White => CHAR_WHITE,
                    _ => CHAR_EMPTY,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
