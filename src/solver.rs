//! Exact game-tree solver (boolean negamax).
//!
//! The solver answers one question: can the side to move force a win? It
//! searches every legal continuation depth-first, applying and undoing moves
//! on the caller's board, and stops at the first winning move of each node.
//!
//! - Terminal positions are scored with [`crate::score::score`]. The mover
//!   wins when its total, komi included, is strictly more than half the
//!   board's points; exactly half goes to the draw winner of the current
//!   solve. Both sides can lose the same position when there is dame.
//! - Candidates are the mover's legal moves minus its own true eyes. With no
//!   candidate the mover passes. When neither side has one, the position is
//!   terminal.
//! - The time budget is polled on entry to every node. Running out unwinds
//!   the whole search with [`SolveError::Timeout`]; a partial search never
//!   produces a verdict.

use std::time::{Duration, Instant};

use log::debug;

use crate::board::{BoardState, Color, Move, UndoError};
use crate::constants::max_game_len;
use crate::score::score;

/// Reason a solve produced no verdict.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("search ran out of time")]
    Timeout,
    #[error("board corrupted during search: {0}")]
    Corrupted(#[from] UndoError),
}

/// Result of a solve, from the point of view of the color that was asked about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Win(Color),
    Loss(Color),
    Draw,
}

impl GameResult {
    /// The winning color, `None` for a draw.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Win(c) => Some(c),
            GameResult::Loss(c) => Some(c.opponent()),
            GameResult::Draw => None,
        }
    }
}

/// Settings of one solve call. Fixed for the whole search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveParams {
    pub komi: f64,
    /// Color credited with the win when a terminal position is an exact tie.
    pub draw_winner: Color,
    pub time_limit: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub result: GameResult,
    /// Root move that wins (or, for a draw, secures the draw).
    pub winning_move: Option<Move>,
    /// Last root move explored when every move loses.
    pub best_reply: Option<Move>,
    /// The line the verdict rests on, root move first.
    pub line: Vec<(Color, Move)>,
    /// Nodes visited.
    pub nodes: u64,
}

/// Solve the position on `board` with `color` to move.
///
/// The board is borrowed mutably for the whole search and is restored to its
/// exact starting state before this returns, whatever the result.
pub fn solve<B: BoardState + ?Sized>(
    board: &mut B,
    color: Color,
    params: &SolveParams,
) -> Result<Outcome, SolveError> {
    Search::new(board, params, params.draw_winner, Instant::now()).run(color)
}

/// Solve with draws told apart from wins and losses.
///
/// First pass: ties count for the opponent, so a win is a real win. Second
/// pass: ties count for `color`, so a win there is at best a draw. Both passes
/// share one time budget; `params.draw_winner` is ignored.
pub fn solve_exact<B: BoardState + ?Sized>(
    board: &mut B,
    color: Color,
    params: &SolveParams,
) -> Result<Outcome, SolveError> {
    let start = Instant::now();
    let first = Search::new(board, params, color.opponent(), start).run(color)?;
    if first.result == GameResult::Win(color) {
        return Ok(first);
    }

    let mut second = Search::new(board, params, color, start).run(color)?;
    second.nodes += first.nodes;
    if second.result == GameResult::Win(color) {
        second.result = GameResult::Draw;
    }
    Ok(second)
}

/// Result of searching one node.
struct Frame {
    win: bool,
    /// Winning move, or the last move tried when the node is lost.
    mv: Option<Move>,
    /// Moves from this node down, deepest first.
    line: Vec<(Color, Move)>,
}

impl Frame {
    fn leaf(win: bool) -> Self {
        Frame {
            win,
            mv: None,
            line: Vec::new(),
        }
    }
}

struct Search<'a, B: ?Sized> {
    board: &'a mut B,
    komi: f64,
    draw_winner: Color,
    start: Instant,
    time_limit: Duration,
    /// Move count of the board when the search started.
    root_moves: usize,
    max_depth: usize,
    nodes: u64,
}

impl<'a, B: BoardState + ?Sized> Search<'a, B> {
    fn new(board: &'a mut B, params: &SolveParams, draw_winner: Color, start: Instant) -> Self {
        let max_depth = max_game_len(board.size());
        let root_moves = board.move_count();
        Search {
            board,
            komi: params.komi,
            draw_winner,
            start,
            time_limit: params.time_limit,
            root_moves,
            max_depth,
            nodes: 0,
        }
    }

    fn run(mut self, color: Color) -> Result<Outcome, SolveError> {
        let frame = match self.negamax(color) {
            Ok(frame) => frame,
            Err(err) => {
                debug!("solve for {color} aborted after {} nodes: {err}", self.nodes);
                return Err(err);
            }
        };

        let mut line = frame.line;
        line.reverse();
        let (result, winning_move, best_reply) = if frame.win {
            (GameResult::Win(color), frame.mv, None)
        } else {
            (GameResult::Loss(color), None, frame.mv)
        };
        debug!(
            "solved for {color}: {result:?} in {} nodes, {:?}",
            self.nodes,
            self.start.elapsed()
        );

        Ok(Outcome {
            result,
            winning_move,
            best_reply,
            line,
            nodes: self.nodes,
        })
    }

    /// Whether `color`, to move, wins the current position.
    fn negamax(&mut self, color: Color) -> Result<Frame, SolveError> {
        if self.start.elapsed() >= self.time_limit {
            return Err(SolveError::Timeout);
        }
        self.nodes += 1;

        let depth = self.board.move_count().saturating_sub(self.root_moves);
        if self.board.is_end_of_game() || depth >= self.max_depth {
            return Ok(Frame::leaf(self.evaluate(color)));
        }

        let mut candidates = self.candidates(color);
        if candidates.is_empty() {
            if self.candidates(color.opponent()).is_empty() {
                return Ok(Frame::leaf(self.evaluate(color)));
            }
            candidates.push(Move::Pass);
        }

        let mut last: Option<(Move, Vec<(Color, Move)>)> = None;
        for mv in candidates {
            if let Err(err) = self.board.apply_move(mv, color) {
                debug!("skipping candidate {mv:?} for {color}: {err}");
                continue;
            }
            let reply = self.negamax(color.opponent());
            // Undo before looking at the reply so a timeout still unwinds cleanly
            self.board.undo_move()?;
            let reply = reply?;

            if !reply.win {
                let mut line = reply.line;
                line.push((color, mv));
                return Ok(Frame {
                    win: true,
                    mv: Some(mv),
                    line,
                });
            }
            last = Some((mv, reply.line));
        }

        match last {
            Some((mv, mut line)) => {
                line.push((color, mv));
                Ok(Frame {
                    win: false,
                    mv: Some(mv),
                    line,
                })
            }
            None => Ok(Frame::leaf(self.evaluate(color))),
        }
    }

    /// Legal moves for `color` that do not fill its own eyes, in board order.
    fn candidates(&self, color: Color) -> Vec<Move> {
        self.board
            .legal_moves(color)
            .into_iter()
            .filter(|&pt| !self.board.is_eye(pt, color))
            .map(Move::Play)
            .collect()
    }

    /// Score a finished position for the mover.
    fn evaluate(&self, color: Color) -> bool {
        let result = score(&*self.board, self.komi);
        let mine = result.of(color);
        let size = self.board.size();
        let half = (size * size) as f64 / 2.0;
        if mine > half {
            true
        } else if mine < half {
            false
        } else {
            color == self.draw_winner
        }
    }
}
