//! Integration tests for go-solver
//!
//! These exercise the public API end to end: positions built from diagrams
//! and move lists, scored, partitioned and solved, with the board checked to
//! be intact after every search.

use std::collections::HashSet;
use std::time::Duration;

use go_solver::board::{BoardState, Color, Move, Point, Stone};
use go_solver::config::EngineConfig;
use go_solver::controller::{Controller, Verdict};
use go_solver::position::Position;
use go_solver::safety::find_safety;
use go_solver::score::score;
use go_solver::solver::{GameResult, SolveError, SolveParams, solve, solve_exact};
use go_solver::territory::partition;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Play a sequence of moves, alternating Black and White from Black.
/// "pass" can be used to pass.
fn setup_position(size: usize, moves: &[&str]) -> Position {
    let mut pos = Position::new(size);
    for mv in moves {
        let m = pos.parse_move(mv).unwrap();
        if let Err(err) = pos.play(m) {
            panic!("illegal move {mv} in setup: {err}");
        }
    }
    pos
}

fn diagram(text: &str) -> Position {
    Position::from_diagram(text).unwrap()
}

fn params(komi: f64, draw_winner: Color) -> SolveParams {
    SolveParams {
        komi,
        draw_winner,
        time_limit: Duration::from_secs(20),
    }
}

fn empty_points(pos: &Position) -> HashSet<Point> {
    pos.points()
        .into_iter()
        .filter(|&p| pos.color_at(p) == Stone::Empty)
        .collect()
}

// =============================================================================
// Apply / undo symmetry
// =============================================================================

#[test]
fn test_undo_every_legal_move_restores_position() {
    let pos = setup_position(5, &["C3", "D3", "B3", "C2", "pass", "D4", "C4"]);
    for color in [Color::Black, Color::White] {
        for pt in pos.legal_moves(color) {
            let mut p = pos.clone();
            p.apply_move(Move::Play(pt), color).unwrap();
            assert_ne!(p, pos);
            assert_eq!(p.undo_move(), Ok(Move::Play(pt)));
            assert_eq!(p, pos, "undo of {} for {color:?} differs", pos.format_point(pt));
        }
    }
}

#[test]
fn test_undo_whole_game() {
    let moves = ["C3", "D3", "B3", "C2", "pass", "D4", "C4", "pass", "pass"];
    let mut pos = setup_position(5, &moves);
    assert!(pos.is_end_of_game());
    for _ in 0..moves.len() {
        pos.undo_move().unwrap();
    }
    assert_eq!(pos, Position::new(5));
}

// =============================================================================
// Territory and scoring
// =============================================================================

#[test]
fn test_empty_five_by_five_goes_to_white_by_komi() {
    let pos = Position::new(5);
    let result = score(&pos, 2.5);
    assert_eq!(result.margin(), -2.5);
    assert_eq!(result.to_string(), "W+2.5");
}

#[test]
fn test_single_stone_takes_every_point() {
    let pos = setup_position(5, &["C3"]);
    let result = score(&pos, 6.5);
    assert_eq!(result.black, 25.0);
    assert_eq!(result.white, 6.5);
    assert_eq!(result.to_string(), "B+18.5");
}

#[test]
fn test_partition_matches_empty_points() {
    let pos = setup_position(5, &["C3", "D3", "B3", "C2", "B2", "D4", "C4", "E2"]);
    let territories = partition(&pos);
    let empties = empty_points(&pos);

    let total: usize = territories.iter().map(|t| t.len()).sum();
    assert_eq!(total, empties.len());

    let mut seen = HashSet::new();
    for t in &territories {
        for &p in &t.points {
            assert!(seen.insert(p));
        }
    }
    assert_eq!(seen, empties);
}

#[test]
fn test_score_counts_only_exclusive_territory() {
    let pos = diagram(
        "
        . X . O .
        . X . O .
        X X . O O
        . X . O .
        . X . O .
        ",
    );
    let result = score(&pos, 0.0);
    // 6 stones and 4 points each; the middle column is dame
    assert_eq!(result.black, 10.0);
    assert_eq!(result.white, 10.0);
    assert_eq!(result.to_string(), "Draw");
    assert_eq!(score(&pos, 0.0), result);
}

// =============================================================================
// Solver
// =============================================================================

#[test]
fn test_terminal_positions_need_more_than_half_the_board() {
    // (diagram, komi, black wins, white wins), ties credited to White
    let cases = [
        (". X . / X X X / . X .", 0.5, true, false),
        (". O . / O O O / . O .", 0.5, false, true),
        // 8 each on 16 points: Black's exact half goes to White
        (". X O . / X X O O / X X O O / . X O .", 0.5, false, true),
        (". X O . / X X O O / X X O O / . X O .", -0.5, false, false),
        // 15 against 10 + 7.5 on 25 points: both clear 12.5
        (
            ". X X O . / X X X O O / . X X O . / X X X O O / . X X O .",
            7.5,
            true,
            true,
        ),
    ];
    for (text, komi, black_wins, white_wins) in cases {
        let mut pos = diagram(text);
        for (color, wins) in [(Color::Black, black_wins), (Color::White, white_wins)] {
            let out = solve(&mut pos, color, &params(komi, Color::White)).unwrap();
            let expected = if wins {
                GameResult::Win(color)
            } else {
                GameResult::Loss(color)
            };
            assert_eq!(out.result, expected, "{text} komi {komi} for {color:?}");
            assert_eq!(out.nodes, 1);
        }
    }
}

#[test]
fn test_dame_can_leave_both_sides_short() {
    let mut pos = setup_position(3, &["A3", "C3", "A2", "C2", "A1", "C1", "pass", "pass"]);
    assert!(pos.is_end_of_game());
    let result = score(&pos, 1.0);
    assert_eq!((result.black, result.white), (3.0, 4.0));
    assert_eq!(result.to_string(), "W+1");
    for color in [Color::Black, Color::White] {
        let out = solve(&mut pos, color, &params(1.0, Color::White)).unwrap();
        assert_eq!(out.result, GameResult::Loss(color));
    }
}

#[test]
fn test_half_split_uses_draw_winner() {
    let mut pos = diagram(". X O . / X X O O / X X O O / . X O .");
    assert_eq!(score(&pos, 0.0).winner(), None);

    for draw_winner in [Color::Black, Color::White] {
        for color in [Color::Black, Color::White] {
            let out = solve(&mut pos, color, &params(0.0, draw_winner)).unwrap();
            assert_eq!(out.result.winner(), Some(draw_winner));
        }
    }
    let out = solve_exact(&mut pos, Color::White, &params(0.0, Color::White)).unwrap();
    assert_eq!(out.result, GameResult::Draw);
}

#[test]
fn test_capture_wins_and_board_is_restored() {
    let mut pos = diagram(". O . / O X X / X X X");
    let before = pos.clone();
    let out = solve(&mut pos, Color::Black, &params(0.5, Color::White)).unwrap();
    assert_eq!(out.result, GameResult::Win(Color::Black));
    assert_eq!(out.winning_move, pos.parse_move("A3").ok());
    assert_eq!(out.line.first(), Some(&(Color::Black, pos.parse_move("A3").unwrap())));
    assert_eq!(pos, before);
}

#[test]
fn test_timeout_is_reported_and_board_restored() {
    let mut pos = setup_position(4, &["B2"]);
    let before = pos.clone();
    let p = SolveParams {
        time_limit: Duration::from_millis(50),
        ..params(0.5, Color::White)
    };
    assert_eq!(solve(&mut pos, Color::White, &p), Err(SolveError::Timeout));
    assert_eq!(pos, before);
}

// =============================================================================
// Controller
// =============================================================================

#[test]
fn test_controller_unknown_on_timeout() {
    // An empty 9x9 board is far out of reach of the shortest time limit
    let config = EngineConfig::default()
        .with_board_size(9)
        .unwrap()
        .with_time_limit(1)
        .unwrap();
    let mut controller = Controller::new(config);
    let mut pos = Position::new(9);
    let report = controller.query(&mut pos, Color::Black).unwrap();
    assert_eq!(report.verdict, Verdict::Unknown);
    assert_eq!(report.mv, None);
    assert!(controller.reported_winners().is_empty());
    assert!(controller.last_outcome().is_none());
    assert_eq!(pos, Position::new(9));
}

#[test]
fn test_controller_consecutive_queries_agree() {
    let mut controller = Controller::new(EngineConfig::default().with_komi(0.5).with_seed(1));
    let mut pos = diagram(". O . / O X X / X X X");
    let first = controller.query(&mut pos, Color::Black).unwrap();
    let second = controller.query(&mut pos, Color::Black).unwrap();
    assert_eq!(first.verdict, second.verdict);
    assert_eq!(first.verdict.to_string(), "b");
}

#[test]
fn test_selfplay_to_the_end() {
    let mut controller = Controller::new(EngineConfig::default().with_komi(0.5).with_seed(3));
    let mut pos = diagram(". O . / O X X / X X X");
    let mut moves = Vec::new();
    while !pos.is_end_of_game() {
        let color = pos.to_play();
        moves.push(controller.genmove(&mut pos, color).unwrap());
        assert!(moves.len() < 20, "game did not end");
    }
    assert_eq!(moves.first(), pos.parse_move("A3").ok().as_ref());
    assert_eq!(score(&pos, 0.5).to_string(), "B+8.5");
    assert!(controller.reported_winners().iter().all(|&c| c == Color::Black));
}

// =============================================================================
// Safety
// =============================================================================

#[test]
fn test_safety_after_game() {
    let pos = diagram(". X O . / X X O O / X X O O / . X O .");
    let black: Vec<String> = find_safety(&pos, Color::Black)
        .into_iter()
        .map(|p| pos.format_point(p))
        .collect();
    assert_eq!(black, ["A4", "B4", "A3", "B3", "A2", "B2", "A1", "B1"]);
    assert_eq!(find_safety(&pos, Color::White).len(), 8);
}
