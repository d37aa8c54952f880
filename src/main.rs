//! Go-Solver command line.
//!
//! ## Usage
//!
//! - `go-solver` - Solve and score a built-in demo position
//! - `go-solver solve --diagram "..O/.X./..."` - Decide who wins with perfect play
//! - `go-solver score --size 5 --komi 2.5` - Score a position
//! - `go-solver safe --color b --diagram ...` - List unconditionally safe points
//! - `go-solver selfplay --size 3` - Let the engine play both sides

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use go_solver::board::{BoardState, Color, Move};
use go_solver::config::{EngineConfig, TimeLimit};
use go_solver::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_KOMI, DEFAULT_TIME_LIMIT_SECS, MAX_TIME_LIMIT_SECS,
    MIN_TIME_LIMIT_SECS,
};
use go_solver::controller::Controller;
use go_solver::position::Position;
use go_solver::safety::find_safety;
use go_solver::score::score;
use go_solver::solver::{GameResult, SolveError, solve_exact};

/// Go-Solver: exact endgame solver and territory scorer for small Go boards
#[derive(Parser)]
#[command(name = "go-solver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// How to set up the position.
#[derive(Args)]
struct PositionArgs {
    /// Size of the empty starting board (ignored with --diagram)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Board diagram, top row first, rows separated by '/' (X black, O white, . empty)
    #[arg(long)]
    diagram: Option<String>,

    /// Moves to play first, as color/vertex pairs: "b C3 w pass b B2"
    #[arg(long)]
    moves: Option<String>,

    /// Side to move (defaults to the side after the last move)
    #[arg(long)]
    to_play: Option<Color>,
}

#[derive(Args)]
struct SearchArgs {
    /// Time limit in seconds
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT_SECS,
          value_parser = clap::value_parser!(u64).range(MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS))]
    time_limit: u64,

    /// Komi (compensation points for White)
    #[arg(long, default_value_t = DEFAULT_KOMI)]
    komi: f64,

    /// Color credited with drawn positions during the search
    #[arg(long, default_value_t = Color::White)]
    draw_winner: Color,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide the position under perfect play
    Solve {
        #[command(flatten)]
        position: PositionArgs,
        #[command(flatten)]
        search: SearchArgs,
        /// Tell draws apart from wins (runs up to two searches)
        #[arg(long)]
        exact: bool,
    },
    /// Score the position
    Score {
        #[command(flatten)]
        position: PositionArgs,
        /// Komi (compensation points for White)
        #[arg(long, default_value_t = DEFAULT_KOMI)]
        komi: f64,
    },
    /// List points that are unconditionally safe for a color
    Safe {
        #[command(flatten)]
        position: PositionArgs,
        #[arg(long)]
        color: Color,
    },
    /// Let the engine play both sides until the game ends
    Selfplay {
        #[command(flatten)]
        position: PositionArgs,
        #[command(flatten)]
        search: SearchArgs,
        /// Stop after this many moves
        #[arg(long)]
        max_moves: Option<usize>,
        /// Seed for the fallback move choice
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Some(Commands::Solve {
            position,
            search,
            exact,
        }) => run_solve(&position, &search, exact),
        Some(Commands::Score { position, komi }) => {
            let pos = build_position(&position)?;
            print!("{pos}");
            println!("{}", score(&pos, komi));
            Ok(())
        }
        Some(Commands::Safe { position, color }) => {
            let pos = build_position(&position)?;
            let safe: Vec<String> = find_safety(&pos, color)
                .into_iter()
                .map(|pt| pos.format_point(pt))
                .collect();
            println!("{}", safe.join(" "));
            Ok(())
        }
        Some(Commands::Selfplay {
            position,
            search,
            max_moves,
            seed,
        }) => run_selfplay(&position, &search, max_moves, seed),
        None => run_demo(),
    }
}

/// Build the position described on the command line.
fn build_position(args: &PositionArgs) -> Result<Position> {
    let mut pos = match &args.diagram {
        Some(diagram) => Position::from_diagram(diagram).context("reading --diagram")?,
        None => {
            let config = EngineConfig::default().with_board_size(args.size)?;
            Position::new(config.board_size)
        }
    };

    if let Some(moves) = &args.moves {
        let tokens: Vec<&str> = moves.split_whitespace().collect();
        for pair in tokens.chunks(2) {
            let &[color, vertex] = pair else {
                bail!("--moves needs color/vertex pairs, got a dangling '{}'", pair[0]);
            };
            let color: Color = color.parse()?;
            let mv = pos.parse_move(vertex)?;
            pos.apply_move(mv, color)
                .with_context(|| format!("playing {color} {vertex}"))?;
        }
    }

    if let Some(color) = args.to_play {
        pos.set_to_play(color);
    }
    Ok(pos)
}

fn engine_config(search: &SearchArgs, size: usize) -> Result<EngineConfig> {
    Ok(EngineConfig::default()
        .with_board_size(size)?
        .with_time_limit(search.time_limit)?
        .with_komi(search.komi)
        .with_draw_winner(search.draw_winner))
}

fn run_solve(position: &PositionArgs, search: &SearchArgs, exact: bool) -> Result<()> {
    let mut pos = build_position(position)?;
    let config = engine_config(search, pos.size())?;
    let color = pos.to_play();

    if exact {
        let line = match solve_exact(&mut pos, color, &config.solve_params()) {
            Ok(outcome) => match outcome.result {
                GameResult::Win(c) => with_move(&pos, &c.to_string(), outcome.winning_move),
                GameResult::Draw => with_move(&pos, "draw", outcome.winning_move),
                GameResult::Loss(c) => c.opponent().to_string(),
            },
            Err(SolveError::Timeout) => "unknown".to_string(),
            Err(err) => return Err(err.into()),
        };
        println!("{line}");
        return Ok(());
    }

    let mut controller = Controller::new(config);
    let report = controller.query(&mut pos, color)?;
    println!("{}", with_move(&pos, &report.verdict.to_string(), report.mv));
    Ok(())
}

fn with_move(pos: &Position, verdict: &str, mv: Option<Move>) -> String {
    match mv {
        Some(mv) => format!("{verdict} {}", pos.format_move(mv)),
        None => verdict.to_string(),
    }
}

fn run_selfplay(
    position: &PositionArgs,
    search: &SearchArgs,
    max_moves: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let mut pos = build_position(position)?;
    let mut config = engine_config(search, pos.size())?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut controller = Controller::new(config);

    let mut played = 0;
    while !pos.is_end_of_game() && max_moves.is_none_or(|max| played < max) {
        let color = pos.to_play();
        let mv = controller.genmove(&mut pos, color)?;
        println!("{color} {}", pos.format_move(mv));
        played += 1;
    }

    print!("{pos}");
    println!("{}", score(&pos, controller.config().komi));
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Go-Solver: exact endgame solver\n");

    let mut pos = Position::from_diagram(". O . / O X X / X X X")?;
    let mut controller = Controller::new(EngineConfig::default());
    controller.set_komi(0.5);
    controller.set_time_limit(TimeLimit::new(5)?);
    let komi = controller.config().komi;

    let color = pos.to_play();
    println!("=== Position ({} to play) ===", color.name());
    print!("{pos}");
    println!("Score: {}", score(&pos, komi));

    let report = controller.query(&mut pos, color)?;
    println!("Solve: {}", with_move(&pos, &report.verdict.to_string(), report.mv));
    if let Some(outcome) = controller.last_outcome() {
        let line: Vec<String> = outcome
            .line
            .iter()
            .map(|&(c, mv)| format!("{c} {}", pos.format_move(mv)))
            .collect();
        println!("Line: {}", line.join(", "));
    }
    Ok(())
}
