//! Constants for board geometry, scoring and search limits.
//!
//! The board size is chosen at runtime (the solver is only practical on small
//! boards), so this module holds bounds and defaults rather than a fixed `N`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest supported board size.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board size (limited by the column letters below).
pub const MAX_BOARD_SIZE: usize = 19;

/// Board size used when none is given.
pub const DEFAULT_BOARD_SIZE: usize = 5;

/// Column letters in GTP order. `I` is skipped to avoid confusion with `J`.
pub const COLUMN_LETTERS: &[u8; MAX_BOARD_SIZE] = b"ABCDEFGHJKLMNOPQRST";

/// Maximum game length is this factor times the board area.
///
/// Simple ko alone does not rule out longer cycles, so the solver treats a
/// position at this length as finished.
pub const GAME_LEN_FACTOR: usize = 3;

/// Maximum number of moves in a game on a board of the given size.
#[inline]
pub const fn max_game_len(size: usize) -> usize {
    size * size * GAME_LEN_FACTOR
}

// =============================================================================
// Scoring
// =============================================================================

/// Default komi (compensation points for White).
pub const DEFAULT_KOMI: f64 = 7.5;

// =============================================================================
// Search Limits
// =============================================================================

/// Default time limit for `solve` and `genmove`, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

/// Shortest accepted time limit, in seconds.
pub const MIN_TIME_LIMIT_SECS: u64 = 1;

/// Longest accepted time limit, in seconds.
pub const MAX_TIME_LIMIT_SECS: u64 = 100;

// =============================================================================
// Diagram Characters
// =============================================================================

/// Black stone in board diagrams.
pub const CHAR_BLACK: char = 'X';

/// White stone in board diagrams.
pub const CHAR_WHITE: char = 'O';

/// Empty point in board diagrams.
pub const CHAR_EMPTY: char = '.';
