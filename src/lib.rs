//! A depth-limited minimax agent for playing the board game 'Connect 4'
//!
//! The agent searches a fixed number of plies ahead with alpha-beta pruning,
//! scoring wins and losses found inside the horizon and falling back to a
//! heuristic window evaluation everywhere else.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::Board, search::{SearchConfig, SearchEngine}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board: Board = "
//!     .......
//!     .......
//!     .......
//!     .......
//!     XXX....
//!     OOO....
//! ".parse()?;
//! let mut engine = SearchEngine::new(SearchConfig { seed: Some(7), ..SearchConfig::default() });
//! let result = engine.best_move(&board, 1, true)?;
//!
//! assert!((result.column, result.score) == (Some(3), 50000));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod evaluator;

pub mod search;

pub mod game;


/// The default height of the game board in tiles
pub const DEFAULT_ROWS: usize = 6;

/// The default width of the game board in tiles
pub const DEFAULT_COLUMNS: usize = 7;

/// The number of aligned chips needed to win, and the length of a scoring window
pub const WINDOW_LENGTH: usize = 4;

// the default board must fit a winning line in both directions
const_assert!(DEFAULT_ROWS >= WINDOW_LENGTH && DEFAULT_COLUMNS >= WINDOW_LENGTH);
