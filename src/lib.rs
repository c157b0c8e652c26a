//! A time-budgeted agent for playing 'Connect X' style connection games
//!
//! The agent runs an iterative-deepening alpha-beta search over a
//! host-owned board, returning the best column it found before its
//! per-move time budget runs out.
//!
//! # Basic Usage
//!
//! ```
//! use connectx_ai::{board::ArrayBoard, engine::Engine};
//!
//!# use std::error::Error;
//!# use std::time::Duration;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = ArrayBoard::new(6, 7, 4);
//! let mut engine = Engine::new(6, 7, 4, true, Duration::from_secs(5))?;
//!
//! // an untouched board always opens in the center
//! let column = engine.choose_move(&mut board)?;
//!
//! assert!(column == 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod engine;

pub mod eval;

pub mod transposition_table;

mod test;

/// The default height of the game board in rows
pub const DEFAULT_ROWS: usize = 6;

/// The default width of the game board in columns
pub const DEFAULT_COLUMNS: usize = 7;

/// The default number of aligned tokens needed to win
pub const DEFAULT_ALIGNMENT: usize = 4;

// ensure the default alignment is achievable on the default board
const_assert!(DEFAULT_ALIGNMENT <= DEFAULT_ROWS);
const_assert!(DEFAULT_ALIGNMENT <= DEFAULT_COLUMNS);
