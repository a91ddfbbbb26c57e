//! A game engine for playing or analysing the board game 'Othello' (Reversi)
//!
//! The board is packed into one 64-bit mask per colour. Legal moves are
//! found by probing the flip engine, and a negamax search with alpha-beta
//! pruning picks the move that maximises the disk differential a given
//! number of plies ahead, either serially or with sibling moves explored
//! in parallel.
//!
//! # Basic Usage
//!
//! ```
//! use othello_ai::{bitboard::{BitBoard, Color, Move}, solver::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut solver = Solver::new(BitBoard::new(), Color::Black);
//! let action = solver.solve(3);
//!
//! assert!(action.has_move);
//! assert_eq!(action.best_move, Some(Move::new(6, 5)));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod bitboard;

pub mod flip;

pub mod movegen;

pub mod eval;

pub mod perft;

pub mod solver;


/// The number of rows (and columns) on the game board
pub const EDGE: usize = 8;

/// The number of cells on the game board
pub const NUM_CELLS: usize = EDGE * EDGE;

// one bit per cell for each colour's mask
const_assert_eq!(NUM_CELLS, 64);
