//! "Perft" move generation check: count the leaves of the game tree at a
//! given depth, with a forced pass counted as a ply.
//!
//! Reference values: http://www.aartbik.com/MISC/reversi.html

use crate::bitboard::{BitBoard, Color};

pub fn perft(board: BitBoard, color: Color, depth: u32) -> u64 {
    leaves_below(board, color, depth, false)
}

fn leaves_below(board: BitBoard, color: Color, depth: u32, passed: bool) -> u64 {
    if depth == 0 {
        return 1;
    }

    let (legal, _) = board.legal_moves(color);
    if legal == 0 {
        // both sides passed, the game is over
        if passed {
            return 1;
        }
        return leaves_below(board, color.other(), depth - 1, true);
    }

    board
        .valid_positions(legal, color)
        .iter()
        .map(|&m| leaves_below(board.with_move(m, color), color.other(), depth - 1, false))
        .sum()
}
