//! Legal move generation

use std::ops::Deref;

use crate::bitboard::{BitBoard, Color, Move, COL1, COL8, DIRECTIONS, ROW8};
use crate::{EDGE, NUM_CELLS};

/// A fixed-capacity list of moves in enumeration order
#[derive(Copy, Clone)]
pub struct MoveList {
    size: usize,
    moves: [Move; NUM_CELLS],
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            size: 0,
            moves: [Move::default(); NUM_CELLS],
        }
    }

    pub fn push(&mut self, m: Move) {
        self.moves[self.size] = m;
        self.size += 1;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.moves[..self.size]
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl BitBoard {
    /// Empty cells adjacent to at least one disk of `color`'s opponent.
    pub fn neighbor_candidates(&self, color: Color) -> u64 {
        let opponent = self.disks(color.other());
        let mut neighbors = 0;
        for direction in DIRECTIONS.iter() {
            // a horizontal step must not carry a disk into the next row
            let col_mask = match direction.col {
                c if c > 0 => COL1,
                c if c < 0 => COL8,
                _ => 0,
            };
            let offset = direction.bit_offset();
            let shifted = if offset > 0 {
                opponent >> offset
            } else {
                opponent << -offset
            };
            neighbors |= shifted & !col_mask;
        }
        neighbors & !self.occupied()
    }

    /// Scans `candidates` from row 8 down to row 1, column 8 down to
    /// column 1, calling `f` for each cell where `color` would flip a disk.
    fn for_each_legal<F: FnMut(Move)>(&self, mut candidates: u64, color: Color, mut f: F) {
        for row in (1..=EDGE as i32).rev() {
            let mut this_row = candidates & ROW8;
            let mut col = EDGE as i32;
            while this_row != 0 && col >= 1 {
                if this_row & COL8 != 0 {
                    let m = Move::new(row, col);
                    if self.count_flips(m, color) > 0 {
                        f(m);
                    }
                }
                this_row >>= 1;
                col -= 1;
            }
            candidates >>= EDGE;
        }
    }

    /// The set of legal moves for `color` and its size
    pub fn legal_moves(&self, color: Color) -> (u64, u32) {
        let mut legal = 0;
        let mut count = 0;
        self.for_each_legal(self.neighbor_candidates(color), color, |m| {
            legal |= m.bit();
            count += 1;
        });
        (legal, count)
    }

    /// The legal moves among `candidates` as coordinates, in enumeration
    /// order (highest row first, then highest column first).
    pub fn valid_positions(&self, candidates: u64, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        self.for_each_legal(candidates, color, |m| moves.push(m));
        moves
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        let mut candidates = self.neighbor_candidates(color);
        while candidates != 0 {
            let bit = candidates & candidates.wrapping_neg();
            if self.count_flips(Move::from_bit(bit), color) > 0 {
                return true;
            }
            candidates ^= bit;
        }
        false
    }

    /// Whether neither colour can move
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_move(Color::Black) && !self.has_legal_move(Color::White)
    }
}
