//! Disk capture along the eight directions

use anyhow::{anyhow, Result};
use log::trace;

use crate::bitboard::{BitBoard, Color, Move, DIRECTIONS};

/// Whether a flip scan may change the board
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipMode {
    /// Count the captures only, leaving the board bitwise untouched
    Probe,
    /// Count and perform the captures
    Commit,
}

impl BitBoard {
    /// Sets `color`'s bit at `m` and clears the opponent's bit there.
    #[inline]
    pub fn place_or_flip(&mut self, m: Move, color: Color) {
        let bit = m.bit();
        self.disks[color as usize] |= bit;
        self.disks[color.other() as usize] &= !bit;
    }

    /// Scans from `m` one step at a time along `direction`.
    ///
    /// Returns 0 when no capture is possible in this direction, otherwise
    /// 1 + the number of opposing disks that would be captured (the extra 1
    /// is the bracketing disk of `color`). In [`FlipMode::Commit`] each
    /// captured disk is converted as its chain is confirmed, nearest to `m`
    /// last.
    pub fn try_flips(&mut self, m: Move, direction: Move, color: Color, mode: FlipMode) -> u32 {
        let next = m + direction;
        if next.is_off_board() {
            return 0;
        }

        let next_bit = next.bit();
        if next_bit & self.disks(color.other()) != 0 {
            let flips = self.try_flips(next, direction, color, mode);
            if flips > 0 {
                if mode == FlipMode::Commit {
                    trace!("flipping disk at {}", next);
                    self.place_or_flip(next, color);
                }
                return flips + 1;
            }
        } else if next_bit & self.disks(color) != 0 {
            return 1;
        }
        0
    }

    /// Total number of opposing disks a disk of `color` at `m` captures over
    /// all eight directions. The disk at `m` itself is not placed.
    pub fn flip_disks(&mut self, m: Move, color: Color, mode: FlipMode) -> u32 {
        DIRECTIONS
            .iter()
            .map(|&direction| self.try_flips(m, direction, color, mode).saturating_sub(1))
            .sum()
    }

    /// Number of disks `color` would capture by playing at `m`, without
    /// touching this board.
    #[inline]
    pub fn count_flips(&self, m: Move, color: Color) -> u32 {
        let mut probe = *self;
        probe.flip_disks(m, color, FlipMode::Probe)
    }

    /// Plays `color` at `m`, performing every capture, and returns the number
    /// of disks flipped.
    ///
    /// The move must already be known to be legal (on the board, empty, and
    /// capturing at least one disk); see [`BitBoard::play_checked`].
    pub fn apply_move(&mut self, m: Move, color: Color) -> u32 {
        debug_assert!(!m.is_off_board());
        debug_assert!(self.occupied() & m.bit() == 0);
        let flips = self.flip_disks(m, color, FlipMode::Commit);
        self.place_or_flip(m, color);
        flips
    }

    /// Validates and plays a move, returning the number of disks flipped.
    pub fn play_checked(&mut self, m: Move, color: Color) -> Result<u32> {
        if m.is_off_board() {
            return Err(anyhow!(
                "Illegal move {}: row and column must both be between 1 and 8",
                m
            ));
        }
        if self.occupied() & m.bit() != 0 {
            return Err(anyhow!("Illegal move {}: board position already occupied", m));
        }
        if self.count_flips(m, color) == 0 {
            return Err(anyhow!("Illegal move {}: no disks flipped", m));
        }
        Ok(self.apply_move(m, color))
    }

    /// A copy of this board with the move applied
    #[inline]
    pub fn with_move(&self, m: Move, color: Color) -> Self {
        let mut next = *self;
        next.apply_move(m, color);
        next
    }
}
