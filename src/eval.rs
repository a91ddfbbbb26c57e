//! Static evaluation and end-of-game scoring

use std::fmt;

use crate::bitboard::{BitBoard, Color};

/// Result of a finished game
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win { winner: Color, black: u32, white: u32 },
    Draw { disks: u32 },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win { winner, black, white } => write!(
                f,
                "X has {} disks. O has {} disks. {} wins.",
                black,
                white,
                winner.glyph()
            ),
            Outcome::Draw { disks } => write!(f, "Tie game. Each player has {} disks", disks),
        }
    }
}

impl BitBoard {
    /// Number of disks of `color` on the board
    #[inline]
    pub fn count_disks(&self, color: Color) -> u32 {
        self.disks(color).count_ones()
    }

    /// Disk differential from `color`'s point of view
    #[inline]
    pub fn utility(&self, color: Color) -> i32 {
        self.count_disks(color) as i32 - self.count_disks(color.other()) as i32
    }

    /// Scores the board as a finished game
    pub fn outcome(&self) -> Outcome {
        let black = self.count_disks(Color::Black);
        let white = self.count_disks(Color::White);
        if black == white {
            Outcome::Draw { disks: black }
        } else {
            let winner = if black > white {
                Color::Black
            } else {
                Color::White
            };
            Outcome::Win {
                winner,
                black,
                white,
            }
        }
    }
}
