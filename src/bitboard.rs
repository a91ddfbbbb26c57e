use anyhow::{anyhow, Result};

use std::fmt;
use std::ops::{Add, Index, Not};
use std::str::FromStr;

use crate::{EDGE, NUM_CELLS};

pub mod static_masks {
    use super::bit_index;
    use crate::EDGE;

    /// All cells of row 8, the low byte of each mask
    pub const fn row8_mask() -> u64 {
        let mut mask = 0;
        let mut col = 1;
        while col <= EDGE as i32 {
            mask |= 1u64 << bit_index(EDGE as i32, col);
            col += 1;
        }
        mask
    }
    /// All cells of column 8
    pub const fn col8_mask() -> u64 {
        let mut mask = 0;
        let mut row = 1;
        while row <= EDGE as i32 {
            mask |= 1u64 << bit_index(row, EDGE as i32);
            row += 1;
        }
        mask
    }
    /// All cells of column 1
    pub const fn col1_mask() -> u64 {
        col8_mask() << (EDGE - 1)
    }
}

pub const ROW8: u64 = static_masks::row8_mask();
pub const COL8: u64 = static_masks::col8_mask();
pub const COL1: u64 = static_masks::col1_mask();

/// Bit position of the 1-indexed cell (row, col).
///
/// Row 8 / column 8 is bit 0 and row 1 / column 1 is bit 63.
/// Only meaningful for coordinates inside the board.
#[inline]
pub const fn bit_index(row: i32, col: i32) -> u32 {
    ((EDGE as i32 - row) * EDGE as i32 + (EDGE as i32 - col)) as u32
}

/// The colour of a disk, and of the player who owns it
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    /// The opposing colour
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Glyph used when drawing the board
    pub const fn glyph(self) -> char {
        match self {
            Color::Black => 'X',
            Color::White => 'O',
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        self.other()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A 1-indexed (row, col) coordinate, also used for direction offsets.
///
/// Coordinates outside `1..=8` are representable so that directional scans
/// can step off the board; they must be rejected with [`Move::is_off_board`]
/// before any bit arithmetic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Move {
    pub row: i32,
    pub col: i32,
}

impl Move {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_off_board(self) -> bool {
        self.row < 1 || self.row > EDGE as i32 || self.col < 1 || self.col > EDGE as i32
    }

    /// The single bit for this cell. Must not be called on an off-board move.
    #[inline]
    pub fn bit(self) -> u64 {
        debug_assert!(!self.is_off_board(), "no board bit for {:?}", self);
        1u64 << bit_index(self.row, self.col)
    }

    /// Shift distance of this offset in the board encoding.
    /// Positive offsets move towards bit 0.
    #[inline]
    pub const fn bit_offset(self) -> i32 {
        self.row * EDGE as i32 + self.col
    }

    /// The cell for a single-bit mask
    pub fn from_bit(bit: u64) -> Self {
        debug_assert!(bit.count_ones() == 1);
        let index = bit.trailing_zeros() as i32;
        Self::new(
            EDGE as i32 - index / EDGE as i32,
            EDGE as i32 - index % EDGE as i32,
        )
    }
}

impl Add for Move {
    type Output = Self;

    fn add(self, offset: Self) -> Self {
        Self::new(self.row + offset.row, self.col + offset.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Parses the `row,col` notation, e.g. `4,3`
impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split(',');
        let mut coordinate = |name: &str| -> Result<i32> {
            let part = parts
                .next()
                .ok_or_else(|| anyhow!("missing {} in '{}', expected 'row,col'", name, s))?;
            part.trim()
                .parse::<i32>()
                .map_err(|_| anyhow!("could not parse '{}' as a {}", part.trim(), name))
        };
        let row = coordinate("row")?;
        let col = coordinate("column")?;
        if parts.next().is_some() {
            return Err(anyhow!("trailing input in '{}', expected 'row,col'", s));
        }
        Ok(Self::new(row, col))
    }
}

/// The eight unit steps: right, left, up, down, and the four diagonals
pub const DIRECTIONS: [Move; 8] = [
    Move::new(0, 1),
    Move::new(0, -1),
    Move::new(-1, 0),
    Move::new(1, 0),
    Move::new(-1, -1),
    Move::new(-1, 1),
    Move::new(1, 1),
    Move::new(1, -1),
];

/// An Othello position as one occupancy mask per colour
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitBoard {
    // indexed by `Color`, never overlapping
    pub(crate) disks: [u64; 2],
}

impl BitBoard {
    /// The standard starting position
    pub fn new() -> Self {
        Self {
            disks: [
                Move::new(4, 5).bit() | Move::new(5, 4).bit(),
                Move::new(4, 4).bit() | Move::new(5, 5).bit(),
            ],
        }
    }

    pub fn empty() -> Self {
        Self { disks: [0, 0] }
    }

    pub fn from_masks(black: u64, white: u64) -> Result<Self> {
        if black & white != 0 {
            return Err(anyhow!(
                "Invalid position, cells {:#018x} hold both colours",
                black & white
            ));
        }
        Ok(Self {
            disks: [black, white],
        })
    }

    /// Parses a diagram of `X` (black), `O` (white) and `.` (empty) cells,
    /// row 1 first. Whitespace is ignored.
    pub fn from_diagram<S: AsRef<str>>(diagram: S) -> Result<Self> {
        let mut board = Self::empty();
        let mut cell = 0;
        for c in diagram.as_ref().chars().filter(|c| !c.is_whitespace()) {
            if cell >= NUM_CELLS {
                return Err(anyhow!("diagram has more than {} cells", NUM_CELLS));
            }
            let m = Move::new((cell / EDGE) as i32 + 1, (cell % EDGE) as i32 + 1);
            match c {
                'X' | 'x' => board.disks[Color::Black as usize] |= m.bit(),
                'O' | 'o' => board.disks[Color::White as usize] |= m.bit(),
                '.' | '-' => {}
                _ => return Err(anyhow!("could not parse '{}' as a cell", c)),
            }
            cell += 1;
        }
        if cell != NUM_CELLS {
            return Err(anyhow!(
                "diagram has {} cells, expected {}",
                cell,
                NUM_CELLS
            ));
        }
        Ok(board)
    }

    /// Replays whitespace-separated `rowcol` digit pairs (e.g. `"43 33"`)
    /// from the starting position, passing automatically when the side to
    /// move has no legal move.
    ///
    /// Returns the board and the colour to move next.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<(Self, Color)> {
        let mut board = Self::new();
        let mut color = Color::Black;

        for token in moves.as_ref().split_whitespace() {
            let digits: Vec<i32> = token
                .chars()
                .map(|c| c.to_digit(10).map(|d| d as i32))
                .collect::<Option<_>>()
                .ok_or_else(|| anyhow!("could not parse '{}' as a move", token))?;
            let m = match digits.as_slice() {
                &[row, col] => Move::new(row, col),
                _ => return Err(anyhow!("could not parse '{}' as a move", token)),
            };

            if !board.has_legal_move(color) {
                if !board.has_legal_move(!color) {
                    return Err(anyhow!("Invalid position, game is over before {}", m));
                }
                color = !color;
            }
            board.play_checked(m, color)?;
            color = !color;
        }
        if !board.has_legal_move(color) && board.has_legal_move(!color) {
            color = !color;
        }
        Ok((board, color))
    }

    #[inline]
    pub fn disks(&self, color: Color) -> u64 {
        self.disks[color as usize]
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.disks[0] | self.disks[1]
    }

    /// The colour of the disk at `m`, if any
    pub fn get(&self, m: Move) -> Option<Color> {
        if m.is_off_board() {
            return None;
        }
        let bit = m.bit();
        if self.disks(Color::Black) & bit != 0 {
            Some(Color::Black)
        } else if self.disks(Color::White) & bit != 0 {
            Some(Color::White)
        } else {
            None
        }
    }

    pub fn num_empty(&self) -> u32 {
        NUM_CELLS as u32 - self.occupied().count_ones()
    }
}

impl Default for BitBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Color> for BitBoard {
    type Output = u64;

    fn index(&self, color: Color) -> &u64 {
        &self.disks[color as usize]
    }
}

impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 1..=EDGE {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;
        for row in 1..=EDGE as i32 {
            write!(f, "{}", row)?;
            for col in 1..=EDGE as i32 {
                let glyph = self.get(Move::new(row, col)).map_or('.', Color::glyph);
                write!(f, " {}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
