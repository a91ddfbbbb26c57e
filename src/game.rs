use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color as TermColor, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use othello_ai::{
    bitboard::{BitBoard, Color, Move},
    eval::Outcome,
    EDGE,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Finished(Outcome),
}

#[derive(Clone)]
pub struct Game {
    pub board: BitBoard,
    pub to_move: Color,
    // `None` records a pass
    pub history: Vec<Option<Move>>,
    pub state: GameState,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: BitBoard::new(),
            to_move: Color::Black,
            history: Vec::new(),
            state: GameState::Playing,
        }
    }

    /// Plays a move for the side to move, returning the number of disks flipped
    pub fn play_checked(&mut self, m: Move) -> Result<u32> {
        if let GameState::Finished(_) = self.state {
            return Err(anyhow!("Invalid move, the game is over"));
        }
        let flips = self.board.play_checked(m, self.to_move)?;
        self.history.push(Some(m));
        self.advance();
        Ok(flips)
    }

    /// Passes the turn, only allowed when the side to move has no legal move
    pub fn pass(&mut self) -> Result<()> {
        if let GameState::Finished(_) = self.state {
            return Err(anyhow!("Cannot pass, the game is over"));
        }
        if self.board.has_legal_move(self.to_move) {
            return Err(anyhow!("Cannot pass, {} has a legal move", self.to_move));
        }
        self.history.push(None);
        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        self.to_move = !self.to_move;
        if self.board.is_game_over() {
            self.state = GameState::Finished(self.board.outcome());
        }
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();
        let (legal, _) = self.board.legal_moves(self.to_move);

        let cols: String = (1..=EDGE).map(|col| format!(" {}", col)).collect();
        stdout.queue(PrintStyledContent(style(format!(" {}\n", cols))))?;

        for row in 1..=EDGE as i32 {
            stdout.queue(PrintStyledContent(style(format!("{} ", row))))?;
            for col in 1..=EDGE as i32 {
                let m = Move::new(row, col);
                let cell = match self.board.get(m) {
                    Some(Color::Black) => style("●").with(TermColor::Black),
                    Some(Color::White) => style("●").with(TermColor::White),
                    // hint the moves available to the side to move
                    None if legal & m.bit() != 0 => style("·").with(TermColor::Yellow),
                    None => style(" ").with(TermColor::DarkGreen),
                };
                stdout
                    .queue(PrintStyledContent(
                        cell.attribute(Attribute::Bold).on(TermColor::DarkGreen),
                    ))?
                    .queue(PrintStyledContent(style(" ").on(TermColor::DarkGreen)))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.queue(PrintStyledContent(style(format!(
            "X: {}  O: {}\n",
            self.board.count_disks(Color::Black),
            self.board.count_disks(Color::White)
        ))))?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
