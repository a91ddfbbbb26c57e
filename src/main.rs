use anyhow::Result;
use indicatif::ProgressBar;

use std::io::{stdin, stdout, Write};

use othello_ai::{
    bitboard::{Color, Move},
    solver::Solver,
};

mod game;
use game::*;

/// Search depth of a computer player, `None` for a human
type Player = Option<u32>;

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush().expect("failed to flush to stdout!");
    let mut buffer = String::new();
    stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_lowercase())
}

fn choose_player(color: Color) -> Result<Player> {
    loop {
        let answer = prompt(&format!(
            "Enter h if {} ({}) is a human player, c for a computer player: ",
            color,
            color.glyph()
        ))?;
        match answer.chars().next() {
            Some('h') => return Ok(None),
            Some('c') => loop {
                let depth = prompt("Specify the searching depth (integer) between 1 and 60: ")?;
                match depth.parse::<u32>() {
                    Ok(depth @ 1..=60) => return Ok(Some(depth)),
                    _ => println!("Invalid depth: {}", depth),
                }
            },
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("Welcome to Othello\n");

    let black = choose_player(Color::Black)?;
    let white = choose_player(Color::White)?;

    let mut game = Game::new();

    // game loop
    loop {
        game.display()?;

        match game.state {
            GameState::Playing => {
                let color = game.to_move;
                if !game.board.has_legal_move(color) {
                    println!("{} cannot place a disk and passes", color);
                    game.pass()?;
                    continue;
                }

                let player = match color {
                    Color::Black => black,
                    Color::White => white,
                };
                match player {
                    // computer player
                    Some(depth) => {
                        let spinner = ProgressBar::new_spinner();
                        spinner.set_message("Computer is thinking...");
                        spinner.enable_steady_tick(100);

                        let mut solver = Solver::new(game.board, color);
                        let action = solver.solve_parallel(depth);
                        spinner.finish_and_clear();

                        let best_move = match action.best_move {
                            Some(m) => m,
                            None => {
                                game.pass()?;
                                continue;
                            }
                        };
                        let flips = game.play_checked(best_move)?;
                        println!(
                            "Computer placed {} at [row {}, column {}] and flipped {} disks",
                            color.glyph(),
                            best_move.row,
                            best_move.col,
                            flips
                        );
                        println!(
                            "Evaluation after {} plies: {:+} ({} positions searched)",
                            depth, action.value, solver.node_count
                        );
                    }

                    // human player
                    None => {
                        let input = prompt(&format!(
                            "Enter {}'s move as 'row,col': ",
                            color.glyph()
                        ))?;
                        let m = match input.parse::<Move>() {
                            Err(err) => {
                                println!("{}", err);
                                continue;
                            }
                            Ok(m) => m,
                        };
                        match game.play_checked(m) {
                            Ok(flips) => println!("You flipped {} disks", flips),
                            // try the move again
                            Err(err) => println!("{}", err),
                        }
                    }
                }
            }

            // end state
            GameState::Finished(outcome) => {
                println!("Game over after {} turns.", game.history.len());
                println!("{}", outcome);
                break;
            }
        }
    }
    Ok(())
}
