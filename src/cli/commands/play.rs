//! Interactive match at the terminal
//!
//! The human plays one mark, the other seat is filled by the optimal engine,
//! a uniform-random baseline, or a second human. X always moves first.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use crate::{
    board::{Board, Player},
    game::{Game, GameOutcome},
    search,
};

/// Kind of opponent filling the non-human seat
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OpponentKind {
    /// Exhaustive minimax; never loses
    Optimal,
    /// Uniformly random legal moves
    Random,
    /// A second human at the same terminal
    Human,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Mark the human plays (X or O); X always moves first
    #[arg(long, default_value = "X")]
    pub symbol: Player,

    /// Opponent for the other mark
    #[arg(long, value_enum, default_value_t = OpponentKind::Optimal)]
    pub opponent: OpponentKind,

    /// Seed for the random opponent (defaults to OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Run one match and print the result
pub fn execute(args: PlayArgs) -> Result<()> {
    let mut game = Game::new();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("You are {}; {} moves first.", args.symbol, Player::X);

    let outcome = loop {
        println!("\n{}\n", game.board());

        let mover = game.to_move();
        let prompted = args.opponent == OpponentKind::Human || mover == args.symbol;
        let position = if prompted {
            prompt_move(game.board(), mover)?
        } else {
            let position = match args.opponent {
                OpponentKind::Optimal => optimal_move(game.board(), mover)?,
                OpponentKind::Random => random_move(game.board(), &mut rng)?,
                OpponentKind::Human => unreachable!("human seats are prompted"),
            };
            println!("{mover} plays {position}.");
            position
        };

        if let Some(outcome) = game.play(position)? {
            break outcome;
        }
    };

    println!("\n{}\n", game.board());
    match outcome {
        GameOutcome::Win(player) => println!("{player} wins!"),
        GameOutcome::Draw => println!("It's a draw!"),
    }

    Ok(())
}

/// Read a move from stdin, re-prompting until it is legal
fn prompt_move(board: &Board, mover: Player) -> Result<usize> {
    let stdin = io::stdin();
    loop {
        print!("{mover}, enter your move (0-8): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("input ended before the game finished");
        }

        match line.trim().parse::<usize>() {
            Ok(position) if board.is_valid_move(position) => return Ok(position),
            _ => println!("Invalid move. Try again."),
        }
    }
}

fn optimal_move(board: &Board, mover: Player) -> Result<usize> {
    // The engine works on a scratch copy; the game owns the real board
    let mut scratch = *board;
    search::best_move(&mut scratch, mover)
        .position
        .context("search found no move on a live board")
}

fn random_move(board: &Board, rng: &mut StdRng) -> Result<usize> {
    let open: Vec<usize> = board.empty_positions().collect();
    open.choose(rng)
        .copied()
        .context("no empty cell on a live board")
}
