//! Optimal-policy analysis
//!
//! Prints the exact minimax verdict for a position and, on request, exports
//! the full optimal policy over every reachable state.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::{
    board::{Board, Player},
    cli::output,
    lines::LineAnalyzer,
    search::{self, Score},
};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Board position to analyze, e.g. "XX.OO...." ('.' marks an empty cell)
    pub state: Option<String>,

    /// Write the optimal policy for every reachable state as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    if let Some(s) = &args.state {
        let board = Board::from_string(s)?;
        analyze_position(board, "Requested state")?;
    } else if args.export.is_none() {
        output::print_section("Optimal play for key openings");
        analyze_position(Board::new(), "Empty board")?;
        analyze_position(Board::from_string("....X....")?, "Center taken by X")?;
        analyze_position(Board::from_string("X........")?, "Corner taken by X")?;
    }

    if let Some(path) = &args.export {
        let total = export_policy(path)?;
        println!("\nExported {total} positions to {}", path.display());
    }

    Ok(())
}

/// Print the verdict, optimal move(s), and immediate threats for one position
fn analyze_position(board: Board, description: &str) -> Result<()> {
    println!("\n{description}:");
    println!("{board}");

    let mover = board.next_player()?;
    let mut scratch = board;
    let result = search::best_move(&mut scratch, mover);

    let Some(best) = result.position else {
        let verdict = match board.winner() {
            Some(winner) => format!("{winner} has already won"),
            None => "drawn".to_string(),
        };
        println!("State is terminal: {verdict}.");
        return Ok(());
    };

    output::print_kv("To move", &mover.to_string());
    output::print_kv(
        "Value",
        &format!("{} ({:+})", score_label(result.score), result.score.value()),
    );
    output::print_kv(
        "Best move",
        &format!("position {best} (row {}, col {})", best / 3, best % 3),
    );

    let equivalent: Vec<String> = search::evaluate_moves(&mut scratch, mover)
        .into_iter()
        .filter(|&(_, score)| score == result.score)
        .map(|(pos, _)| pos.to_string())
        .collect();
    output::print_kv("Equivalent moves", &equivalent.join(", "));

    for player in [Player::X, Player::O] {
        let mut threats: Vec<usize> = LineAnalyzer::winning_moves(board.cells(), player)
            .into_iter()
            .collect();
        if !threats.is_empty() {
            threats.sort_unstable();
            let listed: Vec<String> = threats.iter().map(|p| p.to_string()).collect();
            output::print_kv(&format!("{player} wins next at"), &listed.join(", "));
        }
    }

    Ok(())
}

fn score_label(score: Score) -> &'static str {
    match score {
        Score::Win => "win",
        Score::Draw => "draw",
        Score::Loss => "loss",
    }
}

#[derive(Serialize)]
struct PolicyExport {
    description: &'static str,
    total_states: usize,
    policy: HashMap<String, PolicyEntry>,
}

#[derive(Serialize)]
struct PolicyEntry {
    to_move: Player,
    value: i32,
    best_moves: Vec<usize>,
}

/// Walk every state reachable from the empty board breadth-first and record
/// the exact value and all minimax-equivalent moves for the mark to move.
fn export_policy(path: &Path) -> Result<usize> {
    let mut policy = HashMap::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    queue.push_back((Board::new(), Player::X));
    visited.insert(Board::new().encode());

    while let Some((board, mover)) = queue.pop_front() {
        if board.is_terminal() {
            continue;
        }

        let mut scratch = board;
        let evaluations = search::evaluate_moves(&mut scratch, mover);
        let best_value = evaluations
            .iter()
            .map(|&(_, score)| score)
            .max()
            .context("non-terminal state must have legal moves")?;
        let best_moves: Vec<usize> = evaluations
            .iter()
            .filter(|&&(_, score)| score == best_value)
            .map(|&(pos, _)| pos)
            .collect();

        policy.insert(
            board.encode(),
            PolicyEntry {
                to_move: mover,
                value: best_value.value(),
                best_moves,
            },
        );

        for pos in board.empty_positions() {
            let mut next = board;
            next.place(pos, mover)?;
            if visited.insert(next.encode()) {
                queue.push_back((next, mover.opponent()));
            }
        }
    }

    let total = policy.len();
    let export = PolicyExport {
        description: "Exact minimax policy for Tic-Tac-Toe",
        total_states: total,
        policy,
    };

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &export)?;

    Ok(total)
}
