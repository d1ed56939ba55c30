//! Exhaustive minimax search for the optimal move
//!
//! The engine explores every legal continuation to a terminal state, so the
//! value it reports is exact. There is no pruning, depth limit, or heuristic:
//! the 3x3 board is small enough that full-depth search completes in
//! negligible time.

use serde::{Deserialize, Serialize};

use crate::board::{Board, CELL_COUNT, Player};

/// Game-theoretic value of a position from the perspective of the mark about
/// to move. The derived ordering (`Loss < Draw < Win`) is what the search
/// maximizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Score {
    Loss,
    Draw,
    Win,
}

impl Score {
    /// Numeric projection: Win = +1, Draw = 0, Loss = -1
    pub fn value(self) -> i32 {
        match self {
            Score::Loss => -1,
            Score::Draw => 0,
            Score::Win => 1,
        }
    }

    /// Reframe a score computed for one mark into its opponent's perspective
    pub fn flip(self) -> Score {
        match self {
            Score::Loss => Score::Win,
            Score::Draw => Score::Draw,
            Score::Win => Score::Loss,
        }
    }
}

/// Result of a search: the exact value of the position and the move that
/// achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Value of the position for the mark the search was asked about
    pub score: Score,
    /// Optimal cell index, or `None` when the position is already terminal
    /// and there is no move to make
    pub position: Option<usize>,
}

impl SearchResult {
    fn terminal(score: Score) -> Self {
        SearchResult {
            score,
            position: None,
        }
    }
}

/// Compute the optimal move for `mover` assuming both sides play perfectly.
///
/// The recursion alternates perspective purely by symbol negation: each level
/// maximizes for the mark passed in, and a child's score is reframed via
/// [`Score::flip`] into the parent's frame. Ties are broken by the
/// first-encountered (lowest) cell index, so the result is deterministic.
///
/// The board is mutably borrowed for exploration only — every placement is
/// undone on the same path, and the board is cell-for-cell identical to its
/// input state when the call returns.
///
/// Calling on an already-decided board is not an error: the matching base
/// case reports the verdict with `position: None`, which drivers must treat
/// as "do not attempt to apply a move".
pub fn best_move(board: &mut Board, mover: Player) -> SearchResult {
    // A completed line is checked from the perspective of whoever is about to
    // move: under alternation only the previous mover can have one, which
    // reads as a loss here. The mover's own line is checked for robustness on
    // boards supplied directly by callers.
    if board.has_won(mover.opponent()) {
        return SearchResult::terminal(Score::Loss);
    }
    if board.has_won(mover) {
        return SearchResult::terminal(Score::Win);
    }
    if board.is_full() {
        return SearchResult::terminal(Score::Draw);
    }

    let mut best_score = Score::Loss;
    let mut best_position = None;

    for pos in 0..CELL_COUNT {
        if !board.is_empty(pos) {
            continue;
        }

        board
            .place(pos, mover)
            .expect("placing on a cell just verified empty should not fail");
        let reply = best_move(board, mover.opponent());
        board.clear(pos);

        let score = reply.score.flip();
        if best_position.is_none() || score > best_score {
            best_score = score;
            best_position = Some(pos);
        }
    }

    SearchResult {
        score: best_score,
        position: best_position,
    }
}

/// Evaluate every legal move for `mover`, pairing each empty cell index with
/// the exact value of playing there.
///
/// Returns an empty vector when the game is already decided (a win exists or
/// no cell is empty). Ascending position order.
pub fn evaluate_moves(board: &mut Board, mover: Player) -> Vec<(usize, Score)> {
    let mut evaluations = Vec::new();
    if board.winner().is_some() {
        return evaluations;
    }

    for pos in 0..CELL_COUNT {
        if !board.is_empty(pos) {
            continue;
        }

        board
            .place(pos, mover)
            .expect("placing on a cell just verified empty should not fail");
        let reply = best_move(board, mover.opponent());
        board.clear(pos);

        evaluations.push((pos, reply.score.flip()));
    }

    evaluations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_winning_move() {
        // XX.
        // OO.
        // ...
        let mut board = Board::from_string("XX.OO....").unwrap();
        let result = best_move(&mut board, Player::X);

        assert_eq!(result.position, Some(2), "X should complete the top row");
        assert_eq!(result.score, Score::Win);
    }

    #[test]
    fn blocks_opponent_win() {
        // X has two on the top row; O has no win of its own and must block
        let mut board = Board::from_string("XX....O..").unwrap();
        let result = best_move(&mut board, Player::O);

        assert_eq!(result.position, Some(2), "O should block at position 2");
    }

    #[test]
    fn prefers_win_over_block() {
        // Both sides threaten a row; the mover takes its own win
        let mut board = Board::from_string("XX.OO..X.").unwrap();
        let result = best_move(&mut board, Player::O);

        assert_eq!(result.position, Some(5), "O should win, not block");
        assert_eq!(result.score, Score::Win);
    }

    #[test]
    fn terminal_board_yields_no_move() {
        // X already has the top row; from O's perspective this is a loss
        let mut board = Board::from_string("XXXOO....").unwrap();
        let result = best_move(&mut board, Player::O);

        assert_eq!(result.score, Score::Loss);
        assert_eq!(result.position, None);
    }

    #[test]
    fn won_board_scores_win_for_the_winner() {
        let mut board = Board::from_string("XXXOO....").unwrap();
        let result = best_move(&mut board, Player::X);

        assert_eq!(result.score, Score::Win);
        assert_eq!(result.position, None);
    }

    #[test]
    fn last_cell_draw() {
        // XOX
        // OXO
        // OX. — O fills the last cell without completing a line
        let mut board = Board::from_string("XOXOXOOX.").unwrap();
        let result = best_move(&mut board, Player::O);

        assert_eq!(result.position, Some(8));
        assert_eq!(result.score, Score::Draw);
    }

    #[test]
    fn corner_opening_edge_reply_is_lost_for_o() {
        // After X takes a corner, only the center reply holds the draw; an
        // adjacent edge loses to a fork, and exhaustive search proves it
        let mut board = Board::from_string("XO.......").unwrap();
        let evaluations = evaluate_moves(&mut board, Player::X);

        assert_eq!(evaluations.len(), 7);
        let winning: Vec<usize> = evaluations
            .iter()
            .filter(|(_, score)| *score == Score::Win)
            .map(|(pos, _)| *pos)
            .collect();
        assert!(!winning.is_empty(), "X should have a forced win");

        let best = best_move(&mut board, Player::X);
        assert_eq!(best.score, Score::Win);
        assert_eq!(best.position, winning.first().copied());
    }

    #[test]
    fn evaluate_moves_empty_for_decided_board() {
        let mut board = Board::from_string("XXXOO....").unwrap();
        assert!(evaluate_moves(&mut board, Player::O).is_empty());
    }

    #[test]
    fn score_ordering_and_values() {
        assert!(Score::Loss < Score::Draw);
        assert!(Score::Draw < Score::Win);
        assert_eq!(Score::Win.value(), 1);
        assert_eq!(Score::Draw.value(), 0);
        assert_eq!(Score::Loss.value(), -1);
        assert_eq!(Score::Win.flip(), Score::Loss);
        assert_eq!(Score::Draw.flip(), Score::Draw);
    }
}
