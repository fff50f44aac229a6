//! Exhaustive minimax search.
//!
//! The search walks the whole game tree below a position. Every recursive
//! call receives its own copy of the board with the trial move applied, so
//! there is nothing to undo and the caller's board is never touched.
//!
//! Terminal values are fixed: a win for the maximizing side is [`WIN`], a
//! loss is [`LOSS`], a draw is [`DRAW`], whatever the depth. The engine
//! therefore has no preference between a quick win and a slow one.

use super::contracts::BoardConsistent;
use super::rules::classify;
use super::{Board, GameResult, Player, Position, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Value of a position won by the maximizing side.
pub const WIN: i8 = 1;
/// Value of a drawn position.
pub const DRAW: i8 = 0;
/// Value of a position won by the minimizing side.
pub const LOSS: i8 = -1;

/// Error returned when a search cannot choose a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// The board is already won or drawn, so there is no move to choose.
    #[display("No legal moves: game is already decided ({})", _0)]
    NoLegalMoves(GameResult),

    /// The mark counts cannot come from alternating play with X first.
    #[display("Invalid board: {} X marks and {} O marks", x_count, o_count)]
    InvalidBoard {
        /// Number of X marks.
        x_count: usize,
        /// Number of O marks.
        o_count: usize,
    },
}

impl std::error::Error for SearchError {}

/// Result of searching every legal move at the root.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Analysis {
    /// The side the search maximizes for, which is also the side to move.
    maximizer: Player,
    /// First move, in row-major order, with the greatest value.
    best: Position,
    /// Game-theoretic value of the position after `best`.
    value: i8,
    /// Value of every legal move, in row-major order.
    scores: Vec<(Position, i8)>,
    /// Number of positions visited.
    nodes: u64,
}

/// Recursive evaluator; one per root call.
struct Minimax {
    maximizer: Player,
    nodes: u64,
}

impl Minimax {
    fn new(maximizer: Player) -> Self {
        Self {
            maximizer,
            nodes: 0,
        }
    }

    fn value(&mut self, board: Board, to_move: Player) -> i8 {
        self.nodes += 1;

        match classify(&board) {
            GameResult::Win(winner) if winner == self.maximizer => return WIN,
            GameResult::Win(_) => return LOSS,
            GameResult::Draw => return DRAW,
            GameResult::Ongoing => {}
        }

        let maximizing = to_move == self.maximizer;
        let mut best = if maximizing { LOSS } else { WIN };
        for pos in board.legal_moves() {
            let mut child = board;
            child.set(pos, Square::Occupied(to_move));
            let score = self.value(child, to_move.opponent());
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}

/// Game-theoretic value of `board` with `to_move` to play, from
/// `maximizer`'s point of view.
///
/// Always one of [`WIN`], [`DRAW`] or [`LOSS`]. Finished boards are scored
/// directly; this function never fails.
#[instrument(skip(board), fields(empty = board.empty_count()))]
pub fn evaluate(board: &Board, to_move: Player, maximizer: Player) -> i8 {
    let mut search = Minimax::new(maximizer);
    let value = search.value(*board, to_move);
    debug!(value, nodes = search.nodes, "Position evaluated");
    value
}

/// Searches every legal move for `maximizer`, who is to move.
///
/// # Errors
///
/// Returns [`SearchError::InvalidBoard`] if the X count minus the O count
/// is not 0 or 1, and [`SearchError::NoLegalMoves`] if the board is
/// already won or drawn. Callers should check [`classify`] first.
#[instrument(skip(board), fields(empty = board.empty_count()))]
pub fn analyze(board: &Board, maximizer: Player) -> Result<Analysis, SearchError> {
    if !BoardConsistent::holds(board) {
        return Err(SearchError::InvalidBoard {
            x_count: board.count(Player::X),
            o_count: board.count(Player::O),
        });
    }

    let status = classify(board);
    if status.is_terminal() {
        return Err(SearchError::NoLegalMoves(status));
    }

    let mut search = Minimax::new(maximizer);
    let mut scores = Vec::with_capacity(board.empty_count());
    let mut best: Option<(Position, i8)> = None;

    for pos in board.legal_moves() {
        let mut child = *board;
        child.set(pos, Square::Occupied(maximizer));
        let score = search.value(child, maximizer.opponent());
        scores.push((pos, score));

        // Strictly greater keeps the first move on ties.
        if best.is_none_or(|(_, value)| score > value) {
            best = Some((pos, score));
        }
    }

    // An ongoing board always has at least one empty square.
    let (best, value) = best.ok_or(SearchError::NoLegalMoves(status))?;
    debug!(%best, value, nodes = search.nodes, "Search complete");

    Ok(Analysis {
        maximizer,
        best,
        value,
        scores,
        nodes: search.nodes,
    })
}

/// Chooses the optimal move for `maximizer`, who is to move.
///
/// Ties go to the first optimal move in row-major order, so the result is
/// reproducible for a given board.
///
/// # Errors
///
/// Returns [`SearchError::InvalidBoard`] for impossible mark counts and
/// [`SearchError::NoLegalMoves`] if the board is already won or drawn.
#[instrument(skip(board))]
pub fn best_move(board: &Board, maximizer: Player) -> Result<Position, SearchError> {
    analyze(board, maximizer).map(|analysis| analysis.best)
}
