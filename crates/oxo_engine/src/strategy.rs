//! Move-selection strategies.

use super::search::{best_move, SearchError};
use super::rules::classify;
use super::{Board, Player, Position};
use tracing::{debug, instrument};

/// Something that picks a move for a side.
pub trait Strategy {
    /// Chooses a move for `side`, who is to move on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoLegalMoves`] when the board is finished.
    fn choose(&self, board: &Board, side: Player) -> Result<Position, SearchError>;

    /// Returns the strategy's display name.
    fn name(&self) -> &str;
}

/// Exhaustive minimax: never loses.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerfectPlay;

impl Strategy for PerfectPlay {
    #[instrument(skip(self, board))]
    fn choose(&self, board: &Board, side: Player) -> Result<Position, SearchError> {
        best_move(board, side)
    }

    fn name(&self) -> &str {
        "minimax"
    }
}

/// Picks the first empty square in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl Strategy for FirstAvailable {
    #[instrument(skip(self, board))]
    fn choose(&self, board: &Board, side: Player) -> Result<Position, SearchError> {
        let status = classify(board);
        if status.is_terminal() {
            return Err(SearchError::NoLegalMoves(status));
        }
        let pos = Position::valid_moves(board)
            .first()
            .copied()
            .ok_or(SearchError::NoLegalMoves(status))?;
        debug!(%side, %pos, "First available square");
        Ok(pos)
    }

    fn name(&self) -> &str {
        "first"
    }
}
