//! Contract-based validation for the turn controller.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}

use super::action::{Move, MoveError};
use super::game::GameInProgress;
use super::{Board, Player};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with [`MoveError::IllegalMove`] on an occupied square.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if !game.board().is_empty(mov.position) {
            Err(MoveError::IllegalMove(mov.position))
        } else {
            Ok(())
        }
    }
}

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`MoveError::WrongPlayer`] when the mover is out of turn.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if mov.player != game.to_move() {
            Err(MoveError::WrongPlayer(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: the square is empty and it's the player's turn.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        SquareIsEmpty::check(mov, game)?;
        PlayersTurn::check(mov, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Invariants
// ─────────────────────────────────────────────────────────────

/// Invariant: X moves first and turns alternate, so the X count minus
/// the O count is always 0 or 1.
pub struct BoardConsistent;

impl BoardConsistent {
    /// Returns true if the mark counts are consistent with alternating play.
    #[instrument(skip(board))]
    pub fn holds(board: &Board) -> bool {
        let x_count = board.count(Player::X);
        let o_count = board.count(Player::O);

        let valid = x_count == o_count || x_count == o_count + 1;
        if !valid {
            warn!(x_count, o_count, "Board consistency violated");
        }
        valid
    }
}

/// Invariant: History replays to the board and to the side to move.
pub struct HistoryConsistent;

impl HistoryConsistent {
    /// Returns true if the history alternates from X and matches the board.
    #[instrument(skip(game))]
    pub fn holds(game: &GameInProgress) -> bool {
        let mut board = Board::new();
        let mut expected = Player::X;
        for mov in game.history() {
            if mov.player != expected {
                warn!(%mov, "History does not alternate");
                return false;
            }
            board = match board.place(mov.position, mov.player) {
                Ok(next) => next,
                Err(e) => {
                    warn!(%mov, error = %e, "History replays an illegal move");
                    return false;
                }
            };
            expected = expected.opponent();
        }

        let valid = board == *game.board() && expected == game.to_move();
        if !valid {
            warn!(history_len = game.history().len(), "History does not match board");
        }
        valid
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Square must be empty
/// - Must be player's turn
///
/// Postconditions:
/// - Mark counts stay consistent
/// - History remains consistent with board
pub struct MoveContract;

impl Contract<GameInProgress, Move> for MoveContract {
    fn pre(game: &GameInProgress, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(_before: &GameInProgress, after: &GameInProgress) -> Result<(), MoveError> {
        let mut violations = Vec::new();
        if !BoardConsistent::holds(after.board()) {
            violations.push("mark counts differ by more than one");
        }
        if !HistoryConsistent::holds(after) {
            violations.push("history does not match board");
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: {}",
                violations.join("; ")
            )))
        }
    }
}
