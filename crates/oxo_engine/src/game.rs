//! Phase-specific typestate structs for a human-versus-engine game.
//!
//! Each phase is its own type. A `GameFinished` ALWAYS has an outcome,
//! and only a `GameInProgress` accepts moves.

use super::action::{Move, MoveError};
use super::contracts::{Contract, LegalMove, MoveContract};
use super::rules::classify;
use super::search::best_move;
use super::{Board, GameResult, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Player),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - ready to start.
///
/// The board is always empty.
#[derive(Debug, Clone)]
pub struct GameSetup {
    board: Board,
}

impl GameSetup {
    /// Creates a new game in setup phase.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts the game with the human playing `human`; the engine plays
    /// the other mark. X always moves first.
    #[instrument(skip(self))]
    pub fn start(self, human: Player) -> GameInProgress {
        info!(%human, engine = %human.opponent(), "Game started");
        GameInProgress {
            board: self.board,
            history: Vec::new(),
            to_move: Player::X,
            human,
        }
    }
}

impl Default for GameSetup {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - can accept moves.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) to_move: Player,
    pub(crate) human: Player,
}

impl GameInProgress {
    /// Checks a move against the preconditions without applying it.
    ///
    /// # Errors
    ///
    /// [`MoveError::IllegalMove`] for an occupied square and
    /// [`MoveError::WrongPlayer`] for a move out of turn.
    pub fn validate(&self, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, self)
    }

    /// Makes a move, consuming self and transitioning to next state.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always
    /// - Postconditions checked in debug builds only
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn make_move(self, action: Move) -> Result<GameTransition, MoveError> {
        MoveContract::pre(&self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut game = self;
        game.board = game.board.place(action.position, action.player)?;
        game.history.push(action);
        game.to_move = game.to_move.opponent();
        debug!(%action, "Move applied");

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &game)?;

        match classify(&game.board) {
            GameResult::Win(winner) => {
                info!(%winner, moves = game.history.len(), "Game won");
                return Ok(GameTransition::Finished(game.finish(Outcome::Winner(winner))));
            }
            GameResult::Draw => {
                info!(moves = game.history.len(), "Game drawn");
                return Ok(GameTransition::Finished(game.finish(Outcome::Draw)));
            }
            GameResult::Ongoing => {}
        }

        Ok(GameTransition::InProgress(game))
    }

    /// Places the current player's mark at `position`.
    pub fn play(self, position: Position) -> Result<GameTransition, MoveError> {
        let action = Move::new(self.to_move, position);
        self.make_move(action)
    }

    /// Lets the engine choose and play its move.
    ///
    /// Returns the move played together with the next state.
    ///
    /// # Errors
    ///
    /// [`MoveError::WrongPlayer`] if it is the human's turn.
    #[instrument(skip(self), fields(engine = %self.engine()))]
    pub fn engine_move(self) -> Result<(Move, GameTransition), MoveError> {
        let engine = self.engine();
        if self.to_move != engine {
            return Err(MoveError::WrongPlayer(engine));
        }

        // An in-progress board is never finished, so the search always has a move.
        let position = best_move(&self.board, engine).map_err(|_| MoveError::GameOver)?;
        let action = Move::new(engine, position);
        info!(%action, "Engine chose move");

        let next = self.make_move(action)?;
        Ok((action, next))
    }

    /// Returns the current player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the human's mark.
    pub fn human(&self) -> Player {
        self.human
    }

    /// Returns the engine's mark.
    pub fn engine(&self) -> Player {
        self.human.opponent()
    }

    /// True when the engine is to move.
    pub fn is_engine_turn(&self) -> bool {
        self.to_move == self.engine()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns valid positions.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Replays moves from initial state.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(human: Player, moves: &[Move]) -> Result<GameTransition, MoveError> {
        let mut game = GameSetup::new().start(human);

        for action in moves {
            match game.make_move(*action)? {
                GameTransition::InProgress(g) => game = g,
                GameTransition::Finished(g) => return Ok(GameTransition::Finished(g)),
            }
        }

        Ok(GameTransition::InProgress(game))
    }

    fn finish(self, outcome: Outcome) -> GameFinished {
        GameFinished {
            board: self.board,
            history: self.history,
            human: self.human,
            outcome,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
#[derive(Debug, Clone)]
pub struct GameFinished {
    board: Board,
    history: Vec<Move>,
    human: Player,
    outcome: Outcome,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the human's mark.
    pub fn human(&self) -> Player {
        self.human
    }

    /// True if the engine won.
    pub fn engine_won(&self) -> bool {
        self.outcome.winner() == Some(self.human.opponent())
    }

    /// Restarts the game (consumes finished, returns setup).
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug)]
pub enum GameTransition {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
