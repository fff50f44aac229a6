//! Noughts-and-crosses rules and a perfect-play engine.
//!
//! # Architecture
//!
//! - **Board state**: [`Board`], [`Square`], [`Position`] and the pure
//!   [`rules`] (`classify`, win and draw detection)
//! - **Search**: exhaustive minimax ([`evaluate`], [`best_move`],
//!   [`analyze`]) behind the [`Strategy`] trait
//! - **Turn controller**: typestate game ([`GameSetup`] →
//!   [`GameInProgress`] → [`GameFinished`]) guarded by [`contracts`]
//!
//! # Example
//!
//! ```
//! use oxo_engine::{best_move, classify, Board, GameResult, Player, Position};
//!
//! let board: Board = "XX. .O. ...".parse()?;
//! assert_eq!(classify(&board), GameResult::Ongoing);
//! assert_eq!(best_move(&board, Player::X)?, Position::TopRight);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod game;
mod position;
pub mod rules;
mod search;
mod strategy;
mod types;

pub use action::{Move, MoveError};
pub use game::{GameFinished, GameInProgress, GameSetup, GameTransition, Outcome};
pub use position::Position;
pub use rules::classify;
pub use search::{analyze, best_move, evaluate, Analysis, SearchError, DRAW, LOSS, WIN};
pub use strategy::{FirstAvailable, PerfectPlay, Strategy};
pub use types::{Board, GameResult, ParseBoardError, ParsePlayerError, Player, Square};

/// Every empty square of `board`, in row-major order.
pub fn legal_moves(board: &Board) -> Vec<Position> {
    board.legal_moves()
}

/// Returns `board` with `mark` placed at `position`.
///
/// # Errors
///
/// Returns [`MoveError::IllegalMove`] if the square is occupied.
pub fn place(board: &Board, position: Position, mark: Player) -> Result<Board, MoveError> {
    board.place(position, mark)
}
