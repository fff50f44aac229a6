//! Game rules.
//!
//! This module contains pure functions for evaluating board state.
//! Rules are separated from board storage so the search engine and the
//! turn controller share one definition of a finished game.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, LINES};

use super::{Board, GameResult};

/// Classifies a board as ongoing, won or drawn.
///
/// A completed line wins even on a full board.
pub fn classify(board: &Board) -> GameResult {
    if let Some(winner) = check_winner(board) {
        GameResult::Win(winner)
    } else if is_full(board) {
        GameResult::Draw
    } else {
        GameResult::Ongoing
    }
}
