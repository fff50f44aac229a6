//! Tests for board state: classification, legal moves and placement.

use oxo_engine::rules::LINES;
use oxo_engine::{classify, legal_moves, place, Board, GameResult, MoveError, Player, Position, Square};
use std::collections::HashSet;

#[test]
fn test_every_line_wins_for_either_mark() {
    for line in LINES {
        for mark in [Player::X, Player::O] {
            let mut board = Board::new();
            for pos in line {
                board.set(pos, Square::Occupied(mark));
            }
            assert_eq!(classify(&board), GameResult::Win(mark), "{line:?}");

            // Two opposing marks off the line cannot complete a line.
            let others = Position::ALL.iter().filter(|p| !line.contains(p));
            for pos in others.take(2) {
                board.set(*pos, Square::Occupied(mark.opponent()));
            }
            assert_eq!(classify(&board), GameResult::Win(mark), "{line:?}");
        }
    }
}

#[test]
fn test_full_board_with_a_line_is_a_win() {
    let board: Board = "XXX OOX XOO".parse().unwrap();
    assert_eq!(classify(&board), GameResult::Win(Player::X));
}

#[test]
fn test_full_board_draw() {
    for text in ["XOX OXX OXO", "XXO OOX XOX", "XOX XOO OXX"] {
        let board: Board = text.parse().unwrap();
        assert_eq!(classify(&board), GameResult::Draw, "{text}");
        assert!(legal_moves(&board).is_empty());
    }
}

#[test]
fn test_ongoing() {
    assert_eq!(classify(&Board::new()), GameResult::Ongoing);
    let board: Board = "XO. .X. ..O".parse().unwrap();
    assert_eq!(classify(&board), GameResult::Ongoing);
}

#[test]
fn test_legal_moves_match_empty_squares() {
    let mut board = Board::new();
    let mut to_move = Player::X;
    // Fill the board in a fixed, non-row-major order and check each step.
    let order = [4, 0, 8, 2, 6, 3, 5, 1, 7];
    for (filled, idx) in order.iter().enumerate() {
        let moves = legal_moves(&board);
        assert_eq!(moves.len(), 9 - filled);

        let distinct: HashSet<_> = moves.iter().copied().collect();
        assert_eq!(distinct.len(), moves.len());
        assert!(moves.iter().all(|pos| board.is_empty(*pos)));
        assert!(moves.windows(2).all(|w| w[0] < w[1]), "row-major order");

        let pos = Position::from_index(*idx).unwrap();
        board.set(pos, Square::Occupied(to_move));
        to_move = to_move.opponent();
    }
    assert!(legal_moves(&board).is_empty());
}

#[test]
fn test_place_occupied_is_illegal() {
    let board = place(&Board::new(), Position::Center, Player::X).unwrap();
    assert_eq!(
        place(&board, Position::Center, Player::O),
        Err(MoveError::IllegalMove(Position::Center))
    );
    assert_eq!(
        place(&board, Position::Center, Player::X),
        Err(MoveError::IllegalMove(Position::Center))
    );
}

#[test]
fn test_board_serializes() {
    let board: Board = "X.. .O. ...".parse().unwrap();
    let json = serde_json::to_string(&board).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, board);
}
