//! Tests for the terminal front end, driven through in-memory buffers.

use oxo::{run_analyze, run_play, run_selfplay, Opponent, Settings};
use oxo_engine::{Outcome, Player, Position};
use std::io::Cursor;

fn play(settings: &Settings, input: &str) -> (oxo::Tally, String) {
    let mut input = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    let tally = run_play(settings, &mut input, &mut out).unwrap();
    (tally, String::from_utf8(out).unwrap())
}

#[test]
fn test_engine_punishes_careless_play() {
    // X: TopLeft, TopCenter, MiddleLeft. The engine takes the centre,
    // blocks at TopRight and completes the TopRight-BottomLeft diagonal.
    let (tally, out) = play(&Settings::default(), "1\n2\n4\nq\n");
    assert_eq!(*tally.engine_wins(), 1);
    assert_eq!(*tally.human_wins(), 0);
    assert!(out.contains("Engine plays Center (1, 1)"), "{out}");
    assert!(out.contains("Engine plays Top-right (0, 2)"), "{out}");
    assert!(out.contains("Engine wins!"), "{out}");
}

#[test]
fn test_bad_input_is_reported_and_retried() {
    let (tally, out) = play(&Settings::default(), "banana\n1\n1\n5\nq\n");
    assert_eq!(tally, oxo::Tally::default());
    assert!(out.contains("Unrecognized move \"banana\""), "{out}");
    assert!(out.contains("Square Top-left (0, 0) is already occupied"), "{out}");
    assert!(out.contains("Square Center (1, 1) is already occupied"), "{out}");
}

#[test]
fn test_restart_mid_game() {
    let (tally, out) = play(&Settings::default(), "1\nr\n9\nq\n");
    assert_eq!(tally, oxo::Tally::default());
    assert!(out.contains("Restarting."), "{out}");
    assert_eq!(out.matches("Engine plays").count(), 2);
}

#[test]
fn test_engine_opens_when_human_is_o() {
    let settings = Settings::default().with_human(Player::O).with_show_scores(true);
    let (_, out) = play(&settings, "q\n");
    assert!(out.contains("You are O"), "{out}");
    assert!(out.contains("Engine plays Top-left (0, 0)"), "{out}");
}

#[test]
fn test_end_of_input_stops_cleanly() {
    let (tally, _) = play(&Settings::default(), "");
    assert_eq!(tally, oxo::Tally::default());
}

#[test]
fn test_play_again_counts_games() {
    let (tally, _) = play(&Settings::default(), "1\n2\n4\nr\n1\n2\n4\nq\n");
    assert_eq!(*tally.engine_wins(), 2);
}

#[test]
fn test_analyze_json() {
    // O to move by the mark counts; blocking the top row draws.
    let board = "XX. .O. ...".parse().unwrap();
    let mut out = Vec::new();
    let analysis = run_analyze(&board, None, true, &mut out).unwrap();
    assert_eq!(*analysis.best(), Position::TopRight);

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["best"], "TopRight");
    assert_eq!(json["value"], 0);
    assert_eq!(json["maximizer"], "O");
}

#[test]
fn test_analyze_finished_board_fails() {
    let board = "XXX OO. ...".parse().unwrap();
    let mut out = Vec::new();
    assert!(run_analyze(&board, None, false, &mut out).is_err());
}

#[test]
fn test_analyze_impossible_board_fails() {
    // Two O marks and no X marks cannot arise with X moving first.
    let board = "OO. ... ...".parse().unwrap();
    let mut out = Vec::new();
    let err = run_analyze(&board, None, false, &mut out).unwrap_err();
    assert!(err.to_string().contains("Invalid board"), "{err}");
    assert!(out.is_empty());
}

#[test]
fn test_selfplay() {
    let mut out = Vec::new();
    let outcome = run_selfplay(Opponent::Minimax.strategy().as_ref(), Player::O, &mut out).unwrap();
    assert_eq!(outcome, Outcome::Draw);

    let mut out = Vec::new();
    let outcome = run_selfplay(Opponent::First.strategy().as_ref(), Player::O, &mut out).unwrap();
    assert_eq!(outcome, Outcome::Winner(Player::O));
}
