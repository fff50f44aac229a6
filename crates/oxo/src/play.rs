//! Terminal front end: interactive play, analysis and self-play.
//!
//! Everything here reads from a `BufRead` and writes to a `Write`, so the
//! loops run the same against stdin/stdout and against in-memory buffers.

use crate::config::Settings;
use anyhow::{Context, Result};
use derive_getters::Getters;
use oxo_engine::{
    analyze, Analysis, Board, GameFinished, GameInProgress, GameSetup, GameTransition, Move,
    Outcome, Player, Position, Strategy,
};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};

/// Running score across games in one `play` session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct Tally {
    /// Games the human won.
    human_wins: u32,
    /// Games the engine won.
    engine_wins: u32,
    /// Drawn games.
    draws: u32,
}

impl Tally {
    fn record(&mut self, finished: &GameFinished) {
        match finished.outcome() {
            Outcome::Draw => self.draws += 1,
            Outcome::Winner(p) if *p == finished.human() => self.human_wins += 1,
            Outcome::Winner(_) => self.engine_wins += 1,
        }
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You {} - Engine {} - Draws {}",
            self.human_wins, self.engine_wins, self.draws
        )
    }
}

/// What the human typed at the move prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Place(Position),
    Restart,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_lowercase().as_str() {
        "q" | "quit" | "exit" => Some(Command::Quit),
        "r" | "restart" | "refresh" => Some(Command::Restart),
        other => Position::parse_input(other).map(Command::Place),
    }
}

/// Reads one line; `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    Ok((read > 0).then_some(line))
}

fn write_scores(out: &mut impl Write, analysis: &Analysis) -> Result<()> {
    for (pos, score) in analysis.scores() {
        writeln!(out, "  {:<20} {:>2}", pos.to_string(), score)?;
    }
    Ok(())
}

/// Interactive game loop: human against the engine, with restart.
///
/// Returns the tally when the human quits or input ends.
#[instrument(skip(input, out))]
pub fn run_play(settings: &Settings, input: &mut impl BufRead, out: &mut impl Write) -> Result<Tally> {
    let human = *settings.human();
    let mut tally = Tally::default();

    writeln!(
        out,
        "You are {}. Enter 1-9, \"row col\" or a name like \"center\"; r restarts, q quits.",
        human
    )?;

    'games: loop {
        let mut game = GameSetup::new().start(human);

        let finished = loop {
            writeln!(out, "\n{}\n", game.board())?;

            let next = if game.is_engine_turn() {
                if *settings.show_scores() {
                    let analysis = analyze(game.board(), game.engine())?;
                    write_scores(out, &analysis)?;
                }
                let (action, next) = game.engine_move()?;
                writeln!(out, "Engine plays {}", action.position())?;
                next
            } else {
                write!(out, "Your move ({}): ", human)?;
                out.flush()?;
                let Some(line) = read_line(input)? else {
                    info!("Input closed");
                    break 'games;
                };
                match parse_command(&line) {
                    Some(Command::Quit) => break 'games,
                    Some(Command::Restart) => {
                        info!("Game restarted");
                        writeln!(out, "Restarting.")?;
                        continue 'games;
                    }
                    Some(Command::Place(pos)) => match human_move(game, pos, out)? {
                        Ok(next) => next,
                        Err(unchanged) => {
                            game = unchanged;
                            continue;
                        }
                    },
                    None => {
                        debug!(input = line.trim(), "Unrecognized input");
                        writeln!(out, "Unrecognized move {:?}.", line.trim())?;
                        continue;
                    }
                }
            };

            match next {
                GameTransition::InProgress(g) => game = g,
                GameTransition::Finished(done) => break done,
            }
        };

        tally.record(&finished);
        writeln!(out, "\n{}\n", finished.board())?;
        writeln!(out, "{}", describe(&finished))?;
        writeln!(out, "{}", tally)?;
        write!(out, "Play again? [r]estart / [q]uit: ")?;
        out.flush()?;

        let again = read_line(input)?
            .and_then(|line| parse_command(&line))
            .is_some_and(|cmd| cmd == Command::Restart);
        if !again {
            break;
        }
    }

    writeln!(out, "\n{}", tally)?;
    Ok(tally)
}

/// Applies a human move, handing the game back unchanged if it is rejected.
fn human_move(
    game: GameInProgress,
    pos: Position,
    out: &mut impl Write,
) -> Result<std::result::Result<GameTransition, GameInProgress>> {
    let action = Move::new(game.to_move(), pos);
    if let Err(e) = game.validate(&action) {
        writeln!(out, "{}.", e)?;
        return Ok(Err(game));
    }
    Ok(Ok(game.make_move(action)?))
}

fn describe(finished: &GameFinished) -> &'static str {
    match finished.outcome() {
        Outcome::Draw => "Draw!",
        Outcome::Winner(p) if *p == finished.human() => "You win!",
        Outcome::Winner(_) => "Engine wins!",
    }
}

/// Prints the engine's verdict on `board` for `side` (or the side to move).
#[instrument(skip(out))]
pub fn run_analyze(board: &Board, side: Option<Player>, json: bool, out: &mut impl Write) -> Result<Analysis> {
    let side = side.unwrap_or_else(|| board.to_move());
    let analysis = analyze(board, side)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&analysis)?)?;
    } else {
        writeln!(out, "{}\n", board)?;
        writeln!(out, "Best move for {}: {}", side, analysis.best())?;
        writeln!(out, "Value: {} ({} positions searched)", analysis.value(), analysis.nodes())?;
        write_scores(out, &analysis)?;
    }
    Ok(analysis)
}

/// Plays one game of the engine, as `engine`, against `opponent`.
#[instrument(skip(opponent, out), fields(opponent = opponent.name()))]
pub fn run_selfplay(opponent: &dyn Strategy, engine: Player, out: &mut impl Write) -> Result<Outcome> {
    let mut game = GameSetup::new().start(engine.opponent());

    let finished = loop {
        let (action, next) = if game.is_engine_turn() {
            game.engine_move()?
        } else {
            let pos = opponent.choose(game.board(), game.to_move())?;
            let action = Move::new(game.to_move(), pos);
            (action, game.make_move(action)?)
        };
        writeln!(out, "{}\n", action)?;

        match next {
            GameTransition::InProgress(g) => {
                writeln!(out, "{}\n", g.board())?;
                game = g;
            }
            GameTransition::Finished(done) => break done,
        }
    };

    writeln!(out, "{}\n", finished.board())?;
    writeln!(out, "{}", finished.outcome())?;
    info!(outcome = %finished.outcome(), "Self-play finished");
    Ok(*finished.outcome())
}
