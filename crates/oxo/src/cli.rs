//! Command-line interface for oxo.

use clap::{Parser, Subcommand, ValueEnum};
use oxo_engine::{Board, FirstAvailable, PerfectPlay, Player, Strategy};

/// oxo - noughts and crosses against an engine that never loses
#[derive(Parser, Debug)]
#[command(name = "oxo")]
#[command(about = "Noughts and crosses with a perfect-play engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./oxo.toml if present)
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the engine on the terminal
    Play {
        /// Mark you play (X moves first); overrides the config file
        #[arg(long)]
        human: Option<Player>,

        /// Show the engine's score for every candidate move
        #[arg(long)]
        scores: bool,
    },

    /// Print the engine's verdict on a board
    Analyze {
        /// Nine cells in row-major order, e.g. "XX./.O./..."
        board: Board,

        /// Side to move (defaults to the side implied by the mark counts)
        #[arg(long)]
        side: Option<Player>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the engine play a full game against a built-in opponent
    Selfplay {
        /// Opponent strategy
        #[arg(long, value_enum, default_value_t = Opponent::Minimax)]
        opponent: Opponent,

        /// Mark the engine plays
        #[arg(long, default_value = "O")]
        engine: Player,
    },
}

/// Built-in opponents for `selfplay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Opponent {
    /// Another copy of the engine
    Minimax,
    /// Always the first empty square
    First,
}

impl Opponent {
    /// Returns the strategy behind this opponent.
    pub fn strategy(self) -> Box<dyn Strategy> {
        match self {
            Opponent::Minimax => Box::new(PerfectPlay),
            Opponent::First => Box::new(FirstAvailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from(["oxo", "analyze", "XX./.O./...", "--side", "x", "--json"]);
        match cli.command {
            Command::Analyze { board, side, json } => {
                assert_eq!(board, "XX. .O. ...".parse::<Board>().unwrap());
                assert_eq!(side, Some(Player::X));
                assert!(json);
            }
            other => panic!("Unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_play_with_config() {
        let cli = Cli::parse_from(["oxo", "play", "--human", "o", "--config", "my.toml"]);
        assert_eq!(cli.config, Some(std::path::PathBuf::from("my.toml")));
        assert!(matches!(
            cli.command,
            Command::Play { human: Some(Player::O), scores: false }
        ));
    }

    #[test]
    fn test_rejects_bad_board() {
        assert!(Cli::try_parse_from(["oxo", "analyze", "XX"]).is_err());
    }

    #[test]
    fn test_selfplay_defaults() {
        let cli = Cli::parse_from(["oxo", "selfplay"]);
        assert!(matches!(
            cli.command,
            Command::Selfplay { opponent: Opponent::Minimax, engine: Player::O }
        ));
    }
}
