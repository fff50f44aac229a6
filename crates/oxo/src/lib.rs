//! oxo - play noughts and crosses against a perfect-play engine.
//!
//! # Architecture
//!
//! - **CLI**: clap argument definitions ([`Cli`], [`Command`])
//! - **Config**: TOML settings ([`Settings`])
//! - **Play**: terminal loops for interactive play, analysis and
//!   self-play, written against `BufRead`/`Write`
//!
//! The rules and the search live in `oxo_engine`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod play;

pub use cli::{Cli, Command, Opponent};
pub use config::{ConfigError, Settings, DEFAULT_CONFIG_PATH};
pub use play::{run_analyze, run_play, run_selfplay, Tally};
