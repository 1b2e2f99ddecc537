//! Command-line interface for perfect_tictactoe.

use clap::{Parser, Subcommand};
use perfect_tictactoe::{GameMode, PlayConfig, SearchKind};
use std::path::PathBuf;

/// Perfect Tic-Tac-Toe - play against a computer that never loses
#[derive(Parser, Debug)]
#[command(name = "perfect_tictactoe")]
#[command(about = "Tic-tac-toe with a perfect computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML). Missing files fall back to defaults.
    #[arg(long, global = true, default_value = "perfect_tictactoe.toml")]
    pub config: PathBuf,

    /// Mode of the first game
    #[arg(long, global = true)]
    pub mode: Option<GameMode>,

    /// Pause before each computer move, in milliseconds
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Search used by the computer (exhaustive or alpha_beta)
    #[arg(long, global = true)]
    pub search: Option<SearchKind>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Let the computer play both sides and print the result
    Selfplay,
}

impl Cli {
    /// Applies command-line overrides on top of file settings.
    pub fn apply(&self, config: PlayConfig) -> PlayConfig {
        let mut config = config;
        if let Some(mode) = self.mode {
            config = config.with_mode(mode);
        }
        if let Some(delay) = self.delay_ms {
            config = config.with_ai_delay_ms(delay);
        }
        if let Some(search) = self.search {
            config = config.with_search(search);
        }
        config
    }

    /// The requested command, `play` when none is given.
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_play() {
        let cli = Cli::parse_from(["perfect_tictactoe"]);
        assert_eq!(cli.command(), Command::Play);
        assert_eq!(cli.apply(PlayConfig::default()), PlayConfig::default());
    }

    #[test]
    fn test_flags_override_file_settings() {
        let cli = Cli::parse_from([
            "perfect_tictactoe",
            "selfplay",
            "--search",
            "exhaustive",
            "--mode",
            "two_player",
            "--delay-ms",
            "0",
        ]);
        assert_eq!(cli.command(), Command::Selfplay);

        let config = cli.apply(PlayConfig::default());
        assert_eq!(*config.search(), SearchKind::Exhaustive);
        assert_eq!(*config.mode(), GameMode::TwoPlayer);
        assert_eq!(*config.ai_delay_ms(), 0);
    }

    #[test]
    fn test_unknown_search_rejected() {
        assert!(Cli::try_parse_from(["perfect_tictactoe", "--search", "random"]).is_err());
    }
}
