//! Command-line configuration

use crate::game::session::MAX_PLAYERS;
use crate::game::DEFAULT_RACK_SIZE;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "scrawl", about = "A terminal crossword tile game")]
pub struct Args {
    /// Comma-separated player names, in seating order
    #[arg(short, long, value_delimiter = ',', default_value = "Player 1,Player 2")]
    pub players: Vec<String>,

    /// Number of tiles each rack is refilled to
    #[arg(short, long, default_value_t = DEFAULT_RACK_SIZE)]
    pub rack_size: usize,

    /// Word list: one word per line, or a JSON array if the file ends in .json
    /// (defaults to the list built into the binary)
    #[arg(short, long)]
    pub dictionary: Option<PathBuf>,

    /// SQLite database for scores and the saved session
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start a new game instead of resuming the saved one
    #[arg(long, default_value_t = false)]
    pub fresh: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Where to write the log (defaults to scrawl.log in the data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("at least one player is required")]
    NoPlayers,
    #[error("{found} players given, at most {max} can play")]
    TooManyPlayers { found: usize, max: usize },
    #[error("player names must be unique ({0} appears twice)")]
    DuplicatePlayer(String),
    #[error("rack size must be at least 1")]
    EmptyRack,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub players: Vec<String>,
    pub rack_size: usize,
    pub dictionary: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub seed: Option<u64>,
    pub fresh: bool,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let players: Vec<String> = args
            .players
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        if players.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        if players.len() > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers {
                found: players.len(),
                max: MAX_PLAYERS,
            });
        }
        for (i, name) in players.iter().enumerate() {
            if players[..i].contains(name) {
                return Err(ConfigError::DuplicatePlayer(name.clone()));
            }
        }
        if args.rack_size == 0 {
            return Err(ConfigError::EmptyRack);
        }

        Ok(Config {
            players,
            rack_size: args.rack_size,
            dictionary: args.dictionary,
            database: args.database,
            seed: args.seed,
            fresh: args.fresh,
            log_level: args.log_level,
            log_file: args.log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Config, ConfigError> {
        let args = Args::try_parse_from(std::iter::once("scrawl").chain(argv.iter().copied()))
            .unwrap();
        Config::try_from(args)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.players, vec!["Player 1", "Player 2"]);
        assert_eq!(config.rack_size, 7);
        assert_eq!(config.dictionary, None);
        assert_eq!(config.database, None);
        assert!(!config.fresh);
        assert_eq!(config.log_level, LevelFilter::INFO);
    }

    #[test]
    fn test_player_list() {
        let config = parse(&["--players", "Alice, Bob ,Carol"]).unwrap();
        assert_eq!(config.players, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_player_limits() {
        assert_eq!(parse(&["--players", " , "]), Err(ConfigError::NoPlayers));
        assert_eq!(
            parse(&["--players", "a,b,c,d,e"]),
            Err(ConfigError::TooManyPlayers { found: 5, max: 4 })
        );
        assert_eq!(
            parse(&["--players", "a,b,a"]),
            Err(ConfigError::DuplicatePlayer("a".to_string()))
        );
    }

    #[test]
    fn test_rack_size() {
        assert_eq!(parse(&["--rack-size", "0"]), Err(ConfigError::EmptyRack));
        assert_eq!(parse(&["-r", "9"]).unwrap().rack_size, 9);
    }

    #[test]
    fn test_paths_and_flags() {
        let config = parse(&[
            "--database",
            "/tmp/s.db",
            "--dictionary",
            "words.json",
            "--seed",
            "42",
            "--fresh",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/tmp/s.db")));
        assert_eq!(config.dictionary, Some(PathBuf::from("words.json")));
        assert_eq!(config.seed, Some(42));
        assert!(config.fresh);
        assert_eq!(config.log_level, LevelFilter::DEBUG);
    }
}
