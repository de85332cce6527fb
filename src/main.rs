use chess_acpl::RankConfig;
use chess_acpl::log;
use chess_acpl::reader::{CompressionMode, rank_paths, resolve_paths};
use chess_acpl::report::{OutputFormat, render};
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "chess-acpl")]
#[command(about = "Rank a player's analysed games by average centipawn loss")]
struct Cli {
    /// Player whose moves are scored (matched against White/Black, case-insensitive)
    username: String,
    /// PGN file, glob pattern, or `-` for stdin
    input: String,
    /// Only keep games of at least this many plies
    #[arg(long, default_value_t = 0, conflicts_with = "exclude_miniatures")]
    min_plies: usize,
    /// Skip games shorter than 20 moves
    #[arg(long)]
    exclude_miniatures: bool,
    /// Stop after this many games (0 reads everything)
    #[arg(long, default_value_t = chess_acpl::DEFAULT_MAX_GAMES)]
    max_games: usize,
    /// Number of ranked games to print (0 prints all)
    #[arg(long, default_value_t = chess_acpl::DEFAULT_MAX_RESULTS)]
    max_results: usize,
    /// Reject single records larger than this many bytes
    #[arg(long)]
    max_record_bytes: Option<usize>,
    /// Input compression (`zstd`)
    #[arg(long)]
    compression: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Cli {
    fn rank_config(&self) -> RankConfig {
        let min_plies = if self.exclude_miniatures {
            RankConfig::MINIATURE_PLIES
        } else {
            self.min_plies
        };

        RankConfig {
            min_plies,
            max_games: (self.max_games > 0).then_some(self.max_games),
            max_results: (self.max_results > 0).then_some(self.max_results),
            max_record_bytes: self.max_record_bytes,
        }
    }

    fn compression(&self) -> Result<CompressionMode, Box<dyn Error>> {
        match self.compression.as_deref() {
            None => Ok(CompressionMode::Plain),
            Some(raw) => CompressionMode::parse(raw),
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.rank_config();
    let compression = cli.compression()?;
    let paths = resolve_paths(&cli.input)?;

    let games = rank_paths(&paths, compression, &cli.username, &config)?;
    println!("{}", render(&games, cli.format));
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error(format!("Failed to retrieve games: {}", err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_rank_config_defaults() {
        let cli = Cli::parse_from(["chess-acpl", "alice", "games.pgn"]);
        assert_eq!(cli.rank_config(), RankConfig::default());
        assert_eq!(cli.compression().unwrap(), CompressionMode::Plain);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_exclude_miniatures_sets_min_plies() {
        let cli = Cli::parse_from(["chess-acpl", "alice", "games.pgn", "--exclude-miniatures"]);
        assert_eq!(cli.rank_config().min_plies, RankConfig::MINIATURE_PLIES);
    }

    #[test]
    fn test_cli_zero_caps_mean_unbounded() {
        let cli = Cli::parse_from([
            "chess-acpl",
            "alice",
            "-",
            "--max-games",
            "0",
            "--max-results",
            "0",
            "--min-plies",
            "10",
        ]);
        assert_eq!(cli.rank_config(), RankConfig::unbounded(10));
    }

    #[test]
    fn test_cli_rejects_unknown_compression() {
        let cli = Cli::parse_from(["chess-acpl", "alice", "games.pgn", "--compression", "gzip"]);
        assert!(cli.compression().is_err());
    }

    #[test]
    fn test_cli_min_plies_conflicts_with_exclude_miniatures() {
        let result = Cli::try_parse_from([
            "chess-acpl",
            "alice",
            "games.pgn",
            "--min-plies",
            "10",
            "--exclude-miniatures",
        ]);
        assert!(result.is_err());
    }
}
