use super::config::RankConfig;
use super::error::RankError;
use super::log;
use super::ranker::{Ranker, ScoredGame};

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use zstd::stream::read::Decoder as ZstdDecoder;

pub type PgnInput = Box<dyn Read + Send>;

/// Path argument that means "read standard input".
pub const STDIN_PATH: &str = "-";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompressionMode {
    #[default]
    Plain,
    Zstd,
}

impl CompressionMode {
    pub fn parse(raw: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(
                "Invalid compression value ''. Supported values: 'zstd' or omitted."
                    .to_string()
                    .into(),
            );
        }

        if normalized.eq_ignore_ascii_case("zstd") {
            Ok(Self::Zstd)
        } else {
            Err(format!(
                "Invalid compression value '{}'. Supported values: 'zstd' or omitted.",
                normalized
            )
            .into())
        }
    }
}

/// Expand `pattern` into input paths: a glob when it contains `*` or `?`,
/// otherwise the single path as given.
pub fn resolve_paths(pattern: &str) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if pattern.contains('*') || pattern.contains('?') {
        let paths: Vec<PathBuf> = glob::glob(pattern)?
            .filter_map(|entry| entry.ok())
            .collect();
        if paths.is_empty() {
            return Err(format!("No files match pattern '{}'", pattern).into());
        }
        Ok(paths)
    } else {
        Ok(vec![PathBuf::from(pattern)])
    }
}

fn wrap_decoder(
    input: PgnInput,
    compression: CompressionMode,
    label: &str,
) -> Result<PgnInput, String> {
    match compression {
        CompressionMode::Plain => Ok(input),
        CompressionMode::Zstd => ZstdDecoder::new(input)
            .map(|decoder| Box::new(decoder) as PgnInput)
            .map_err(|e| format!("Failed to initialize zstd decoder for '{}': {}", label, e)),
    }
}

pub fn open_input_stream(path: &PathBuf, compression: CompressionMode) -> Result<PgnInput, String> {
    if path.as_os_str() == STDIN_PATH {
        return wrap_decoder(Box::new(io::stdin()), compression, "<stdin>");
    }

    let file =
        File::open(path).map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;
    wrap_decoder(Box::new(file), compression, &path.display().to_string())
}

/// Rank the games of `username` across `paths`.
///
/// Each file is split on its own so records never straddle two files. A file
/// that cannot be opened is fatal when it is the only input and skipped with a
/// warning otherwise. Read errors while streaming are always fatal.
pub fn rank_paths(
    paths: &[PathBuf],
    compression: CompressionMode,
    username: &str,
    config: &RankConfig,
) -> Result<Vec<ScoredGame>, Box<dyn std::error::Error>> {
    let mut ranker = Ranker::new(username, config.min_plies);

    for path in paths {
        if config
            .max_games
            .is_some_and(|max| ranker.stats().records >= max)
        {
            break;
        }

        let input = match open_input_stream(path, compression) {
            Ok(input) => input,
            Err(err_msg) => {
                if paths.len() == 1 {
                    return Err(err_msg.into());
                }
                log::warn(&err_msg);
                continue;
            }
        };

        ranker
            .consume(input, config)
            .map_err(|e: RankError| format!("Failed to read '{}': {}", path.display(), e))?;
    }

    let stats = ranker.stats();
    log::info(format!(
        "Ranked {} of {} records for '{}' from {} file(s) ({} malformed)",
        stats.scored,
        stats.records,
        username,
        paths.len(),
        stats.malformed
    ));

    let mut games = ranker.finish();
    if let Some(max) = config.max_results {
        games.truncate(max);
    }
    Ok(games)
}
