use super::config::RankConfig;
use super::error::RankError;
use super::eval::evaluate;
use super::log;
use super::split::RecordSplitter;
use super::types::ParsedGame;
use super::visitor::parse_game;

use shakmaty::Color;
use std::io::Read;

/// A game together with the tracked player's average centipawn loss.
#[derive(Debug, Clone)]
pub struct ScoredGame {
    pub game: ParsedGame,
    pub acpl: f64,
}

/// Counters for one ranking pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankStats {
    /// Non-blank records pulled from the input.
    pub records: usize,
    pub malformed: usize,
    pub scored: usize,
}

/// Loss of a move that took the evaluation from `before` to `after`, seen
/// from `side`. Improvements count as zero.
pub fn move_loss(before: f64, after: f64, side: Color) -> f64 {
    let swing = before - after;
    side.fold_wb(swing, -swing).max(0.0)
}

/// Average centipawn loss of `side` over its evaluated moves.
///
/// Every evaluated ply becomes the baseline for the next one, whoever moved;
/// only `side`'s plies with a baseline before them are scored. Plies without a
/// readable `%eval` leave the baseline untouched. `None` when nothing could be
/// scored.
pub fn compute_acpl(game: &ParsedGame, side: Color) -> Option<f64> {
    let mut total_loss = 0.0;
    let mut scored_plies = 0usize;
    let mut baseline: Option<f64> = None;

    for ply in 0..game.plies() {
        let Some(annotation) = game.effective_annotation(ply) else {
            continue;
        };
        let Some(eval) = evaluate(annotation) else {
            continue;
        };
        let current = eval.clamped();

        let mover = Color::from_white(ply % 2 == 0);
        if mover == side
            && let Some(before) = baseline
        {
            total_loss += move_loss(before, current, side);
            scored_plies += 1;
        }

        baseline = Some(current);
    }

    (scored_plies > 0).then(|| total_loss / scored_plies as f64)
}

/// Incremental ranking over record texts.
///
/// Feed records with [`Ranker::push_record`] (or whole streams with
/// [`Ranker::consume`]) and collect the sorted games with [`Ranker::finish`].
pub struct Ranker {
    username: String,
    min_plies: usize,
    games: Vec<ScoredGame>,
    stats: RankStats,
}

impl Ranker {
    pub fn new(username: impl Into<String>, min_plies: usize) -> Self {
        Self {
            username: username.into(),
            min_plies,
            games: Vec::new(),
            stats: RankStats::default(),
        }
    }

    pub fn stats(&self) -> RankStats {
        self.stats
    }

    /// Score one record. Returns `true` when it produced a ranked game.
    pub fn push_record(&mut self, record: &str) -> bool {
        if record.trim().is_empty() {
            return false;
        }
        self.stats.records += 1;

        let game = match parse_game(record) {
            Ok(game) => game,
            Err(err) => {
                self.stats.malformed += 1;
                log::debug(format!(
                    "Skipping record {}: {}",
                    self.stats.records, err
                ));
                return false;
            }
        };

        let Some(side) = game.side_of(&self.username) else {
            return false;
        };

        if game.plies() < self.min_plies {
            return false;
        }

        let Some(acpl) = compute_acpl(&game, side) else {
            return false;
        };

        self.stats.scored += 1;
        self.games.push(ScoredGame { game, acpl });
        true
    }

    /// Split `input` into records and score them, honoring `max_games` and
    /// `max_record_bytes`. A read error is returned after every record that
    /// could still be split has been scored.
    pub fn consume<R: Read>(&mut self, input: R, config: &RankConfig) -> Result<(), RankError> {
        let mut splitter = RecordSplitter::new(input).with_max_record_len(config.max_record_bytes);

        while !config
            .max_games
            .is_some_and(|max| self.stats.records >= max)
        {
            let Some(record) = splitter.next() else {
                break;
            };
            self.push_record(&record);
        }

        match splitter.take_error() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Games sorted by ACPL, most accurate first. Ties keep input order.
    pub fn finish(self) -> Vec<ScoredGame> {
        let mut games = self.games;
        games.sort_by(|a, b| a.acpl.total_cmp(&b.acpl));
        games
    }
}

/// Rank every game of `username` in `input` by average centipawn loss.
pub fn rank<R: Read>(
    input: R,
    username: &str,
    min_plies: usize,
) -> Result<Vec<ScoredGame>, RankError> {
    rank_with_config(input, username, &RankConfig::unbounded(min_plies))
}

/// [`rank`] with record and result caps.
pub fn rank_with_config<R: Read>(
    input: R,
    username: &str,
    config: &RankConfig,
) -> Result<Vec<ScoredGame>, RankError> {
    let mut ranker = Ranker::new(username, config.min_plies);
    ranker.consume(input, config)?;

    let stats = ranker.stats();
    log::info(format!(
        "Ranked {} of {} records for '{}' ({} malformed)",
        stats.scored, stats.records, username, stats.malformed
    ));

    let mut games = ranker.finish();
    if let Some(max) = config.max_results {
        games.truncate(max);
    }
    Ok(games)
}
