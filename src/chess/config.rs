/// Upper bound on games pulled from one ranking request.
pub const DEFAULT_MAX_GAMES: usize = 1000;
/// Number of ranked games kept for presentation.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Knobs for a ranking call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankConfig {
    /// Games with fewer half-moves are ignored.
    pub min_plies: usize,
    /// Stop after this many non-blank records (`None` reads the whole stream).
    pub max_games: Option<usize>,
    /// Keep only the best `n` games after sorting.
    pub max_results: Option<usize>,
    /// Reject records larger than this many bytes.
    pub max_record_bytes: Option<usize>,
}

impl RankConfig {
    /// "Exclude miniatures" threshold: twenty full moves.
    pub const MINIATURE_PLIES: usize = 40;

    /// No caps at all, only the ply filter.
    pub fn unbounded(min_plies: usize) -> Self {
        Self {
            min_plies,
            max_games: None,
            max_results: None,
            max_record_bytes: None,
        }
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            min_plies: 0,
            max_games: Some(DEFAULT_MAX_GAMES),
            max_results: Some(DEFAULT_MAX_RESULTS),
            max_record_bytes: None,
        }
    }
}
