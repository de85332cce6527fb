use regex::Regex;
use shakmaty::Color;
use std::sync::LazyLock;

/// Marker preceding an engine evaluation inside a PGN comment.
pub const EVAL_MARKER: &str = "%eval ";

/// Evaluations are clamped to +/- ten pawns before scoring.
pub const EVAL_CLAMP_CENTIPAWNS: f64 = 1000.0;

static PAWN_SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid pawn score regex")
});

/// An engine evaluation from White's point of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Centipawns(f64),
    /// Forced mate for `winner`. The distance to mate is not kept.
    Mate { winner: Color },
}

impl Evaluation {
    /// Score in centipawns; a mate sits on the clamp boundary of the mating side.
    pub fn centipawns(self) -> f64 {
        match self {
            Self::Centipawns(cp) => cp,
            Self::Mate { winner } => winner.fold_wb(EVAL_CLAMP_CENTIPAWNS, -EVAL_CLAMP_CENTIPAWNS),
        }
    }

    pub fn clamped(self) -> f64 {
        clamp_centipawns(self.centipawns())
    }
}

pub fn clamp_centipawns(value: f64) -> f64 {
    value.clamp(-EVAL_CLAMP_CENTIPAWNS, EVAL_CLAMP_CENTIPAWNS)
}

/// Extract the `[%eval ...]` value from a comment.
///
/// Lichess writes plain scores in pawns (`%eval 0.25`, `%eval -1.8`) and mates
/// as `%eval #3` / `%eval #-1`. Returns `None` when the marker is missing or
/// the score does not parse.
pub fn evaluate(annotation: &str) -> Option<Evaluation> {
    let start = annotation.find(EVAL_MARKER)? + EVAL_MARKER.len();
    let rest = &annotation[start..];

    if let Some(mate) = rest.strip_prefix('#') {
        let winner = if mate.starts_with('-') {
            Color::Black
        } else {
            Color::White
        };
        return Some(Evaluation::Mate { winner });
    }

    let numeral = PAWN_SCORE_RE.captures(rest)?.get(1)?.as_str();
    let pawns: f64 = numeral.parse().ok()?;
    if !pawns.is_finite() {
        return None;
    }

    Some(Evaluation::Centipawns(pawns * 100.0))
}
