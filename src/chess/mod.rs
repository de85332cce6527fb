mod config;
mod error;
mod eval;
pub mod log;
mod ranker;
pub mod reader;
pub mod report;
mod split;
mod types;
mod visitor;

pub use config::{DEFAULT_MAX_GAMES, DEFAULT_MAX_RESULTS, RankConfig};
pub use error::{ParseError, RankError};
pub use eval::{EVAL_CLAMP_CENTIPAWNS, EVAL_MARKER, Evaluation, clamp_centipawns, evaluate};
pub use ranker::{RankStats, Ranker, ScoredGame, compute_acpl, move_loss, rank, rank_with_config};
pub use split::{RECORD_DELIMITER, RecordSplitter};
pub use types::{Annotations, ParsedGame, Tag, tag_value};
pub use visitor::{GameVisitor, parse_game};
