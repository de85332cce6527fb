//! Rank a player's annotated PGN games by average centipawn loss (ACPL).
//!
//! Games are read as a stream of PGN records separated by two blank lines,
//! parsed with `pgn-reader`, and scored from the lichess-style `[%eval ...]`
//! comments attached to each move.

mod chess;

pub use chess::*;
