use std::io;
use thiserror::Error;

/// Failure of a whole ranking call.
///
/// Only the underlying byte stream can fail a ranking; per-record problems are
/// absorbed inside the pass.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("Failed to read game stream: {0}")]
    Read(#[from] io::Error),
}

/// A record the PGN reader could not turn into a game.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parser-stage error: stage=read_game; error={0}")]
    Reader(#[source] io::Error),
    #[error("Record contains no game")]
    NoGame,
}

#[cfg(test)]
mod tests {
    use super::{ParseError, RankError};
    use std::io;

    #[test]
    fn test_rank_error_wraps_io_error() {
        let err: RankError = io::Error::other("connection reset").into();
        assert_eq!(
            err.to_string(),
            "Failed to read game stream: connection reset"
        );
    }

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::Reader(io::Error::new(io::ErrorKind::InvalidData, "bad token"));
        assert!(err.to_string().contains("stage=read_game"));
        assert!(err.to_string().contains("bad token"));
        assert_eq!(ParseError::NoGame.to_string(), "Record contains no game");
    }
}
