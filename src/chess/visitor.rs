use super::error::ParseError;
use super::types::{Annotations, ParsedGame, Tag};

use pgn_reader::{Outcome, RawComment, RawTag, Reader, SanPlus, Skip, Visitor};
use std::io;
use std::ops::ControlFlow;

/// PGN visitor (pgn-reader) collecting everything the ranker needs.
///
/// Tags are kept in file order. Each mainline SAN opens a new ply slot and
/// every `{ ... }` comment that follows is attached to that ply (trimmed).
/// Comments before the first move, NAGs and variations are dropped.
///
/// Comments longer than the reader's token buffer arrive in chunks through
/// `partial_comment`; they are stitched back together so one `{ ... }` is
/// always one annotation.
#[derive(Debug, Default)]
pub struct GameVisitor {
    pending_comment: Vec<u8>,
}

impl GameVisitor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visitor for GameVisitor {
    type Tags = Vec<Tag>;
    type Movetext = ParsedGame;
    type Output = ParsedGame;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(Vec::new())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        tags.push(Tag {
            key: String::from_utf8_lossy(key).into_owned(),
            value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        });
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(ParsedGame {
            tags,
            ..ParsedGame::default()
        })
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, game: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        game.moves.push(san);
        game.annotations.push(Annotations::new());
        ControlFlow::Continue(())
    }

    fn partial_comment(
        &mut self,
        _: &mut Self::Movetext,
        comment: RawComment<'_>,
    ) -> ControlFlow<Self::Output> {
        self.pending_comment.extend_from_slice(comment.as_bytes());
        ControlFlow::Continue(())
    }

    fn comment(
        &mut self,
        game: &mut Self::Movetext,
        comment: RawComment<'_>,
    ) -> ControlFlow<Self::Output> {
        let mut bytes = std::mem::take(&mut self.pending_comment);
        bytes.extend_from_slice(comment.as_bytes());

        if let Some(slot) = game.annotations.last_mut() {
            let text = String::from_utf8_lossy(&bytes);
            slot.push(text.trim().to_string());
        }
        ControlFlow::Continue(())
    }

    fn outcome(&mut self, game: &mut Self::Movetext, outcome: Outcome) -> ControlFlow<Self::Output> {
        game.outcome = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, game: Self::Movetext) -> Self::Output {
        game
    }
}

/// Parse the first game in `text`.
///
/// Records without any tag or move are rejected as [`ParseError::NoGame`].
pub fn parse_game(text: &str) -> Result<ParsedGame, ParseError> {
    let mut reader = Reader::new(io::Cursor::new(text.as_bytes()));
    let mut visitor = GameVisitor::new();

    match reader.read_game(&mut visitor) {
        Ok(Some(game)) if game.is_empty() => Err(ParseError::NoGame),
        Ok(Some(game)) => Ok(game),
        Ok(None) => Err(ParseError::NoGame),
        Err(e) => Err(ParseError::Reader(e)),
    }
}
