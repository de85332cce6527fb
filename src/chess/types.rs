use shakmaty::Color;
use shakmaty::san::SanPlus;
use smallvec::SmallVec;

/// Comments attached to one ply, in the order they appear.
pub type Annotations = SmallVec<[String; 2]>;

/// A PGN header pair. Duplicated keys are kept in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One game as read from a PGN record: headers, mainline moves and the
/// comments following each move.
#[derive(Debug, Clone, Default)]
pub struct ParsedGame {
    pub tags: Vec<Tag>,
    pub moves: Vec<SanPlus>,
    /// Parallel to `moves`; entry `i` holds the comments after ply `i`.
    pub annotations: Vec<Annotations>,
    /// Movetext termination marker (`1-0`, `0-1`, `1/2-1/2`, `*`).
    pub outcome: Option<String>,
}

impl ParsedGame {
    /// Value of the first tag named `key`, or `""`.
    pub fn tag_value(&self, key: &str) -> &str {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
            .unwrap_or("")
    }

    /// Number of half-moves on the mainline.
    pub fn plies(&self) -> usize {
        self.moves.len()
    }

    /// The comment that counts for `ply`: the last one written after it.
    pub fn effective_annotation(&self, ply: usize) -> Option<&str> {
        self.annotations.get(ply)?.last().map(String::as_str)
    }

    /// Side matching `username` (case-insensitive), White first.
    pub fn side_of(&self, username: &str) -> Option<Color> {
        if names_match(self.tag_value("White"), username) {
            Some(Color::White)
        } else if names_match(self.tag_value("Black"), username) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.moves.is_empty()
    }
}

fn names_match(tag: &str, username: &str) -> bool {
    tag.eq_ignore_ascii_case(username) || tag.to_lowercase() == username.to_lowercase()
}

/// Free-function form of [`ParsedGame::tag_value`] for presentation code.
pub fn tag_value<'a>(game: &'a ParsedGame, key: &str) -> &'a str {
    game.tag_value(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with_tags(tags: &[(&str, &str)]) -> ParsedGame {
        ParsedGame {
            tags: tags.iter().map(|(k, v)| Tag::new(*k, *v)).collect(),
            ..ParsedGame::default()
        }
    }

    #[test]
    fn test_tag_value_returns_first_match() {
        let game = game_with_tags(&[("Event", "First"), ("Event", "Second")]);
        assert_eq!(game.tag_value("Event"), "First");
        assert_eq!(tag_value(&game, "Event"), "First");
    }

    #[test]
    fn test_tag_value_missing_is_empty() {
        let game = game_with_tags(&[("White", "alice")]);
        assert_eq!(game.tag_value("Opening"), "");
        // Keys are case-sensitive.
        assert_eq!(game.tag_value("white"), "");
    }

    #[test]
    fn test_side_of_is_case_insensitive() {
        let game = game_with_tags(&[("White", "Alice"), ("Black", "BOB")]);
        assert_eq!(game.side_of("alice"), Some(Color::White));
        assert_eq!(game.side_of("bob"), Some(Color::Black));
        assert_eq!(game.side_of("carol"), None);
    }

    #[test]
    fn test_side_of_folds_non_ascii_names() {
        let game = game_with_tags(&[("White", "Ærøskøbing"), ("Black", "bob")]);
        assert_eq!(game.side_of("ærØSKØBING"), Some(Color::White));
    }

    #[test]
    fn test_side_of_self_play_prefers_white() {
        let game = game_with_tags(&[("White", "alice"), ("Black", "Alice")]);
        assert_eq!(game.side_of("ALICE"), Some(Color::White));
    }

    #[test]
    fn test_side_of_empty_username_does_not_match_named_players() {
        let game = game_with_tags(&[("White", "alice"), ("Black", "bob")]);
        assert_eq!(game.side_of(""), None);
    }

    #[test]
    fn test_effective_annotation_is_last_comment() {
        let mut game = ParsedGame::default();
        game.annotations.push(Annotations::new());
        game.annotations
            .push(["[%eval 0.1]".to_string(), "[%eval 0.4]".to_string()].into_iter().collect());

        assert_eq!(game.effective_annotation(0), None);
        assert_eq!(game.effective_annotation(1), Some("[%eval 0.4]"));
        assert_eq!(game.effective_annotation(7), None);
    }
}
