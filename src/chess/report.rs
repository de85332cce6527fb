use super::ranker::ScoredGame;

use chrono::NaiveDate;
use serde_json::{Value, json};
use std::fmt::Write;

/// Shown instead of a table when nothing could be ranked.
pub const NO_GAMES_MESSAGE: &str = "No games found. Make sure the username is correct and that games with computer analysis are available.";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Presentation view of one ranked game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRow {
    pub rank: usize,
    pub game_id: String,
    pub acpl: f64,
    pub date: String,
    pub white: String,
    pub white_elo: String,
    pub black: String,
    pub black_elo: String,
    pub result_white: String,
    pub result_black: String,
    pub opening: String,
    /// Full moves, i.e. plies / 2.
    pub moves: usize,
    pub url: String,
}

impl GameRow {
    pub fn from_scored(rank: usize, scored: &ScoredGame) -> Self {
        let game = &scored.game;

        let result = match game.tag_value("Result") {
            "" => game.outcome.as_deref().unwrap_or(""),
            tag => tag,
        };
        let (result_white, result_black) = result.split_once('-').unwrap_or((result, ""));

        let date = match game.tag_value("Date") {
            "" => game.tag_value("UTCDate"),
            tag => tag,
        };

        let opening = game.tag_value("Opening");
        let opening = opening.split_once(',').map_or(opening, |(family, _)| family);

        Self {
            rank,
            game_id: game.tag_value("GameId").to_string(),
            acpl: scored.acpl,
            date: format_date(date),
            white: game.tag_value("White").to_string(),
            white_elo: game.tag_value("WhiteElo").to_string(),
            black: game.tag_value("Black").to_string(),
            black_elo: game.tag_value("BlackElo").to_string(),
            result_white: result_white.to_string(),
            result_black: result_black.to_string(),
            opening: opening.trim().to_string(),
            moves: game.plies() / 2,
            url: game.tag_value("Site").to_string(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "rank": self.rank,
            "game_id": self.game_id,
            "acpl": self.acpl,
            "date": self.date,
            "white": self.white,
            "white_elo": self.white_elo,
            "black": self.black,
            "black_elo": self.black_elo,
            "result_white": self.result_white,
            "result_black": self.result_black,
            "opening": self.opening,
            "moves": self.moves,
            "url": self.url,
        })
    }
}

/// `2024.03.07` -> `Mar 7, 2024`. Unknown or partial dates render empty.
pub fn format_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y.%m.%d")
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Rows for already sorted games, ranked from 1.
pub fn build_rows(games: &[ScoredGame]) -> Vec<GameRow> {
    games
        .iter()
        .enumerate()
        .map(|(idx, scored)| GameRow::from_scored(idx + 1, scored))
        .collect()
}

pub fn rows_to_json(rows: &[GameRow]) -> String {
    let rows: Vec<Value> = rows.iter().map(GameRow::to_json).collect();
    serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
}

fn player(name: &str, elo: &str) -> String {
    if elo.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({elo})")
    }
}

pub fn rows_to_text(rows: &[GameRow]) -> String {
    if rows.is_empty() {
        return NO_GAMES_MESSAGE.to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>7}  {:<12}  {:<24}  {:<24}  {:<9}  {:>5}  {:<32}  {}",
        "#", "ACPL", "Date", "White", "Black", "Result", "Moves", "Opening", "URL"
    );

    for row in rows {
        let result = if row.result_black.is_empty() {
            row.result_white.clone()
        } else {
            format!("{}-{}", row.result_white, row.result_black)
        };
        let _ = writeln!(
            out,
            "{:>4}  {:>7.1}  {:<12}  {:<24}  {:<24}  {:<9}  {:>5}  {:<32}  {}",
            row.rank,
            row.acpl,
            row.date,
            player(&row.white, &row.white_elo),
            player(&row.black, &row.black_elo),
            result,
            row.moves,
            row.opening,
            row.url
        );
    }

    out
}

pub fn render(games: &[ScoredGame], format: OutputFormat) -> String {
    let rows = build_rows(games);
    match format {
        OutputFormat::Text => rows_to_text(&rows),
        OutputFormat::Json => rows_to_json(&rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::visitor::parse_game;

    const LICHESS_GAME: &str = r#"[Event "Rated Blitz game"]
[Site "https://lichess.org/abcd1234"]
[Date "2024.03.07"]
[White "alice"]
[Black "bob"]
[Result "1/2-1/2"]
[GameId "abcd1234"]
[WhiteElo "1850"]
[BlackElo "1902"]
[Opening "Sicilian Defense: Najdorf Variation, English Attack"]

1. e4 { [%eval 0.3] } c5 { [%eval 0.3] } 2. Nf3 { [%eval 0.2] } d6 { [%eval 0.3] } 1/2-1/2"#;

    fn scored(pgn: &str, acpl: f64) -> ScoredGame {
        ScoredGame {
            game: parse_game(pgn).unwrap(),
            acpl,
        }
    }

    #[test]
    fn test_game_row_from_lichess_headers() {
        let row = GameRow::from_scored(1, &scored(LICHESS_GAME, 12.5));

        assert_eq!(row.rank, 1);
        assert_eq!(row.game_id, "abcd1234");
        assert_eq!(row.date, "Mar 7, 2024");
        assert_eq!(row.white, "alice");
        assert_eq!(row.white_elo, "1850");
        assert_eq!(row.black_elo, "1902");
        assert_eq!(row.result_white, "1/2");
        assert_eq!(row.result_black, "1/2");
        assert_eq!(row.opening, "Sicilian Defense: Najdorf Variation");
        assert_eq!(row.moves, 2);
        assert_eq!(row.url, "https://lichess.org/abcd1234");
    }

    #[test]
    fn test_game_row_missing_headers_fall_back() {
        let pgn = r#"[White "alice"]
[Black "bob"]
[UTCDate "2023.12.31"]

1. e4 e5 2. Nf3 0-1"#;
        let row = GameRow::from_scored(3, &scored(pgn, 0.0));

        assert_eq!(row.date, "Dec 31, 2023");
        assert_eq!(row.result_white, "0");
        assert_eq!(row.result_black, "1");
        assert_eq!(row.opening, "");
        assert_eq!(row.game_id, "");
        assert_eq!(row.moves, 1);
    }

    #[test]
    fn test_format_date_unknown_parts_render_empty() {
        assert_eq!(format_date("2024.01.05"), "Jan 5, 2024");
        assert_eq!(format_date("2024.??.??"), "");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_build_rows_ranks_from_one() {
        let games = vec![scored(LICHESS_GAME, 3.0), scored(LICHESS_GAME, 9.0)];
        let rows = build_rows(&games);
        assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_rows_to_json_shape() {
        let rows = build_rows(&[scored(LICHESS_GAME, 12.5)]);
        let parsed: Value = serde_json::from_str(&rows_to_json(&rows)).unwrap();

        assert_eq!(parsed[0]["rank"], 1);
        assert_eq!(parsed[0]["acpl"], 12.5);
        assert_eq!(parsed[0]["white"], "alice");
        assert_eq!(parsed[0]["opening"], "Sicilian Defense: Najdorf Variation");
    }

    #[test]
    fn test_rows_to_json_empty() {
        assert_eq!(rows_to_json(&[]), "[]");
    }

    #[test]
    fn test_rows_to_text_lists_games() {
        let text = render(&[scored(LICHESS_GAME, 12.5)], OutputFormat::Text);
        assert!(text.contains("alice (1850)"));
        assert!(text.contains("12.5"));
        assert!(text.contains("1/2-1/2"));
    }

    #[test]
    fn test_rows_to_text_empty_shows_hint() {
        assert_eq!(render(&[], OutputFormat::Text), NO_GAMES_MESSAGE);
    }
}
