//! Parsing of the interactive `play` commands.

use ofc_engine::board::Row;
use ofc_engine::cards::Card;

/// One line typed at the `play` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Place(Card, Row),
    Move(Card, Row),
    Return(Card),
    Discard(Card),
    /// Declare the street (or Fantasyland board)
    Done,
    Show,
    Help,
}

/// Result type for parsing user input at the prompt.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(PlayCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

pub const PLAY_HELP: &str = "Commands: place <card> <top|mid|bot>, move <card> <row>, return <card>, discard <card>, done, show, help, q";

/// Parses one prompt line (case-insensitive keywords).
///
/// ```rust
/// # use ofc_cli::validation::{parse_play_command, ParseResult, PlayCommand};
/// use ofc_engine::board::Row;
///
/// assert_eq!(
///     parse_play_command("p As bot"),
///     ParseResult::Command(PlayCommand::Place("As".parse().unwrap(), Row::Bottom))
/// );
/// assert_eq!(parse_play_command("quit"), ParseResult::Quit);
/// assert!(matches!(parse_play_command("fold"), ParseResult::Invalid(_)));
/// ```
pub fn parse_play_command(input: &str) -> ParseResult {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };
    let keyword = first.to_ascii_lowercase();
    let args = &parts[1..];

    match keyword.as_str() {
        "q" | "quit" | "exit" => ParseResult::Quit,
        "done" | "d" | "next" => ParseResult::Command(PlayCommand::Done),
        "show" | "s" => ParseResult::Command(PlayCommand::Show),
        "help" | "h" | "?" => ParseResult::Command(PlayCommand::Help),
        "place" | "p" => card_and_row(args, "place").map_or_else(ParseResult::Invalid, |(c, r)| {
            ParseResult::Command(PlayCommand::Place(c, r))
        }),
        "move" | "mv" => card_and_row(args, "move").map_or_else(ParseResult::Invalid, |(c, r)| {
            ParseResult::Command(PlayCommand::Move(c, r))
        }),
        "return" | "r" => single_card(args, "return")
            .map_or_else(ParseResult::Invalid, |c| ParseResult::Command(PlayCommand::Return(c))),
        "discard" | "x" => single_card(args, "discard")
            .map_or_else(ParseResult::Invalid, |c| ParseResult::Command(PlayCommand::Discard(c))),
        other => ParseResult::Invalid(format!("Unrecognized command '{}'. {}", other, PLAY_HELP)),
    }
}

fn card_and_row(args: &[&str], verb: &str) -> Result<(Card, Row), String> {
    let [card, row] = args else {
        return Err(format!("Usage: {} <card> <top|mid|bot>", verb));
    };
    let card = card.parse::<Card>().map_err(|e| e.to_string())?;
    let row = row.parse::<Row>()?;
    Ok((card, row))
}

fn single_card(args: &[&str], verb: &str) -> Result<Card, String> {
    let [card] = args else {
        return Err(format!("Usage: {} <card>", verb));
    };
    card.parse::<Card>().map_err(|e| e.to_string())
}
