//! Card, board and score formatters for terminal display.
//!
//! Suits print as ♥ ♦ ♣ ♠ where the terminal is known to render them and as
//! h d c s otherwise, so card codes stay copy-pasteable into `play` commands.
//!
//! ```rust
//! use ofc_engine::cards::Card;
//! use ofc_cli::formatters::format_cards;
//!
//! let cards: Vec<Card> = vec!["As".parse().unwrap(), "Td".parse().unwrap()];
//! let s = format_cards(&cards);
//! assert!(s == "[A♠ T♦]" || s == "[As Td]");
//! ```

use std::fmt::Write as _;

use ofc_engine::board::{Board, Row};
use ofc_engine::cards::Card;
use ofc_engine::game::{HandResult, StreetProgress};
use ofc_engine::scoring::{BoardResult, ScoreResult};

/// Windows consoles other than Windows Terminal or VS Code get ASCII suits.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_card(card: &Card) -> String {
    let suit = if supports_unicode() {
        card.suit.glyph()
    } else {
        card.suit.letter()
    };
    format!("{}{}", card.rank.symbol(), suit)
}

/// Bracketed, space-separated cards; `[]` when empty.
pub fn format_cards(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Three lines, top first, each padded to the row's capacity with `--`.
pub fn format_board(board: &Board) -> String {
    let mut s = String::new();
    for row in Row::ALL {
        let cards = board.row(row);
        let mut slots: Vec<String> = cards.iter().map(format_card).collect();
        slots.resize(row.capacity(), "--".to_string());
        let _ = writeln!(s, "  {:<6} {}", row.label(), slots.join(" "));
    }
    s
}

/// Per-row hand names and royalties for a finished board.
pub fn format_board_result(result: &BoardResult) -> String {
    let mut s = String::new();
    for row in Row::ALL {
        let r = result.row(row);
        let _ = writeln!(
            s,
            "  {:<6} {:<15} royalty {}",
            row.label(),
            r.evaluation.category.name(),
            r.royalty
        );
    }
    if result.fouled {
        s.push_str("  FOULED (royalties forfeited)\n");
    } else {
        let _ = writeln!(s, "  royalties total {}", result.total);
    }
    s
}

pub fn format_score(score: &ScoreResult) -> String {
    format!(
        "lines: top {:+} middle {:+} bottom {:+} | scoop {:+} | royalties {} vs {} | points {:+} / {:+}",
        score.lines.top,
        score.lines.middle,
        score.lines.bottom,
        score.scoop_bonus,
        score.royalties_a,
        score.royalties_b,
        score.points_a,
        score.points_b
    )
}

pub fn format_progress(progress: &StreetProgress) -> String {
    match progress.requirement {
        Some(req) => format!(
            "Street {}: {} | placed {}/{} discarded {}/{} | in hand {}",
            progress.street,
            req.describe(),
            progress.placed_now,
            req.place,
            progress.discarded_now,
            req.discard,
            progress.pool_remaining
        ),
        None => format!(
            "Fantasyland: set all 13 cards | burned {} | in hand {}",
            progress.discarded_now, progress.pool_remaining
        ),
    }
}

/// Summary printed once a hand completes, from the player's side.
pub fn format_hand_result(result: &HandResult) -> String {
    let mut s = String::new();
    s.push_str("You:\n");
    s.push_str(&format_board_result(&result.player));
    s.push_str("Opponent:\n");
    s.push_str(&format_board_result(&result.opponent));
    let _ = writeln!(s, "{}", format_score(&result.score));
    if let Some(ticket) = result.next_fantasyland {
        let _ = writeln!(s, "Fantasyland next hand with {} cards!", ticket.cards);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofc_engine::scoring::{evaluate_final_result, score_hand};

    fn ascii(s: &str) -> String {
        s.replace('♠', "s")
            .replace('♥', "h")
            .replace('♦', "d")
            .replace('♣', "c")
    }

    #[test]
    fn partial_board_pads_open_slots() {
        let board = Board::parse("As / Kd Kh / ").unwrap();
        let text = ascii(&format_board(&board));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  Top    As -- --");
        assert_eq!(lines[1], "  Middle Kd Kh -- -- --");
        assert_eq!(lines[2], "  Bottom -- -- -- -- --");
    }

    #[test]
    fn fouled_result_is_flagged() {
        let board = Board::parse("Qs Qh 2d / Ah Jh 8h 5h 2h / Qc Qd Jc Jd 3s").unwrap();
        let text = format_board_result(&evaluate_final_result(&board).unwrap());
        assert!(text.contains("FOULED"));
        assert!(text.contains("Flush"));
    }

    #[test]
    fn score_line_shows_both_totals() {
        let a = Board::parse("As 9h 4c / Ks Kh 8c 5d 2s / Qs Qh Jc Jd 2h").unwrap();
        let b = Board::parse("Kd 9d 3c / Ah Ad 7c 7d 3s / 6s 7h 8d 9s Ts").unwrap();
        let score = score_hand(&a, &b).unwrap();
        let line = format_score(&score);
        assert!(line.contains(&format!("points {:+} / {:+}", score.points_a, score.points_b)));
    }
}
