//! Score command: head-to-head points for two finished boards.
//!
//! Boards are written `"<top> / <middle> / <bottom>"` with card codes, e.g.
//! `"As Ad 4c / Ks Kh 8c 5d 2s / Qs Qh Jc Jd 2h"`.

use crate::error::CliError;
use crate::formatters::{format_board, format_board_result, format_score};
use crate::ui;
use ofc_engine::board::Board;
use ofc_engine::scoring::{evaluate_final_result, score_hand};
use std::io::Write;

pub fn handle_score_command(
    a: &str,
    b: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let board_a = parse_board(a, "A", err)?;
    let board_b = parse_board(b, "B", err)?;

    let score = match score_hand(&board_a, &board_b) {
        Ok(s) => s,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };

    for (label, board) in [("A", &board_a), ("B", &board_b)] {
        let result = evaluate_final_result(board)?;
        writeln!(out, "Board {}:", label)?;
        write!(out, "{}", format_board(board))?;
        write!(out, "{}", format_board_result(&result))?;
    }
    writeln!(out, "{}", format_score(&score))?;
    Ok(())
}

fn parse_board(text: &str, label: &str, err: &mut dyn Write) -> Result<Board, CliError> {
    match Board::parse(text) {
        Ok(board) => Ok(board),
        Err(e) => {
            let msg = format!("board {}: {}", label, e);
            ui::write_error(err, &msg)?;
            Err(CliError::InvalidInput(msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "As 9h 4c / Ks Kh 8c 5d 2s / Qs Qh Jc Jd 2h";
    const B_FOULED: &str = "Kd 9d 3c / Ah Ad 7c 7d 3s / 6s 7h 8d 9s Kc";

    #[test]
    fn fouled_opponent_loses_every_line() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_score_command(A, B_FOULED, &mut out, &mut err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("FOULED"));
        assert!(text.contains("points +3 / -3"), "{}", text);
    }

    #[test]
    fn short_board_is_rejected() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_score_command(A, "Kd 9d / Ah Ad 7c 7d 3s / 6s 7h 8d 9s Ts", &mut out, &mut err);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(String::from_utf8(err).unwrap().contains("not complete"));
    }

    #[test]
    fn shared_card_is_rejected() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_score_command(A, "As 9d 3c / Ah Ad 7c 7d 3s / 6s 7h 8d 9s Ts", &mut out, &mut err);
        assert!(result.is_err());
        assert!(String::from_utf8(err).unwrap().contains("share"));
    }

    #[test]
    fn repeated_card_on_one_board_is_rejected() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_score_command(A, "Kd Kd 3c / Ah Ad 7c 7d 3s / 6s 7h 8d 9s Ts", &mut out, &mut err);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(String::from_utf8(err).unwrap().contains("more than once"));
    }
}
