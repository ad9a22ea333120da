//! Deal command: one opening street and the greedy bot's suggestion for it.

use crate::error::CliError;
use crate::formatters::{format_board, format_cards};
use ofc_ai::AIOpponent;
use ofc_ai::greedy::GreedyBot;
use ofc_engine::game::{HandState, MatchContext, Side};
use ofc_engine::rules::DiscardPolicy;
use std::io::Write;

/// Deals street 1 from `seed` (random when absent) and shows where the
/// greedy bot would put the five cards.
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut ctx = MatchContext::default();
    let mut state = HandState::start_hand(&mut ctx, seed, DiscardPolicy::Leftover)?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Street 1: {}", format_cards(&state.side(Side::Player).pool))?;

    let bot = GreedyBot::new();
    let mv = bot.choose_move(&state, Side::Player);
    for p in &mv.placements {
        writeln!(out, "  {} -> {}", crate::formatters::format_card(&p.card), p.row)?;
    }
    state.apply_move(Side::Player, &mv)?;
    writeln!(out, "Suggested board:")?;
    write!(out, "{}", format_board(state.board(Side::Player)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_deal() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        handle_deal_command(Some(42), &mut a).unwrap();
        handle_deal_command(Some(42), &mut b).unwrap();
        assert_eq!(a, b);

        let text = String::from_utf8(a).unwrap();
        assert!(text.starts_with("Seed: 42\n"));
        assert_eq!(text.matches(" -> ").count(), 5);
    }

    #[test]
    fn random_seed_is_reported() {
        let mut out = Vec::new();
        handle_deal_command(None, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Suggested board:"));
    }
}
