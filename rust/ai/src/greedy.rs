//! Greedy row-assignment bot.
//!
//! Cards are committed one at a time, highest rank first, to whichever row
//! scores best on a trial board. No lookahead and no backtracking.

use std::collections::HashMap;

use ofc_engine::board::{Board, Row};
use ofc_engine::cards::{Card, Rank};
use ofc_engine::game::{HandState, Move, Placement, Side};
use ofc_engine::hand::evaluate_row;
use tracing::trace;

use crate::AIOpponent;

/// Strength gap tolerated between adjacent rows before a placement is penalised.
pub const SAFETY_MARGIN: f64 = 8.0;
const ORDER_PENALTY: f64 = 45.0;

/// Rows in tie-break order: earlier rows win equal scores.
const CANDIDATE_ROWS: [Row; 3] = [Row::Bottom, Row::Middle, Row::Top];

/// Deterministic greedy placement heuristic.
///
/// # Example
///
/// ```rust
/// use ofc_ai::greedy::GreedyBot;
/// use ofc_ai::AIOpponent;
///
/// let bot = GreedyBot::new();
/// assert_eq!(bot.name(), "GreedyBot");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyBot;

impl GreedyBot {
    pub fn new() -> Self {
        Self
    }
}

impl AIOpponent for GreedyBot {
    fn choose_move(&self, state: &HandState, side: Side) -> Move {
        let visible: Vec<Card> = state
            .board(Side::Player)
            .cards()
            .chain(state.board(Side::Opponent).cards())
            .copied()
            .collect();
        choose_move(
            state.board(side),
            &state.side(side).pool,
            &visible,
            state.quota_for(side),
        )
    }

    fn name(&self) -> &str {
        "GreedyBot"
    }
}

/// Picks placements and burns for `unplaced`.
///
/// # Arguments
///
/// * `board` - The acting side's board before this turn
/// * `unplaced` - Cards the side holds this turn
/// * `visible` - Every card face-up on either board
/// * `place_quota` - Cards that must reach the board this turn
///
/// # Returns
///
/// A [`Move`] placing `min(place_quota, open slots, unplaced)` cards and
/// burning the lowest-ranked rest.
pub fn choose_move(board: &Board, unplaced: &[Card], visible: &[Card], place_quota: usize) -> Move {
    let place_count = place_quota.min(board.open_slots()).min(unplaced.len());

    let mut by_rank_desc = unplaced.to_vec();
    by_rank_desc.sort_by(|a, b| b.rank.cmp(&a.rank));
    let (to_place, burned) = by_rank_desc.split_at(place_count);
    let mut burns = burned.to_vec();
    burns.reverse();

    let unseen = unseen_counts(unplaced, visible);
    let mut trial = board.clone();
    let mut placements = Vec::with_capacity(place_count);
    for &card in to_place {
        let Some(row) = best_row(&trial, card, &unseen) else {
            continue;
        };
        if trial.push(row, card).is_ok() {
            placements.push(Placement { card, row });
        }
    }
    Move { placements, burns }
}

fn best_row(board: &Board, card: Card, unseen: &HashMap<Rank, u8>) -> Option<Row> {
    pick_row(|row| {
        let score = score_placement(board, row, card, unseen);
        trace!(card = %card, row = %row, score, "row score");
        score
    })
}

/// Highest-scoring row; ties go to the earlier row of [`CANDIDATE_ROWS`].
fn pick_row(mut score_of: impl FnMut(Row) -> f64) -> Option<Row> {
    let mut best: Option<(Row, f64)> = None;
    for row in CANDIDATE_ROWS {
        let score = score_of(row);
        if score == f64::NEG_INFINITY {
            continue;
        }
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((row, score));
        }
    }
    best.map(|(row, _)| row)
}

/// Desirability of putting `card` on `row`; `-inf` when the row is full.
pub fn score_placement(board: &Board, row: Row, card: Card, unseen: &HashMap<Rank, u8>) -> f64 {
    if board.is_row_full(row) {
        return f64::NEG_INFINITY;
    }
    let value = f64::from(card.rank.value());
    let mut score = match row {
        Row::Bottom => 30.0 + value * 1.25,
        Row::Middle => 20.0 + value * 0.8,
        Row::Top => {
            let mut s = 8.0 - value * 1.4;
            if card.rank >= Rank::Jack {
                s -= 8.0;
            }
            s
        }
    };

    let mut trial = board.clone();
    if trial.push(row, card).is_err() {
        return f64::NEG_INFINITY;
    }
    let top = row_strength(Row::Top, trial.row(Row::Top));
    let middle = row_strength(Row::Middle, trial.row(Row::Middle));
    let bottom = row_strength(Row::Bottom, trial.row(Row::Bottom));
    if top > middle + SAFETY_MARGIN {
        score -= ORDER_PENALTY;
    }
    if middle > bottom + SAFETY_MARGIN {
        score -= ORDER_PENALTY;
    }

    let remaining = unseen.get(&card.rank).copied().unwrap_or(0);
    let pairs_up = board.row(row).iter().any(|c| c.rank == card.rank);
    if pairs_up {
        score += f64::from(remaining) * if row == Row::Top { 3.5 } else { 2.0 };
    } else if remaining == 0 {
        score -= if row == Row::Top { 9.0 } else { 5.0 };
    }
    score
}

/// Rough strength of a possibly partial row, comparable across rows.
///
/// Complete rows use the evaluator (`category * 100 + primary rank`). A
/// partial top scores 80 + high card with a pair, else 20 + rank sum / 10;
/// a partial middle or bottom scores its rank sum.
pub fn row_strength(row: Row, cards: &[Card]) -> f64 {
    if cards.is_empty() {
        return 0.0;
    }
    if cards.len() == row.capacity() {
        if let Some(eval) = evaluate_row(cards) {
            return f64::from(eval.category.value()) * 100.0 + f64::from(eval.primary_rank());
        }
    }
    let rank_sum: f64 = cards.iter().map(|c| f64::from(c.rank.value())).sum();
    match row {
        Row::Top => {
            let paired = cards
                .iter()
                .enumerate()
                .any(|(i, a)| cards[i + 1..].iter().any(|b| b.rank == a.rank));
            if paired {
                let high = cards.iter().map(|c| c.rank.value()).max().unwrap_or(0);
                80.0 + f64::from(high)
            } else {
                20.0 + rank_sum / 10.0
            }
        }
        Row::Middle | Row::Bottom => rank_sum,
    }
}

/// Copies of each rank not accounted for by the boards or the hand.
pub fn unseen_counts(hand: &[Card], visible: &[Card]) -> HashMap<Rank, u8> {
    let mut seen: HashMap<Rank, u8> = HashMap::new();
    for c in hand.iter().chain(visible.iter()) {
        *seen.entry(c.rank).or_insert(0) += 1;
    }
    hand.iter()
        .map(|c| {
            let known = seen.get(&c.rank).copied().unwrap_or(0);
            (c.rank, 4u8.saturating_sub(known))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofc_engine::cards::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    #[test]
    fn test_greedy_bot_name() {
        assert_eq!(GreedyBot::new().name(), "GreedyBot");
    }

    #[test]
    fn empty_board_prefers_bottom_for_high_cards() {
        let board = Board::new();
        let hand = cards("As Kd");
        let mv = choose_move(&board, &hand, &[], 2);
        assert_eq!(mv.placements[0].row, Row::Bottom);
        assert!(mv.burns.is_empty());
    }

    #[test]
    fn burns_lowest_ranks() {
        let board = Board::parse("/ 2c 3c / 4c 5c").unwrap();
        let hand = cards("9h 2d Kd");
        let mv = choose_move(&board, &hand, &[], 2);
        assert_eq!(mv.burns, cards("2d"));
        assert_eq!(mv.placements.len(), 2);
        assert_eq!(mv.placements[0].card, "Kd".parse::<Card>().unwrap());
    }

    #[test]
    fn full_rows_are_never_chosen() {
        let board = Board::parse("As Ks Qs / 2c 3c 4c 5c 7c / 2d 3d 4d 5d").unwrap();
        let mv = choose_move(&board, &cards("Ah"), &[], 1);
        assert_eq!(
            mv.placements,
            vec![Placement {
                card: "Ah".parse().unwrap(),
                row: Row::Bottom
            }]
        );
    }

    #[test]
    fn quota_is_capped_by_open_slots() {
        let board = Board::parse("As Ks / 2c 3c 4c 5c 7c / 2d 3d 4d 5d 8d").unwrap();
        let mv = choose_move(&board, &cards("9h 8h 7h"), &[], 2);
        assert_eq!(mv.placements.len(), 1);
        assert_eq!(mv.placements[0].row, Row::Top);
        assert_eq!(mv.burns.len(), 2);
    }

    #[test]
    fn unseen_counts_include_boards_and_hand() {
        let hand = cards("Kd Kh 4c");
        let visible = cards("Ks 4d 4h 4s");
        let unseen = unseen_counts(&hand, &visible);
        assert_eq!(unseen[&Rank::King], 1);
        assert_eq!(unseen[&Rank::Four], 0);
    }

    #[test]
    fn dead_rank_is_penalised_and_live_pair_rewarded() {
        let board = Board::parse("/ 9c / 9d").unwrap();
        let nine = "9h".parse().unwrap();
        let live = unseen_counts(&[nine], &cards("9c 9d"));
        let dead = unseen_counts(&[nine], &cards("9c 9d 9s"));
        let with_live = score_placement(&board, Row::Middle, nine, &live);
        let with_dead = score_placement(&board, Row::Middle, nine, &dead);
        assert!((with_live - with_dead - 2.0).abs() < 1e-9);
        // Starting a dead rank on top costs 9.
        let top_dead = score_placement(&board, Row::Top, nine, &dead);
        let top_live = score_placement(&board, Row::Top, nine, &live);
        assert!((top_live - top_dead - 9.0).abs() < 1e-9);
    }

    #[test]
    fn top_outranking_middle_beyond_margin_costs_45() {
        let five = "5d".parse().unwrap();
        // Live fives, so no dead-rank adjustment.
        let unseen = HashMap::from([(Rank::Five, 3u8)]);
        // Top 5 scores 20.5: within the margin of a 17 middle, beyond it for a 9 middle.
        let strong_middle = Board::parse("/ 9c 8c / Ac Kc").unwrap();
        let weak_middle = Board::parse("/ 9c / Ac Kc").unwrap();
        let safe = score_placement(&strong_middle, Row::Top, five, &unseen);
        let unsafe_top = score_placement(&weak_middle, Row::Top, five, &unseen);
        assert!((safe - 1.0).abs() < 1e-9);
        assert!((safe - unsafe_top - 45.0).abs() < 1e-9);
    }

    #[test]
    fn middle_outranking_bottom_beyond_margin_is_penalised() {
        let king = "Kd".parse().unwrap();
        let unseen = HashMap::from([(Rank::King, 3u8)]);
        let board = Board::parse("/ Qc Jc / 2d").unwrap();
        // Middle would reach 36 against a bottom of 2.
        let expected = 20.0 + 13.0 * 0.8 - 45.0;
        let score = score_placement(&board, Row::Middle, king, &unseen);
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn equal_scores_prefer_bottom_then_middle_then_top() {
        assert_eq!(pick_row(|_| 1.0), Some(Row::Bottom));
        assert_eq!(
            pick_row(|row| if row == Row::Bottom { f64::NEG_INFINITY } else { 1.0 }),
            Some(Row::Middle)
        );
        assert_eq!(
            pick_row(|row| if row == Row::Top { 2.0 } else { 1.0 }),
            Some(Row::Top)
        );
        assert_eq!(pick_row(|_| f64::NEG_INFINITY), None);
    }

    #[test]
    fn row_strength_shapes() {
        assert_eq!(row_strength(Row::Top, &[]), 0.0);
        assert_eq!(row_strength(Row::Top, &cards("Qs Qh")), 92.0);
        assert_eq!(row_strength(Row::Top, &cards("Qs Qh 2d")), 112.0);
        assert_eq!(row_strength(Row::Middle, &cards("Kd 9c")), 22.0);
        assert_eq!(row_strength(Row::Bottom, &cards("9c Tc Jc Qc Kc")), 813.0);
    }
}
