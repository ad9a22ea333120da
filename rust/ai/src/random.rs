//! Uniformly random placements, used as a floor when comparing bots.

use ofc_engine::board::Row;
use ofc_engine::game::{HandState, Move, Placement, Side};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AIOpponent;

/// Places a random subset of the hand into random open rows.
///
/// The RNG is reseeded from the hand seed, street and side on every call, so
/// a given position always yields the same move.
#[derive(Debug, Clone, Default)]
pub struct RandomBot {
    salt: u64,
}

impl RandomBot {
    pub fn new(salt: u64) -> Self {
        Self { salt }
    }
}

impl AIOpponent for RandomBot {
    fn choose_move(&self, state: &HandState, side: Side) -> Move {
        let side_bits = match side {
            Side::Player => 0x5EED_0001,
            Side::Opponent => 0x5EED_0002,
        };
        let seed = state
            .seed()
            .wrapping_mul(31)
            .wrapping_add(u64::from(state.street()) << 8)
            ^ side_bits
            ^ self.salt;
        let mut rng = StdRng::seed_from_u64(seed);

        let mut hand = state.side(side).pool.clone();
        hand.shuffle(&mut rng);
        let quota = state.quota_for(side);
        let burns = hand.split_off(quota.min(hand.len()));

        let mut board = state.board(side).clone();
        let mut placements = Vec::with_capacity(hand.len());
        for card in hand {
            let open: Vec<Row> = Row::ALL
                .into_iter()
                .filter(|&r| !board.is_row_full(r))
                .collect();
            if open.is_empty() {
                break;
            }
            let row = open[rng.random_range(0..open.len())];
            if board.push(row, card).is_ok() {
                placements.push(Placement { card, row });
            }
        }
        Move { placements, burns }
    }

    fn name(&self) -> &str {
        "RandomBot"
    }
}
