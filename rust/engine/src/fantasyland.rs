use serde::{Deserialize, Serialize};

use crate::hand::{Category, HandEvaluation};

/// Cards dealt in an ordinary Fantasyland hand.
pub const BASE_FANTASYLAND_CARDS: u8 = 13;

/// Next-hand Fantasyland deal earned by a top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasylandTicket {
    pub cards: u8,
}

/// QQ earns 13 cards, KK 14, AA 15, any trips 16. Fouled boards never qualify.
pub fn qualify(top: &HandEvaluation, fouled: bool) -> Option<FantasylandTicket> {
    if fouled {
        return None;
    }
    let cards = match (top.category, top.primary_rank()) {
        (Category::ThreeOfAKind, _) => 16,
        (Category::OnePair, 12) => 13,
        (Category::OnePair, 13) => 14,
        (Category::OnePair, 14) => 15,
        _ => return None,
    };
    Some(FantasylandTicket { cards })
}
