//! Royalty bonus tables per row.

use serde::{Deserialize, Serialize};

use crate::board::Row;
use crate::hand::{Category, HandEvaluation};

/// Top row: trips pay rank + 8, a pair of sixes or better pays rank - 5.
pub fn top_royalty(eval: &HandEvaluation) -> u32 {
    let rank = u32::from(eval.primary_rank());
    match eval.category {
        Category::ThreeOfAKind => rank + 8,
        Category::OnePair if rank >= 6 => rank - 5,
        _ => 0,
    }
}

pub fn middle_royalty(eval: &HandEvaluation) -> u32 {
    match eval.category {
        Category::ThreeOfAKind => 2,
        Category::Straight => 4,
        Category::Flush => 8,
        Category::FullHouse => 12,
        Category::FourOfAKind => 20,
        Category::StraightFlush => 30,
        Category::HighCard | Category::OnePair | Category::TwoPair => 0,
    }
}

pub fn bottom_royalty(eval: &HandEvaluation) -> u32 {
    match eval.category {
        Category::Straight => 2,
        Category::Flush => 4,
        Category::FullHouse => 6,
        Category::FourOfAKind => 10,
        Category::StraightFlush => 15,
        Category::HighCard | Category::OnePair | Category::TwoPair | Category::ThreeOfAKind => 0,
    }
}

pub fn royalty_for(row: Row, eval: &HandEvaluation) -> u32 {
    match row {
        Row::Top => top_royalty(eval),
        Row::Middle => middle_royalty(eval),
        Row::Bottom => bottom_royalty(eval),
    }
}

/// Per-row royalties of one board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRoyalties {
    pub top: u32,
    pub middle: u32,
    pub bottom: u32,
}

impl BoardRoyalties {
    pub fn from_evaluations(top: &HandEvaluation, middle: &HandEvaluation, bottom: &HandEvaluation) -> Self {
        Self {
            top: top_royalty(top),
            middle: middle_royalty(middle),
            bottom: bottom_royalty(bottom),
        }
    }

    pub fn total(&self) -> u32 {
        self.top + self.middle + self.bottom
    }

    pub fn get(&self, row: Row) -> u32 {
        match row {
            Row::Top => self.top,
            Row::Middle => self.middle,
            Row::Bottom => self.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::hand::evaluate_row;

    fn eval(s: &str) -> HandEvaluation {
        evaluate_row(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn small_top_pairs_pay_nothing() {
        assert_eq!(top_royalty(&eval("5s 5h Ac")), 0);
        assert_eq!(top_royalty(&eval("As Kh Qc")), 0);
        assert_eq!(top_royalty(&eval("7s 7h 2c")), 2);
    }

    #[test]
    fn bottom_trips_and_two_pair_pay_nothing() {
        assert_eq!(bottom_royalty(&eval("9s 9h 9d 4c 2d")), 0);
        assert_eq!(bottom_royalty(&eval("As Ah 7c 7d 3s")), 0);
        assert_eq!(middle_royalty(&eval("9s 9h 9d 4c 2d")), 2);
    }

    #[test]
    fn board_royalties_total() {
        let r = BoardRoyalties::from_evaluations(
            &eval("6s 6h 2c"),
            &eval("9s 9h 9d 4c 2d"),
            &eval("9c Tc Jc Qc Kc"),
        );
        assert_eq!(r, BoardRoyalties { top: 1, middle: 2, bottom: 15 });
        assert_eq!(r.total(), 18);
        assert_eq!(r.get(Row::Bottom), 15);
        assert_eq!(royalty_for(Row::Middle, &eval("9c Tc Jc Qc Kc")), 30);
    }
}
