use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

/// Poker hand category, weakest first.
///
/// Three-card rows only ever produce `HighCard`, `OnePair` or `ThreeOfAKind`,
/// which keeps top-row evaluations directly comparable with five-card rows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category plus tiebreak ranks, most significant first.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub category: Category,
    pub tiebreak: Vec<u8>,
}

impl HandEvaluation {
    fn new(category: Category, tiebreak: Vec<u8>) -> Self {
        Self { category, tiebreak }
    }

    /// Most significant tiebreak rank (0 when empty).
    pub fn primary_rank(&self) -> u8 {
        self.tiebreak.first().copied().unwrap_or(0)
    }
}

impl fmt::Display for HandEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreak)
    }
}

/// Ranks a five-card row.
pub fn evaluate_five(cards: &[Card; 5]) -> HandEvaluation {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    for &c in cards.iter() {
        let r = rank_val(c);
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
    }

    let first_suit = suit_index(cards[0].suit);
    let is_flush = cards.iter().all(|c| suit_index(c.suit) == first_suit);
    let straight_high = if rank_mask.count_ones() == 5 {
        straight_high_from_mask(rank_mask)
    } else {
        None
    };

    if let (true, Some(high)) = (is_flush, straight_high) {
        return HandEvaluation::new(Category::StraightFlush, vec![high]);
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandEvaluation::new(Category::FourOfAKind, vec![quad, kicker]);
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandEvaluation::new(Category::FullHouse, vec![trip, pair]);
    }

    let (trips, pairs, singles) = classify_multiples(&rank_counts);

    if is_flush {
        return HandEvaluation::new(Category::Flush, singles);
    }

    if let Some(high) = straight_high {
        return HandEvaluation::new(Category::Straight, vec![high]);
    }

    if let Some(&t) = trips.first() {
        let mut tb = vec![t];
        tb.extend(singles);
        return HandEvaluation::new(Category::ThreeOfAKind, tb);
    }

    if pairs.len() >= 2 {
        let mut tb = vec![pairs[0], pairs[1]];
        tb.extend(singles);
        return HandEvaluation::new(Category::TwoPair, tb);
    }

    if let Some(&p) = pairs.first() {
        let mut tb = vec![p];
        tb.extend(singles);
        return HandEvaluation::new(Category::OnePair, tb);
    }

    HandEvaluation::new(Category::HighCard, singles)
}

/// Ranks a three-card top row: trips, pair or high card only.
pub fn evaluate_three(cards: &[Card; 3]) -> HandEvaluation {
    let mut rank_counts = [0u8; 15];
    for &c in cards.iter() {
        rank_counts[rank_val(c) as usize] += 1;
    }
    let (trips, pairs, singles) = classify_multiples(&rank_counts);

    if let Some(&t) = trips.first() {
        return HandEvaluation::new(Category::ThreeOfAKind, vec![t]);
    }
    if let Some(&p) = pairs.first() {
        let mut tb = vec![p];
        tb.extend(singles);
        return HandEvaluation::new(Category::OnePair, tb);
    }
    HandEvaluation::new(Category::HighCard, singles)
}

/// Evaluates a finished row of three or five cards; `None` for any other size.
pub fn evaluate_row(cards: &[Card]) -> Option<HandEvaluation> {
    match cards.len() {
        3 => {
            let arr: &[Card; 3] = cards.try_into().ok()?;
            Some(evaluate_three(arr))
        }
        5 => {
            let arr: &[Card; 5] = cards.try_into().ok()?;
            Some(evaluate_five(arr))
        }
        _ => None,
    }
}

/// Category first, then tiebreak ranks left to right; a missing trailing
/// position counts as 0.
pub fn compare_hands(a: &HandEvaluation, b: &HandEvaluation) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => {
            let len = a.tiebreak.len().max(b.tiebreak.len());
            (0..len)
                .map(|i| {
                    let x = a.tiebreak.get(i).copied().unwrap_or(0);
                    let y = b.tiebreak.get(i).copied().unwrap_or(0);
                    x.cmp(&y)
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }
        ord => ord,
    }
}

/// [`compare_hands`] as `-1`, `0` or `1`.
pub fn compare(a: &HandEvaluation, b: &HandEvaluation) -> i8 {
    match compare_hands(a, b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

fn rank_val(c: Card) -> u8 {
    c.rank.value()
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    // Treat Ace as 14 and optionally as 1
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    for high in (5..=14u8).rev() {
        let window = (1u16 << (high - 4))
            | (1 << (high - 3))
            | (1 << (high - 2))
            | (1 << (high - 1))
            | (1 << high);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let trip = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 3)?;
    let pair = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 2)?;
    Some((trip, pair))
}

/// Splits rank counts into (trips, pairs, singles), each ordered high to low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
