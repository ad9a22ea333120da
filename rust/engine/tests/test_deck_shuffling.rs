use std::collections::HashSet;

use ofc_engine::cards::{Card, CardId};
use ofc_engine::deck::Deck;

#[test]
fn deck_reset_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.shuffle();
    deck.deal(10).expect("fresh deck");
    deck.reset();
    assert_eq!(deck.remaining(), 52);
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.deal_card().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(
        deck.deal_card().is_none(),
        "after 52 cards, deck should be empty"
    );
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    assert_eq!(d1.deal(17).unwrap(), d2.deal(17).unwrap());
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    assert_ne!(
        d1.deal(10).unwrap(),
        d2.deal(10).unwrap(),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn deals_partition_the_deck() {
    let mut deck = Deck::new_with_seed(77);
    deck.shuffle();
    let mut seen: HashSet<Card> = HashSet::new();
    for n in [5, 5, 3, 3, 3, 3, 3, 3, 3, 3] {
        for c in deck.deal(n).unwrap() {
            assert!(seen.insert(c), "{} dealt twice", c);
        }
    }
    assert_eq!(seen.len() + deck.remaining(), 52);
    for c in deck.undealt() {
        assert!(!seen.contains(c));
    }
}

#[test]
fn card_ids_are_unique_and_round_trip() {
    let mut deck = Deck::new_with_seed(5);
    deck.shuffle();
    let ids: HashSet<CardId> = deck.undealt().iter().map(Card::id).collect();
    assert_eq!(ids.len(), 52);
    for c in deck.undealt() {
        assert_eq!(Card::from_id(c.id()), Some(*c));
    }
    assert!(Card::from_id(CardId(52)).is_none());
}
