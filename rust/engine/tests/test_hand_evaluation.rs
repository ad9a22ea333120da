use ofc_engine::cards::{parse_cards, Card, Rank as R, Suit as S};
use ofc_engine::hand::{compare, compare_hands, evaluate_five, evaluate_row, Category, HandEvaluation};
use ofc_engine::royalties::{bottom_royalty, middle_royalty, top_royalty};

fn c(s: S, r: R) -> Card {
    Card { suit: s, rank: r }
}

fn eval(codes: &str) -> HandEvaluation {
    evaluate_row(&parse_cards(codes).expect("valid codes")).expect("3 or 5 cards")
}

#[test]
fn detects_royal_flush() {
    let cards = [
        c(S::Hearts, R::Ten),
        c(S::Hearts, R::Jack),
        c(S::Hearts, R::Queen),
        c(S::Hearts, R::King),
        c(S::Hearts, R::Ace),
    ];
    let hs = evaluate_five(&cards);
    assert_eq!(hs.category, Category::StraightFlush);
    assert_eq!(hs.tiebreak, vec![14]);
}

#[test]
fn evaluation_ignores_card_order() {
    let codes = ["Ks", "Kh", "8c", "5d", "2s"];
    let base = eval(&codes.join(" "));
    let mut rotated = codes.to_vec();
    for _ in 0..codes.len() {
        rotated.rotate_left(1);
        assert_eq!(eval(&rotated.join(" ")), base);
    }
    let mut reversed = codes.to_vec();
    reversed.reverse();
    assert_eq!(eval(&reversed.join(" ")), base);
}

#[test]
fn category_ordering_is_correct() {
    let ladder = [
        "Kc Td 8s 5h 3d",
        "Ks Kh 8c 5d 2s",
        "As Ah 7c 7d 3s",
        "9s 9h 9d 4c 2d",
        "6s 7h 8d 9s Ts",
        "Ah Jh 8h 5h 2h",
        "4s 4h 4d Kc Kd",
        "9s 9h 9d 9c 2s",
        "9c Tc Jc Qc Kc",
    ];
    let evals: Vec<HandEvaluation> = ladder.iter().map(|s| eval(s)).collect();
    for (i, e) in evals.iter().enumerate() {
        assert_eq!(e.category.value() as usize, i, "{}", ladder[i]);
    }
    for pair in evals.windows(2) {
        assert!(compare_hands(&pair[1], &pair[0]).is_gt());
    }
}

#[test]
fn compare_is_antisymmetric() {
    let hands = [
        eval("As Ah 7c 7d 3s"),
        eval("As Ad 7h 7s 2c"),
        eval("Qs Qh 3c"),
        eval("Qd Qc 2h 3h 4d"),
        eval("Ah 2d 3c 4s 5h"),
    ];
    for a in &hands {
        for b in &hands {
            assert_eq!(compare(a, b), -compare(b, a));
        }
    }
}

#[test]
fn wheel_is_lowest_straight() {
    let wheel = eval("Ah 2d 3c 4s 5h");
    let six_high = eval("2s 3h 4d 5c 6s");
    assert_eq!(wheel.category, Category::Straight);
    assert_eq!(wheel.tiebreak, vec![5]);
    assert_eq!(compare(&wheel, &six_high), -1);

    let steel_wheel = eval("As 2s 3s 4s 5s");
    assert_eq!(steel_wheel.category, Category::StraightFlush);
    assert_eq!(steel_wheel.tiebreak, vec![5]);
}

#[test]
fn kickers_break_ties() {
    assert_eq!(compare(&eval("As Ah 7c 7d Ks"), &eval("Ac Ad 7h 7s Qs")), 1);
    assert_eq!(compare(&eval("Ks Kh 8c 5d 2s"), &eval("Kd Kc 8h 5c 2c")), 0);
    assert_eq!(compare(&eval("Qs Qh 3c"), &eval("Qd Qc 4h")), -1);
}

#[test]
fn three_card_top_never_makes_five_card_categories() {
    assert_eq!(eval("Ts Js Qs").category, Category::HighCard);
    assert_eq!(eval("7s 7h 7d").category, Category::ThreeOfAKind);
    assert!(evaluate_row(&parse_cards("As Ks Qs Js").unwrap()).is_none());
}

#[test]
fn royalty_tables() {
    assert_eq!(top_royalty(&eval("6s 6h 2c")), 1);
    assert_eq!(top_royalty(&eval("Qs Qh 2c")), 7);
    assert_eq!(top_royalty(&eval("As Ah 2c")), 9);
    assert_eq!(top_royalty(&eval("2s 2h 2c")), 10);
    assert_eq!(top_royalty(&eval("As Ah Ac")), 22);

    assert_eq!(middle_royalty(&eval("6s 7h 8d 9s Ts")), 4);
    assert_eq!(middle_royalty(&eval("Ah Jh 8h 5h 2h")), 8);
    assert_eq!(middle_royalty(&eval("4s 4h 4d Kc Kd")), 12);
    assert_eq!(middle_royalty(&eval("9s 9h 9d 9c 2s")), 20);

    assert_eq!(bottom_royalty(&eval("6s 7h 8d 9s Ts")), 2);
    assert_eq!(bottom_royalty(&eval("Ah Jh 8h 5h 2h")), 4);
    assert_eq!(bottom_royalty(&eval("4s 4h 4d Kc Kd")), 6);
    assert_eq!(bottom_royalty(&eval("9s 9h 9d 9c 2s")), 10);
    assert_eq!(bottom_royalty(&eval("9c Tc Jc Qc Kc")), 15);
}

#[test]
fn category_names() {
    assert_eq!(Category::StraightFlush.name(), "Straight Flush");
    assert_eq!(Category::ThreeOfAKind.to_string(), "Three of a Kind");
}
