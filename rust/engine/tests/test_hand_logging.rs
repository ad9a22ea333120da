use std::fs;
use std::path::PathBuf;

use ofc_engine::board::{Board, Row};
use ofc_engine::game::{HandState, MatchContext, Move, Placement, Side};
use ofc_engine::logger::{HandLogger, HandRecord};
use ofc_engine::rules::DiscardPolicy;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn fill_move(state: &HandState, side: Side) -> Move {
    let quota = state.quota_for(side);
    let pool = &state.side(side).pool;
    let mut board: Board = state.board(side).clone();
    let mut mv = Move::default();
    for &card in &pool[..quota] {
        let row = [Row::Bottom, Row::Middle, Row::Top]
            .into_iter()
            .find(|&r| !board.is_row_full(r))
            .unwrap();
        board.push(row, card).unwrap();
        mv.placements.push(Placement { card, row });
    }
    mv.burns.extend_from_slice(&pool[quota..]);
    mv
}

fn finished_hand(seed: u64) -> HandState {
    let mut state =
        HandState::start_hand(&mut MatchContext::default(), seed, DiscardPolicy::Explicit).unwrap();
    while !state.is_complete() {
        let mv = fill_move(&state, Side::Player);
        state.apply_move(Side::Player, &mv).unwrap();
        state.advance_street().unwrap();
        let mv = fill_move(&state, Side::Opponent);
        state.apply_opponent_move(&mv).unwrap();
    }
    state
}

#[test]
fn record_requires_a_finished_hand() {
    let state =
        HandState::start_hand(&mut MatchContext::default(), 3, DiscardPolicy::Leftover).unwrap();
    assert!(HandRecord::from_state("20260101-000001".into(), &state).is_none());
}

#[test]
fn record_captures_boards_discards_and_points() {
    let state = finished_hand(31);
    let rec = HandRecord::from_state("20260101-000001".into(), &state).unwrap();
    let result = state.result().unwrap();
    assert_eq!(rec.seed, 31);
    assert_eq!(rec.discard_policy, DiscardPolicy::Explicit);
    assert_eq!(rec.player.board, *state.board(Side::Player));
    assert_eq!(rec.player.discards.len(), 4);
    assert_eq!(rec.opponent.discards.len(), 4);
    assert_eq!(rec.points, result.score.points_a);
    assert_eq!(rec.player.fouled, result.player.fouled);
}

#[test]
fn writes_jsonl_with_lf_only_and_timestamp() {
    let path = tmp_path("handlog");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let state = finished_hand(32);
    let id = logger.next_id();
    let rec = HandRecord::from_state(id, &state).unwrap();
    logger.write(&rec).expect("write");

    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));

    let text = String::from_utf8(bytes).unwrap();
    let parsed: HandRecord = serde_json::from_str(text.trim_end()).expect("valid json");
    assert!(parsed.ts.is_some());
    assert!(parsed.hand_id.ends_with("-000001"));
    assert_eq!(parsed.player.board, rec.player.board);
    let _ = fs::remove_file(&path);
}

#[test]
fn sequential_ids_increment() {
    let mut logger = HandLogger::detached("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
}
