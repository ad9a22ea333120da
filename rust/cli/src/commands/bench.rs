//! Bench command handler for row evaluation throughput.
//!
//! Deals rows from a seeded deck (seed 1, so every run evaluates the same
//! rows) and times the evaluator: two five-card rows and one three-card row
//! per iteration, like a finished board.

use crate::error::CliError;
use ofc_engine::deck::Deck;
use ofc_engine::hand::{evaluate_five, evaluate_three};
use std::io::Write;
use std::time::Instant;

pub fn handle_bench_command(iterations: u32, out: &mut dyn Write) -> Result<(), CliError> {
    let mut deck = Deck::new_with_seed(1);
    deck.shuffle();
    let mut rows = 0u64;
    let start = Instant::now();
    for _ in 0..iterations {
        if deck.remaining() < 13 {
            deck.shuffle();
        }
        let cards = deck.deal(13)?;
        for five in [&cards[0..5], &cards[5..10]] {
            if let Ok(arr) = <&[_; 5]>::try_from(five) {
                std::hint::black_box(evaluate_five(arr));
                rows += 1;
            }
        }
        if let Ok(arr) = <&[_; 3]>::try_from(&cards[10..13]) {
            std::hint::black_box(evaluate_three(arr));
            rows += 1;
        }
    }
    let dur = start.elapsed();
    let per_sec = rows as f64 / dur.as_secs_f64().max(f64::EPSILON);
    writeln!(
        out,
        "Benchmark: {} boards ({} rows) in {:?} ({:.0} rows/sec)",
        iterations, rows, dur, per_sec
    )?;
    Ok(())
}
