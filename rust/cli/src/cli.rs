//! Command-line argument definitions for the `ofc` binary.

use clap::{Parser, Subcommand, ValueEnum};
use ofc_engine::rules::DiscardPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "ofc",
    version,
    about = "Pineapple Open-Face Chinese Poker",
    long_about = "Play, simulate and score Pineapple Open-Face Chinese Poker hands against a greedy bot."
)]
pub struct OfcCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play hands against a bot, one command per line on stdin
    Play {
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// How the street discard is chosen
        #[arg(long, value_enum)]
        discard: Option<DiscardMode>,
        /// Opponent bot (greedy or random)
        #[arg(long)]
        ai: Option<String>,
    },
    /// Bot-vs-bot simulation with optional JSONL hand histories
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long = "ai-a")]
        ai_a: Option<String>,
        #[arg(long = "ai-b")]
        ai_b: Option<String>,
    },
    /// Summarise JSONL (or .jsonl.zst) hand histories
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Score two finished boards written as "top / middle / bottom"
    Score {
        #[arg(long)]
        a: String,
        #[arg(long)]
        b: String,
    },
    /// Show a first-street deal and the greedy bot's suggestion
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluator throughput over random rows
    Bench {
        #[arg(long, default_value_t = 20_000, value_parser = clap::value_parser!(u32).range(1..))]
        iterations: u32,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

/// Command-line spelling of [`DiscardPolicy`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DiscardMode {
    Leftover,
    Explicit,
}

impl From<DiscardMode> for DiscardPolicy {
    fn from(mode: DiscardMode) -> Self {
        match mode {
            DiscardMode::Leftover => DiscardPolicy::Leftover,
            DiscardMode::Explicit => DiscardPolicy::Explicit,
        }
    }
}
