//! # ofc CLI Library
//!
//! Command-line front end for the Pineapple Open-Face Chinese Poker engine.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments, dispatches to a subcommand and returns the
//! process exit code. [`run_with_input`] does the same with an explicit
//! stdin, which is how the interactive `play` command is driven in tests.
//!
//! ```
//! use std::io;
//! let args = vec!["ofc", "score",
//!     "--a", "As 9h 4c / Ks Kh 8c 5d 2s / Qs Qh Jc Jd 2h",
//!     "--b", "Kd 9d 3c / Ah Ad 7c 7d 3s / 6s 7h 8d 9s Ts"];
//! let code = ofc_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Interactive hands against a bot
//! - `sim`: Bot-vs-bot simulation with JSONL hand histories
//! - `stats`: Aggregate and re-verify JSONL hand histories
//! - `score`: Score two finished boards head-to-head
//! - `deal`: Show an opening street and the greedy bot's suggestion
//! - `bench`: Row evaluation throughput
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, OfcCli};
use commands::{
    PlayOptions, SimOptions, handle_bench_command, handle_cfg_command, handle_deal_command,
    handle_play_command, handle_score_command, handle_sim_command, handle_stats_command,
};

pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &["play", "sim", "stats", "score", "deal", "bench", "cfg"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// [`run`] with `play` reading from `stdin` instead of the process stdin.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match OfcCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play {
            hands,
            seed,
            discard,
            ai,
        } => {
            let opts = PlayOptions {
                hands,
                seed,
                discard: discard.map(Into::into),
                ai,
            };
            handle_play_command(&opts, out, err, stdin)
        }
        Commands::Sim {
            hands,
            output,
            seed,
            ai_a,
            ai_b,
        } => {
            let opts = SimOptions {
                hands,
                output,
                seed,
                ai_a,
                ai_b,
            };
            handle_sim_command(&opts, out, err)
        }
        Commands::Stats { input } => handle_stats_command(&input, out, err),
        Commands::Score { a, b } => handle_score_command(&a, &b, out, err),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Bench { iterations } => handle_bench_command(iterations, out),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout with a zero exit.
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = write_usage(e, err);
    exit_code::ERROR
}

fn write_usage(e: clap::Error, err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "Pineapple OFC CLI")?;
    writeln!(err, "Usage: ofc <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: ofc --help")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_definition_is_consistent() {
        OfcCli::command().debug_assert();
    }

    #[test]
    fn every_listed_command_parses() {
        let commands = vec![
            vec!["ofc", "play"],
            vec!["ofc", "sim", "--hands", "1"],
            vec!["ofc", "stats", "--input", "hands.jsonl"],
            vec!["ofc", "score", "--a", "x", "--b", "y"],
            vec!["ofc", "deal"],
            vec!["ofc", "bench"],
            vec!["ofc", "cfg"],
        ];
        assert_eq!(commands.len(), COMMANDS.len());
        for (args, name) in commands.iter().zip(COMMANDS) {
            assert_eq!(args[1], *name);
            assert!(OfcCli::try_parse_from(args).is_ok(), "{:?}", args);
        }
    }

    #[test]
    fn discard_flag_accepts_policy_names() {
        let cli = OfcCli::try_parse_from(["ofc", "play", "--discard", "explicit"]).unwrap();
        let Commands::Play { discard, .. } = cli.cmd else {
            panic!("expected play");
        };
        assert_eq!(discard, Some(cli::DiscardMode::Explicit));
        assert!(OfcCli::try_parse_from(["ofc", "play", "--discard", "never"]).is_err());
    }

    #[test]
    fn bench_rejects_zero_iterations() {
        assert!(OfcCli::try_parse_from(["ofc", "bench", "--iterations", "0"]).is_err());
    }
}
