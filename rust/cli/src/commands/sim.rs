//! Simulation command handler: bot-vs-bot hands with optional hand histories.
//!
//! Hand `i` is dealt from `seed + i`, and Fantasyland tickets carry over from
//! one hand to the next exactly as in `play`. With `--output`, every finished
//! hand is written as one JSONL line; a `.zst` extension compresses the file.
//!
//! # Environment Variables
//!
//! - `OFC_SIM_BREAK_AFTER`: stop after N hands and exit as interrupted (for testing)
//!
//! # Examples
//!
//! ```no_run
//! use ofc_cli::commands::{SimOptions, handle_sim_command};
//! use std::io;
//!
//! let opts = SimOptions {
//!     hands: 1000,
//!     output: Some("data/sim.jsonl".to_string()),
//!     seed: Some(42),
//!     ai_a: None,
//!     ai_b: None,
//! };
//! handle_sim_command(&opts, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use crate::config;
use crate::error::CliError;
use crate::io_utils::write_text_auto;
use crate::ui;
use chrono::{SecondsFormat, Utc};
use ofc_ai::{AIOpponent, create_ai, play_hand};
use ofc_engine::game::{HandState, MatchContext};
use ofc_engine::logger::{HandLogger, HandRecord};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const BREAK_AFTER_ENV: &str = "OFC_SIM_BREAK_AFTER";

#[derive(Debug, Clone, Default)]
pub struct SimOptions {
    pub hands: u64,
    pub output: Option<String>,
    pub seed: Option<u64>,
    /// Player-side bot; falls back to the configured `ai`
    pub ai_a: Option<String>,
    /// Opponent-side bot; falls back to the configured `ai`
    pub ai_b: Option<String>,
}

/// Running totals, from bot A's side.
#[derive(Debug, Default)]
struct SimTotals {
    hands: u64,
    points_a: i64,
    fouls_a: u64,
    fouls_b: u64,
    scoops_a: u64,
    scoops_b: u64,
    fantasyland_hands: u64,
}

/// Where finished hands go.
enum HistorySink {
    Disabled,
    Plain(HandLogger),
    /// Buffered and compressed once the run ends
    Compressed {
        path: PathBuf,
        ids: HandLogger,
        lines: String,
    },
}

impl HistorySink {
    fn open(output: Option<&str>) -> Result<Self, String> {
        let Some(out) = output else {
            return Ok(HistorySink::Disabled);
        };
        let path = PathBuf::from(out);
        if path.extension().is_some_and(|ext| ext == "zst") {
            let date = Utc::now().format("%Y%m%d").to_string();
            return Ok(HistorySink::Compressed {
                path,
                ids: HandLogger::detached(&date),
                lines: String::new(),
            });
        }
        HandLogger::create(&path)
            .map(HistorySink::Plain)
            .map_err(|e| format!("Failed to open {}: {}", path.display(), e))
    }

    fn record(&mut self, state: &HandState) -> Result<(), String> {
        match self {
            HistorySink::Disabled => Ok(()),
            HistorySink::Plain(logger) => {
                let id = logger.next_id();
                let rec = HandRecord::from_state(id, state).ok_or("hand not finished")?;
                logger.write(&rec).map_err(|e| e.to_string())
            }
            HistorySink::Compressed { ids, lines, .. } => {
                let mut rec =
                    HandRecord::from_state(ids.next_id(), state).ok_or("hand not finished")?;
                rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
                let line = serde_json::to_string(&rec).map_err(|e| e.to_string())?;
                lines.push_str(&line);
                lines.push('\n');
                Ok(())
            }
        }
    }

    fn finish(self) -> Result<(), String> {
        match self {
            HistorySink::Compressed { path, lines, .. } => write_text_auto(&path, &lines),
            HistorySink::Disabled | HistorySink::Plain(_) => Ok(()),
        }
    }
}

/// Handle the sim command.
///
/// # Errors
///
/// - `CliError::InvalidInput` for zero hands or an unknown bot name
/// - `CliError::Config` for an invalid configuration
/// - `CliError::Io` when the history file cannot be written
/// - `CliError::Interrupted` when `OFC_SIM_BREAK_AFTER` stops the run early
pub fn handle_sim_command(
    opts: &SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if opts.hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = match config::load() {
        Ok(c) => c,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let bot_a = bot_named(opts.ai_a.as_deref().unwrap_or(&cfg.ai), err)?;
    let bot_b = bot_named(opts.ai_b.as_deref().unwrap_or(&cfg.ai), err)?;
    let base_seed = opts.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    let mut sink = match HistorySink::open(opts.output.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            ui::write_error(err, &e)?;
            return Err(CliError::Io(std::io::Error::other(e)));
        }
    };

    info!(
        hands = opts.hands,
        seed = base_seed,
        ai_a = bot_a.name(),
        ai_b = bot_b.name(),
        "simulation started"
    );

    let mut ctx = MatchContext::new(cfg.fantasyland);
    let mut totals = SimTotals::default();
    let mut interrupted = false;
    for i in 0..opts.hands {
        let seed = base_seed.wrapping_add(i);
        let mut state = HandState::start_hand(&mut ctx, seed, cfg.discard_policy)?;
        play_hand(&mut state, bot_a.as_ref(), bot_b.as_ref())?;
        let Some(result) = state.result() else {
            return Err(CliError::Engine(format!("hand {} did not finish", seed)));
        };

        totals.hands += 1;
        totals.points_a += i64::from(result.score.points_a);
        totals.fouls_a += u64::from(result.player.fouled);
        totals.fouls_b += u64::from(result.opponent.fouled);
        match result.score.scoop_bonus {
            b if b > 0 => totals.scoops_a += 1,
            b if b < 0 => totals.scoops_b += 1,
            _ => {}
        }
        totals.fantasyland_hands += u64::from(result.fantasyland_hand);
        debug!(seed, points = result.score.points_a, "hand simulated");
        ctx.absorb(result);

        if let Err(e) = sink.record(&state) {
            ui::write_error(err, &format!("Failed to write hand: {}", e))?;
            return Err(CliError::Io(std::io::Error::other(e)));
        }

        if break_after.is_some_and(|b| totals.hands == b) {
            interrupted = true;
            break;
        }
    }

    if let Err(e) = sink.finish() {
        ui::write_error(err, &format!("Failed to write history: {}", e))?;
        return Err(CliError::Io(std::io::Error::other(e)));
    }

    write_summary(out, &totals, bot_a.name(), bot_b.name(), base_seed)?;
    if let Some(p) = &opts.output {
        writeln!(out, "History: {}", Path::new(p).display())?;
    }

    if interrupted {
        writeln!(out, "Interrupted: saved {}/{}", totals.hands, opts.hands)?;
        return Err(CliError::Interrupted(format!(
            "saved {}/{}",
            totals.hands, opts.hands
        )));
    }
    Ok(())
}

fn bot_named(name: &str, err: &mut dyn Write) -> Result<Box<dyn AIOpponent>, CliError> {
    match create_ai(name) {
        Some(bot) => Ok(bot),
        None => {
            let msg = format!(
                "unknown ai '{}' (expected one of {})",
                name,
                ofc_ai::AI_TYPES.join(", ")
            );
            ui::write_error(err, &msg)?;
            Err(CliError::InvalidInput(msg))
        }
    }
}

fn write_summary(
    out: &mut dyn Write,
    totals: &SimTotals,
    name_a: &str,
    name_b: &str,
    seed: u64,
) -> std::io::Result<()> {
    writeln!(out, "Simulated: {} hands (seed {})", totals.hands, seed)?;
    writeln!(
        out,
        "{} vs {}: points {:+} / {:+}",
        name_a, name_b, totals.points_a, -totals.points_a
    )?;
    writeln!(out, "Fouls: {} / {}", totals.fouls_a, totals.fouls_b)?;
    writeln!(out, "Scoops: {} / {}", totals.scoops_a, totals.scoops_b)?;
    writeln!(out, "Fantasyland hands: {}", totals.fantasyland_hands)
}
