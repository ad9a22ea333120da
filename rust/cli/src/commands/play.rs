//! # Play Command
//!
//! Interactive hands against a bot. The human is the player board; the bot
//! answers each declared street on the opponent board.
//!
//! Prompt commands (see [`PLAY_HELP`](crate::validation::PLAY_HELP)):
//!
//! - `place <card> <top|mid|bot>` / `move <card> <row>` / `return <card>`
//! - `discard <card>` for the street's discard (or a Fantasyland burn)
//! - `done` declares the street, `show` redraws, `q` quits the session
//!
//! Fantasyland tickets earned on the top row carry into the next hand of
//! the session unless the `fantasyland` setting is off.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_board, format_cards, format_hand_result, format_progress};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{PLAY_HELP, ParseResult, PlayCommand, parse_play_command};
use ofc_ai::{AIOpponent, create_ai, play_opponent};
use ofc_engine::game::{HandState, MatchContext, Side};
use ofc_engine::rules::DiscardPolicy;
use std::io::{BufRead, Write};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Hands in the session (default 1)
    pub hands: Option<u32>,
    pub seed: Option<u64>,
    pub discard: Option<DiscardPolicy>,
    pub ai: Option<String>,
}

/// How a single hand ended.
#[derive(Debug, PartialEq, Eq)]
enum HandEnd {
    Finished,
    Quit,
}

/// Handle the play command: an interactive session read from `stdin`.
///
/// # Errors
///
/// - `CliError::InvalidInput` for zero hands or an unknown bot
/// - `CliError::Config` for an invalid configuration
/// - `CliError::Engine` if the bot produces a move the engine rejects
/// - `CliError::Io` on output failures
///
/// Rejected player commands are reported on `err` and the prompt continues.
pub fn handle_play_command(
    opts: &PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let hands = opts.hands.unwrap_or(1);
    if hands == 0 {
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
    let policy = opts.discard.unwrap_or(cfg.discard_policy);
    let ai_name = opts.ai.as_deref().unwrap_or(&cfg.ai);
    let Some(bot) = create_ai(ai_name) else {
        let msg = format!("unknown ai '{}'", ai_name);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    };
    let base_seed = opts.seed.or(cfg.seed).unwrap_or_else(rand::random);

    writeln!(
        out,
        "play: vs={} hands={} seed={} discard={}",
        bot.name(),
        hands,
        base_seed,
        policy
    )?;
    writeln!(out, "{}", PLAY_HELP)?;
    info!(hands, seed = base_seed, %policy, "play session started");

    let mut ctx = MatchContext::new(cfg.fantasyland);
    let mut played = 0u32;
    let mut total = 0i64;
    for i in 0..hands {
        let seed = base_seed.wrapping_add(u64::from(i));
        let mut state = HandState::start_hand(&mut ctx, seed, policy)?;
        writeln!(out, "Hand {} (seed {})", i + 1, seed)?;
        if !state.status().message.is_empty() {
            ui::write_status(out, err, state.status())?;
        }
        render(&state, out)?;

        if play_one_hand(&mut state, bot.as_ref(), out, err, stdin)? == HandEnd::Quit {
            break;
        }
        let Some(result) = state.result() else {
            return Err(CliError::Engine("hand ended without a result".into()));
        };
        writeln!(out, "Hand complete.")?;
        write!(out, "{}", format_hand_result(result))?;
        total += i64::from(result.score.points_a);
        played += 1;
        ctx.absorb(result);
    }

    writeln!(out, "Hands played: {}/{} points {:+}", played, hands, total)?;
    Ok(())
}

fn play_one_hand(
    state: &mut HandState,
    bot: &dyn AIOpponent,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<HandEnd, CliError> {
    while !state.is_complete() {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(HandEnd::Quit);
        };
        if line.is_empty() {
            continue;
        }
        match parse_play_command(&line) {
            ParseResult::Quit => return Ok(HandEnd::Quit),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            ParseResult::Command(cmd) => run_command(state, cmd, bot, out, err)?,
        }
    }
    Ok(HandEnd::Finished)
}

fn run_command(
    state: &mut HandState,
    cmd: PlayCommand,
    bot: &dyn AIOpponent,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    // Engine rejections are recorded in the status and reported below.
    let _ = match cmd {
        PlayCommand::Place(card, row) => state.place_card(card, row),
        PlayCommand::Move(card, row) => state.move_card_between_rows(card, row),
        PlayCommand::Return(card) => state.return_card_to_pool(card),
        PlayCommand::Discard(card) => state.discard_card(card),
        PlayCommand::Show => return render(state, out).map_err(CliError::from),
        PlayCommand::Help => {
            writeln!(out, "{}", PLAY_HELP)?;
            return Ok(());
        }
        PlayCommand::Done => return declare(state, bot, out, err),
    };
    ui::write_status(out, err, state.status())?;
    Ok(())
}

fn declare(
    state: &mut HandState,
    bot: &dyn AIOpponent,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let outcome = match state.advance_street() {
        Ok(o) => o,
        Err(_) => {
            ui::write_status(out, err, state.status())?;
            return Ok(());
        }
    };
    ui::write_status(out, err, state.status())?;
    if !outcome.auto_discarded.is_empty() {
        writeln!(out, "Discarded {}", format_cards(&outcome.auto_discarded))?;
    }
    play_opponent(state, bot)
        .map_err(|e| CliError::Engine(format!("{} move rejected: {}", bot.name(), e)))?;
    if !state.is_complete() {
        render(state, out)?;
    }
    Ok(())
}

fn render(state: &HandState, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", format_progress(&state.street_progress()))?;
    writeln!(out, "Opponent:")?;
    write!(out, "{}", format_board(state.board(Side::Opponent)))?;
    writeln!(out, "You:")?;
    write!(out, "{}", format_board(state.board(Side::Player)))?;
    writeln!(out, "In hand: {}", format_cards(&state.side(Side::Player).pool))
}
