//! # ofc-ai: Autonomous Opponents for Pineapple OFC
//!
//! Bots that decide a whole turn (placements plus discards) for one side of
//! a [`HandState`]. Decisions are pure functions of the visible state.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait defining the interface for AI decision-making
//! - [`greedy`] - Greedy row-scoring heuristic (the default opponent)
//! - [`random`] - Random placements for baseline comparison
//! - [`create_ai`] - Factory function for creating AI opponents
//! - [`advance_with_bot`] - Declare the player's street and let a bot answer
//!
//! ## Quick Start
//!
//! ```rust
//! use ofc_ai::{advance_with_bot, create_ai, AIOpponent};
//! use ofc_engine::game::{HandState, MatchContext, Phase, Side};
//! use ofc_engine::rules::DiscardPolicy;
//!
//! let bot = create_ai("greedy").unwrap();
//! let mut ctx = MatchContext::default();
//! let mut hand = HandState::start_hand(&mut ctx, 42, DiscardPolicy::Leftover).unwrap();
//!
//! // Let the same bot set the player's first street too.
//! let mv = bot.choose_move(&hand, Side::Player);
//! hand.apply_move(Side::Player, &mv).unwrap();
//! advance_with_bot(&mut hand, bot.as_ref()).unwrap();
//! assert_eq!(hand.phase(), Phase::Placing(2));
//! ```
//!
//! ## AI Types
//!
//! - `"greedy"` - Greedy heuristic
//! - `"random"` - Random placements

use ofc_engine::errors::GameError;
use ofc_engine::game::{HandState, Move, Side, StreetOutcome};
use tracing::debug;

pub mod greedy;
pub mod random;

/// Names accepted by [`create_ai`].
pub const AI_TYPES: [&str; 2] = ["greedy", "random"];

/// Trait defining the interface for OFC bots.
///
/// # Required Methods
///
/// - [`choose_move`](AIOpponent::choose_move) - Decide a full turn for one side
/// - [`name`](AIOpponent::name) - Return the AI's identifier/name
///
/// # Example Implementation
///
/// ```rust
/// use ofc_ai::AIOpponent;
/// use ofc_engine::game::{HandState, Move, Side};
///
/// struct BurnEverything;
///
/// impl AIOpponent for BurnEverything {
///     fn choose_move(&self, state: &HandState, side: Side) -> Move {
///         Move { placements: vec![], burns: state.side(side).pool.clone() }
///     }
///
///     fn name(&self) -> &str {
///         "BurnEverything"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Decide the placements and burns for `side`'s current pool.
    ///
    /// # Arguments
    ///
    /// * `state` - The hand in progress
    /// * `side` - Which board the bot is playing
    ///
    /// # Returns
    ///
    /// A `Move` that places exactly [`HandState::quota_for`] cards and burns
    /// the rest of the pool
    fn choose_move(&self, state: &HandState, side: Side) -> Move;

    /// Return the name/identifier of this AI implementation.
    fn name(&self) -> &str;
}

/// Factory function to create AI opponents by type string.
///
/// # Arguments
///
/// * `ai_type` - String identifier for the AI type (see [`AI_TYPES`])
///
/// # Returns
///
/// A boxed trait object, or `None` for an unknown type
///
/// # Example
///
/// ```rust
/// use ofc_ai::create_ai;
///
/// let ai = create_ai("greedy").unwrap();
/// assert_eq!(ai.name(), "GreedyBot");
/// assert!(create_ai("solver").is_none());
/// ```
pub fn create_ai(ai_type: &str) -> Option<Box<dyn AIOpponent>> {
    match ai_type.trim().to_ascii_lowercase().as_str() {
        "greedy" => Some(Box::new(greedy::GreedyBot::new())),
        "random" => Some(Box::new(random::RandomBot::default())),
        _ => None,
    }
}

/// Declares the player's street, then plays the opponent's turn with `bot`.
///
/// # Errors
///
/// Whatever [`HandState::advance_street`] rejects, or a bot move the engine
/// refuses.
pub fn advance_with_bot(
    state: &mut HandState,
    bot: &dyn AIOpponent,
) -> Result<StreetOutcome, GameError> {
    let outcome = state.advance_street()?;
    play_opponent(state, bot)?;
    Ok(outcome)
}

/// Plays the opponent's pending turn with `bot`.
pub fn play_opponent(state: &mut HandState, bot: &dyn AIOpponent) -> Result<(), GameError> {
    let mv = bot.choose_move(state, Side::Opponent);
    debug!(
        bot = bot.name(),
        placed = mv.placements.len(),
        burned = mv.burns.len(),
        "opponent move chosen"
    );
    state.apply_opponent_move(&mv)
}

/// Plays both sides of a hand to completion, `player_bot` for the player.
pub fn play_hand(
    state: &mut HandState,
    player_bot: &dyn AIOpponent,
    opponent_bot: &dyn AIOpponent,
) -> Result<(), GameError> {
    while !state.is_complete() {
        let mv = player_bot.choose_move(state, Side::Player);
        state.apply_move(Side::Player, &mv)?;
        advance_with_bot(state, opponent_bot)?;
    }
    Ok(())
}
