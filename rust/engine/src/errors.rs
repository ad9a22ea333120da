use thiserror::Error;

use crate::board::Row;
use crate::cards::Card;

/// Errors raised by the engine.
///
/// Everything except [`GameError::InsufficientCards`] is a user constraint
/// violation: the operation was rejected and the hand state is untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("{row} row is full")]
    RowFull { row: Row },
    #[error("Card {card} cannot be played right now")]
    CardNotAvailable { card: Card },
    #[error("Card {card} is locked for the rest of the hand")]
    CardLocked { card: Card },
    #[error("Street {street} needs: {needs}. Current: placed {placed}, discarded {discarded}.")]
    QuotaNotMet {
        street: u8,
        needs: String,
        placed: usize,
        discarded: usize,
    },
    #[error("Street {street} still has {remaining} undeclared card(s) in hand")]
    PoolNotEmpty { street: u8, remaining: usize },
    #[error("Street {street} allows only {allowed} discard(s)")]
    DiscardLimit { street: u8, allowed: usize },
    #[error("Fantasyland requires a complete board (13 placed cards); placed {placed}")]
    FantasylandIncomplete { placed: usize },
    #[error("Not allowed while {phase}")]
    WrongPhase { phase: String },
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Board is not complete: {0}")]
    BoardIncomplete(String),
    #[error("Insufficient cards: requested {requested}, remaining {remaining}")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("Boards share card {0}")]
    OverlappingBoards(Card),
    #[error("Board lists card {0} more than once")]
    DuplicateCard(Card),
    #[error("Invalid card code: {0:?}")]
    InvalidCardCode(String),
}

impl GameError {
    /// True for errors caused by the caller's input rather than a broken invariant.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, GameError::InsufficientCards { .. })
    }
}
