//! Hand state machine: streets, Fantasyland, locking and finalization.
//!
//! A [`HandState`] owns everything about one hand. The player side is driven
//! card by card through the mutators; the opponent acts once per street via
//! [`HandState::apply_opponent_move`] after the player declares with
//! [`HandState::advance_street`]. Only [`MatchContext`] outlives a hand.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{Board, Row, BOARD_SIZE};
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::fantasyland::{qualify, FantasylandTicket, BASE_FANTASYLAND_CARDS};
use crate::rules::{
    street_requirement, validate_street_progress, DiscardPolicy, StreetRequirement, FINAL_STREET,
};
use crate::scoring::{evaluate_final_result, score_hand, BoardResult, ScoreResult};

/// Which board an operation targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("player"),
            Side::Opponent => f.write_str("opponent"),
        }
    }
}

/// Where the hand currently stands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// The player is arranging this street's cards.
    Placing(u8),
    /// The player declared the street; the opponent acts next.
    StreetComplete(u8),
    /// The player is arranging a Fantasyland deal.
    FantasylandPlacing,
    /// The player declared a Fantasyland board; the opponent acts next.
    FantasylandComplete,
    HandComplete,
}

impl Phase {
    pub fn is_player_turn(&self) -> bool {
        matches!(self, Phase::Placing(_) | Phase::FantasylandPlacing)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Placing(s) => write!(f, "placing street {}", s),
            Phase::StreetComplete(s) => write!(f, "street {} complete, opponent to act", s),
            Phase::FantasylandPlacing => f.write_str("placing Fantasyland"),
            Phase::FantasylandComplete => f.write_str("Fantasyland complete, opponent to act"),
            Phase::HandComplete => f.write_str("hand complete"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Message describing the outcome of the most recent operation.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Fantasyland bookkeeping carried from one hand to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchContext {
    /// When false, qualifying tops never grant Fantasyland.
    pub fantasyland_enabled: bool,
    pub fantasyland_eligible: bool,
    /// Cards dealt if the next hand is Fantasyland.
    pub fantasyland_cards: u8,
    /// Set after a Fantasyland hand; the next hand is always a normal one.
    pub fantasyland_blocked: bool,
}

impl Default for MatchContext {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MatchContext {
    pub fn new(fantasyland_enabled: bool) -> Self {
        Self {
            fantasyland_enabled,
            fantasyland_eligible: false,
            fantasyland_cards: BASE_FANTASYLAND_CARDS,
            fantasyland_blocked: false,
        }
    }

    /// Updates next-hand eligibility from a finished hand.
    pub fn absorb(&mut self, result: &HandResult) {
        if result.fantasyland_hand {
            self.fantasyland_blocked = true;
            self.fantasyland_eligible = false;
            self.fantasyland_cards = BASE_FANTASYLAND_CARDS;
            return;
        }
        match result.next_fantasyland {
            Some(ticket) if self.fantasyland_enabled => {
                self.fantasyland_eligible = true;
                self.fantasyland_cards = ticket.cards;
            }
            _ => {
                self.fantasyland_eligible = false;
                self.fantasyland_cards = BASE_FANTASYLAND_CARDS;
            }
        }
    }
}

/// One card-to-row assignment of a [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub card: Card,
    pub row: Row,
}

/// A complete turn for one side: cards to place and cards to discard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub placements: Vec<Placement>,
    pub burns: Vec<Card>,
}

/// One side's cards for the current hand.
#[derive(Debug, Clone, Default)]
pub struct SideState {
    pub board: Board,
    /// Dealt but not yet placed or discarded
    pub pool: Vec<Card>,
    pub dealt_by_street: BTreeMap<u8, Vec<Card>>,
    pub discarded_by_street: BTreeMap<u8, Vec<Card>>,
    /// Fantasyland cards left over once 13 are on the board
    pub burned: Vec<Card>,
    street_cards: Vec<Card>,
    locked: HashSet<Card>,
    street_start: [usize; 3],
}

impl SideState {
    fn receive(&mut self, street: u8, cards: Vec<Card>) {
        self.street_start = self.board.row_lengths();
        self.street_cards = cards.clone();
        self.pool.extend(cards.iter().copied());
        self.dealt_by_street.entry(street).or_default().extend(cards);
    }

    fn lock_street(&mut self) {
        self.locked.extend(self.street_cards.drain(..));
        self.street_start = self.board.row_lengths();
    }

    pub fn is_locked(&self, card: Card) -> bool {
        self.locked.contains(&card)
    }

    /// Cards that reached the board since the street was dealt.
    pub fn placed_this_street(&self) -> usize {
        self.board.len() - self.street_start.iter().sum::<usize>()
    }

    pub fn discarded_on(&self, street: u8) -> usize {
        self.discarded_by_street.get(&street).map_or(0, Vec::len)
    }

    fn pool_position(&self, card: Card) -> Option<usize> {
        self.pool.iter().position(|c| *c == card)
    }

    /// Cards this side has discarded or burned, in hand order.
    pub fn all_discards(&self) -> Vec<Card> {
        self.discarded_by_street
            .values()
            .flatten()
            .chain(self.burned.iter())
            .copied()
            .collect()
    }

    fn card_count(&self) -> usize {
        self.board.len()
            + self.pool.len()
            + self.burned.len()
            + self.discarded_by_street.values().map(Vec::len).sum::<usize>()
    }
}

/// Placement and discard counts for the street in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetProgress {
    pub street: u8,
    pub placed_now: usize,
    pub discarded_now: usize,
    pub pool_remaining: usize,
    /// `None` during Fantasyland
    pub requirement: Option<StreetRequirement>,
}

/// What [`HandState::advance_street`] did on a successful declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetOutcome {
    /// The declared street; 0 for a Fantasyland board
    pub street: u8,
    /// Pool cards discarded by the leftover policy or burned in Fantasyland
    pub auto_discarded: Vec<Card>,
    /// Cards dealt to the opponent for its turn
    pub opponent_dealt: usize,
}

/// Final outcome of a hand from the player's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub player: BoardResult,
    pub opponent: BoardResult,
    /// Player is board A
    pub score: ScoreResult,
    pub fantasyland_hand: bool,
    /// Ticket for the player's next hand, if the top row qualified
    pub next_fantasyland: Option<FantasylandTicket>,
}

/// Complete state of one hand.
#[derive(Debug, Clone)]
pub struct HandState {
    seed: u64,
    deck: Deck,
    player: SideState,
    opponent: SideState,
    street: u8,
    phase: Phase,
    in_fantasyland: bool,
    fantasyland_dealt: usize,
    discard_policy: DiscardPolicy,
    status: Status,
    result: Option<HandResult>,
}

impl HandState {
    /// Shuffles a fresh deck and deals the player's opening cards.
    ///
    /// A Fantasyland ticket in `ctx` turns the hand into a Fantasyland hand
    /// unless the previous hand was one, in which case the ticket is dropped.
    ///
    /// # Errors
    ///
    /// [`GameError::InsufficientCards`] only if the deal table were
    /// inconsistent with a 52-card deck.
    ///
    /// # Examples
    ///
    /// ```
    /// use ofc_engine::game::{HandState, MatchContext, Phase, Side};
    /// use ofc_engine::rules::DiscardPolicy;
    ///
    /// let mut ctx = MatchContext::default();
    /// let hand = HandState::start_hand(&mut ctx, 7, DiscardPolicy::Leftover).unwrap();
    /// assert_eq!(hand.phase(), Phase::Placing(1));
    /// assert_eq!(hand.side(Side::Player).pool.len(), 5);
    /// ```
    pub fn start_hand(
        ctx: &mut MatchContext,
        seed: u64,
        discard_policy: DiscardPolicy,
    ) -> Result<HandState, GameError> {
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        let mut state = HandState {
            seed,
            deck,
            player: SideState::default(),
            opponent: SideState::default(),
            street: 1,
            phase: Phase::Placing(1),
            in_fantasyland: false,
            fantasyland_dealt: 0,
            discard_policy,
            status: Status::new(StatusKind::Info, ""),
            result: None,
        };

        if ctx.fantasyland_blocked {
            ctx.fantasyland_blocked = false;
            ctx.fantasyland_eligible = false;
            ctx.fantasyland_cards = BASE_FANTASYLAND_CARDS;
            state.deal_player_street(1)?;
            state.status = Status::new(
                StatusKind::Info,
                "Fantasyland cannot happen two hands in a row",
            );
        } else if ctx.fantasyland_eligible && ctx.fantasyland_enabled {
            let count = usize::from(ctx.fantasyland_cards);
            let cards = state.deck.deal(count)?;
            state.player.receive(1, cards);
            state.in_fantasyland = true;
            state.fantasyland_dealt = count;
            state.phase = Phase::FantasylandPlacing;
            state.status = Status::new(
                StatusKind::Info,
                format!("Fantasyland: {} cards, set all 13", count),
            );
        } else {
            state.deal_player_street(1)?;
        }
        debug!(seed, fantasyland = state.in_fantasyland, "hand started");
        Ok(state)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn street(&self) -> u8 {
        self.street
    }

    pub fn in_fantasyland(&self) -> bool {
        self.in_fantasyland
    }

    pub fn discard_policy(&self) -> DiscardPolicy {
        self.discard_policy
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn result(&self) -> Option<&HandResult> {
        self.result.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::HandComplete
    }

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn board(&self, side: Side) -> &Board {
        &self.side(side).board
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Cards accounted for across deck, pools, boards, discards and burns.
    /// Always 52.
    pub fn card_census(&self) -> usize {
        self.deck.remaining() + self.player.card_count() + self.opponent.card_count()
    }

    /// Cards `side` must place from its current pool.
    pub fn quota_for(&self, side: Side) -> usize {
        let s = self.side(side);
        if self.in_fantasyland {
            s.board.open_slots().min(s.pool.len())
        } else {
            street_requirement(self.street)
                .map_or(0, |r| r.place)
                .min(s.pool.len())
        }
    }

    pub fn street_progress(&self) -> StreetProgress {
        let street = if self.in_fantasyland { 0 } else { self.street };
        StreetProgress {
            street,
            placed_now: self.player.placed_this_street(),
            discarded_now: if self.in_fantasyland {
                self.player.burned.len()
            } else {
                self.player.discarded_on(self.street)
            },
            pool_remaining: self.player.pool.len(),
            requirement: if self.in_fantasyland {
                None
            } else {
                street_requirement(self.street)
            },
        }
    }

    /// True when the player may still move `card` this street.
    pub fn can_move_card(&self, card: Card) -> bool {
        self.phase.is_player_turn()
            && !self.player.is_locked(card)
            && self.player.street_cards.contains(&card)
            && (self.player.pool.contains(&card) || self.player.board.contains(card))
    }

    /// Places `card` from the pool (or from another row, if it was placed this
    /// street) onto `row`.
    pub fn place_card(&mut self, card: Card, row: Row) -> Result<(), GameError> {
        let outcome = self.try_place(card, row);
        self.report(outcome, |_| format!("Placed {} on {}", card, row))
    }

    pub fn move_card_between_rows(&mut self, card: Card, row: Row) -> Result<(), GameError> {
        let outcome = self.try_move(card, row);
        self.report(outcome, |_| format!("Moved {} to {}", card, row))
    }

    /// Takes a card placed or discarded this street back into the pool.
    pub fn return_card_to_pool(&mut self, card: Card) -> Result<(), GameError> {
        let outcome = self.try_return(card);
        self.report(outcome, |_| format!("Returned {} to hand", card))
    }

    /// Discards a pool or current-street card; burns it in Fantasyland.
    pub fn discard_card(&mut self, card: Card) -> Result<(), GameError> {
        let outcome = self.try_discard(card);
        self.report(outcome, |_| format!("Discarded {}", card))
    }

    /// Declares the player's street (or Fantasyland board) and deals the
    /// opponent's cards.
    ///
    /// Under [`DiscardPolicy::Leftover`] the pool is discarded first when it
    /// holds exactly the missing discards. Nothing changes on error.
    pub fn advance_street(&mut self) -> Result<StreetOutcome, GameError> {
        let outcome = self.try_advance();
        self.report(outcome, |o| {
            if o.street == 0 {
                "Fantasyland board set".to_string()
            } else {
                format!("Street {} complete", o.street)
            }
        })
    }

    /// Applies the opponent's turn, then deals the next street or finalizes.
    pub fn apply_opponent_move(&mut self, mv: &Move) -> Result<(), GameError> {
        let outcome = self.try_opponent_move(mv);
        self.report(outcome, String::clone).map(drop)
    }

    /// Applies a whole turn for either side.
    ///
    /// For the player this places and discards without declaring the street;
    /// for the opponent it is [`HandState::apply_opponent_move`].
    pub fn apply_move(&mut self, side: Side, mv: &Move) -> Result<(), GameError> {
        match side {
            Side::Opponent => self.apply_opponent_move(mv),
            Side::Player => {
                let mut next = self.clone();
                let outcome = next.try_player_move(mv);
                if outcome.is_ok() {
                    *self = next;
                }
                self.report(outcome, |_| {
                    format!(
                        "Placed {} card(s), discarded {}",
                        mv.placements.len(),
                        mv.burns.len()
                    )
                })
            }
        }
    }

    fn report<T>(
        &mut self,
        outcome: Result<T, GameError>,
        success: impl FnOnce(&T) -> String,
    ) -> Result<T, GameError> {
        match &outcome {
            Ok(v) => self.status = Status::new(StatusKind::Success, success(v)),
            Err(e) => {
                warn!(error = %e, phase = %self.phase, "operation rejected");
                self.status = Status::new(StatusKind::Error, e.to_string());
            }
        }
        outcome
    }

    fn ensure_player_turn(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Placing(_) | Phase::FantasylandPlacing => Ok(()),
            Phase::HandComplete => Err(GameError::HandAlreadyComplete),
            other => Err(GameError::WrongPhase {
                phase: other.to_string(),
            }),
        }
    }

    fn ensure_movable(&self, card: Card) -> Result<(), GameError> {
        if self.player.is_locked(card) {
            return Err(GameError::CardLocked { card });
        }
        if !self.player.street_cards.contains(&card) {
            return Err(GameError::CardNotAvailable { card });
        }
        Ok(())
    }

    fn try_place(&mut self, card: Card, row: Row) -> Result<(), GameError> {
        self.ensure_player_turn()?;
        if let Some(idx) = self.player.pool_position(card) {
            self.player.board.push(row, card)?;
            self.player.pool.remove(idx);
            return Ok(());
        }
        if self.player.board.contains(card) {
            return self.try_move(card, row);
        }
        if self.player.is_locked(card) {
            return Err(GameError::CardLocked { card });
        }
        Err(GameError::CardNotAvailable { card })
    }

    fn try_move(&mut self, card: Card, row: Row) -> Result<(), GameError> {
        self.ensure_player_turn()?;
        self.ensure_movable(card)?;
        let from = self
            .player
            .board
            .find(card)
            .ok_or(GameError::CardNotAvailable { card })?;
        if from == row {
            return Ok(());
        }
        if self.player.board.is_row_full(row) {
            return Err(GameError::RowFull { row });
        }
        self.player.board.remove(card);
        self.player.board.push(row, card)
    }

    fn try_return(&mut self, card: Card) -> Result<(), GameError> {
        self.ensure_player_turn()?;
        self.ensure_movable(card)?;
        if self.player.board.remove(card).is_some() {
            self.player.pool.push(card);
            return Ok(());
        }
        if self.in_fantasyland {
            if let Some(idx) = self.player.burned.iter().position(|c| *c == card) {
                self.player.burned.remove(idx);
                self.player.pool.push(card);
                return Ok(());
            }
        } else if let Some(log) = self.player.discarded_by_street.get_mut(&self.street) {
            if let Some(idx) = log.iter().position(|c| *c == card) {
                log.remove(idx);
                self.player.pool.push(card);
                return Ok(());
            }
        }
        Err(GameError::CardNotAvailable { card })
    }

    fn try_discard(&mut self, card: Card) -> Result<(), GameError> {
        self.ensure_player_turn()?;
        self.ensure_movable(card)?;
        let (used, allowed) = if self.in_fantasyland {
            (
                self.player.burned.len(),
                self.fantasyland_dealt.saturating_sub(BOARD_SIZE),
            )
        } else {
            let req = street_requirement(self.street).ok_or_else(|| GameError::WrongPhase {
                phase: self.phase.to_string(),
            })?;
            (self.player.discarded_on(self.street), req.discard)
        };
        if used >= allowed {
            return Err(GameError::DiscardLimit {
                street: if self.in_fantasyland { 0 } else { self.street },
                allowed,
            });
        }
        if let Some(idx) = self.player.pool_position(card) {
            self.player.pool.remove(idx);
        } else if self.player.board.remove(card).is_none() {
            return Err(GameError::CardNotAvailable { card });
        }
        if self.in_fantasyland {
            self.player.burned.push(card);
        } else {
            self.player
                .discarded_by_street
                .entry(self.street)
                .or_default()
                .push(card);
        }
        Ok(())
    }

    fn try_advance(&mut self) -> Result<StreetOutcome, GameError> {
        match self.phase {
            Phase::Placing(street) => self.declare_street(street),
            Phase::FantasylandPlacing => self.declare_fantasyland(),
            Phase::HandComplete => Err(GameError::HandAlreadyComplete),
            other => Err(GameError::WrongPhase {
                phase: other.to_string(),
            }),
        }
    }

    fn declare_street(&mut self, street: u8) -> Result<StreetOutcome, GameError> {
        let req = street_requirement(street).ok_or_else(|| GameError::WrongPhase {
            phase: self.phase.to_string(),
        })?;
        let placed = self.player.placed_this_street();
        let discarded = self.player.discarded_on(street);
        let pool = self.player.pool.len();
        let sweep_pool = self.discard_policy == DiscardPolicy::Leftover
            && placed == req.place
            && discarded + pool == req.discard;
        let (discarded_after, pool_after) = if sweep_pool {
            (discarded + pool, 0)
        } else {
            (discarded, pool)
        };
        validate_street_progress(street, placed, discarded_after, pool_after)?;

        let opponent_cards = self.deck.deal(req.deal)?;
        let auto_discarded = if sweep_pool {
            let swept: Vec<Card> = self.player.pool.drain(..).collect();
            self.player
                .discarded_by_street
                .entry(street)
                .or_default()
                .extend(swept.iter().copied());
            swept
        } else {
            Vec::new()
        };
        self.player.lock_street();
        let opponent_dealt = opponent_cards.len();
        self.opponent.receive(street, opponent_cards);
        self.phase = Phase::StreetComplete(street);
        debug!(street, placed, discarded = discarded_after, "player street declared");
        Ok(StreetOutcome {
            street,
            auto_discarded,
            opponent_dealt,
        })
    }

    fn declare_fantasyland(&mut self) -> Result<StreetOutcome, GameError> {
        let placed = self.player.board.len();
        if placed != BOARD_SIZE {
            return Err(GameError::FantasylandIncomplete { placed });
        }
        let opponent_cards = self.deck.deal(usize::from(BASE_FANTASYLAND_CARDS))?;
        let auto_discarded: Vec<Card> = self.player.pool.drain(..).collect();
        self.player.burned.extend(auto_discarded.iter().copied());
        self.player.lock_street();
        let opponent_dealt = opponent_cards.len();
        self.opponent.receive(1, opponent_cards);
        self.phase = Phase::FantasylandComplete;
        debug!(burned = self.player.burned.len(), "Fantasyland board declared");
        Ok(StreetOutcome {
            street: 0,
            auto_discarded,
            opponent_dealt,
        })
    }

    fn try_player_move(&mut self, mv: &Move) -> Result<(), GameError> {
        for p in &mv.placements {
            self.try_place(p.card, p.row)?;
        }
        for &card in &mv.burns {
            self.try_discard(card)?;
        }
        Ok(())
    }

    fn try_opponent_move(&mut self, mv: &Move) -> Result<String, GameError> {
        let street = match self.phase {
            Phase::StreetComplete(s) => s,
            Phase::FantasylandComplete => FINAL_STREET,
            Phase::HandComplete => return Err(GameError::HandAlreadyComplete),
            other => {
                return Err(GameError::WrongPhase {
                    phase: other.to_string(),
                })
            }
        };
        let quota = self.quota_for(Side::Opponent);
        let mut side = self.opponent.clone();
        for p in &mv.placements {
            let idx = side
                .pool_position(p.card)
                .ok_or(GameError::CardNotAvailable { card: p.card })?;
            side.board.push(p.row, p.card)?;
            side.pool.remove(idx);
        }
        for &card in &mv.burns {
            let idx = side
                .pool_position(card)
                .ok_or(GameError::CardNotAvailable { card })?;
            side.pool.remove(idx);
            if self.in_fantasyland {
                side.burned.push(card);
            } else {
                side.discarded_by_street.entry(street).or_default().push(card);
            }
        }
        if mv.placements.len() != quota || !side.pool.is_empty() {
            let needs = if self.in_fantasyland {
                format!("Place {}", quota)
            } else {
                street_requirement(street).map_or_else(String::new, |r| r.describe())
            };
            return Err(GameError::QuotaNotMet {
                street,
                needs,
                placed: mv.placements.len(),
                discarded: mv.burns.len(),
            });
        }
        side.lock_street();

        if self.in_fantasyland || street >= FINAL_STREET {
            let result = self.compute_result(&self.player.board, &side.board)?;
            self.opponent = side;
            debug!(
                points = result.score.points_a,
                player_fouled = result.player.fouled,
                opponent_fouled = result.opponent.fouled,
                "hand finalized"
            );
            let message = format!("Hand complete: {:+} points", result.score.points_a);
            self.result = Some(result);
            self.phase = Phase::HandComplete;
            Ok(message)
        } else {
            let next = street + 1;
            let req = street_requirement(next).ok_or_else(|| GameError::WrongPhase {
                phase: self.phase.to_string(),
            })?;
            let cards = self.deck.deal(req.deal)?;
            self.opponent = side;
            self.street = next;
            self.player.receive(next, cards);
            self.phase = Phase::Placing(next);
            debug!(street = next, "street dealt");
            Ok(format!("Opponent played street {}; street {} dealt", street, next))
        }
    }

    fn compute_result(&self, player: &Board, opponent: &Board) -> Result<HandResult, GameError> {
        player.ensure_complete("player")?;
        opponent.ensure_complete("opponent")?;
        let player_result = evaluate_final_result(player)?;
        let opponent_result = evaluate_final_result(opponent)?;
        let score = score_hand(player, opponent)?;
        let next_fantasyland = if self.in_fantasyland {
            None
        } else {
            qualify(&player_result.top.evaluation, player_result.fouled)
        };
        Ok(HandResult {
            player: player_result,
            opponent: opponent_result,
            score,
            fantasyland_hand: self.in_fantasyland,
            next_fantasyland,
        })
    }

    fn deal_player_street(&mut self, street: u8) -> Result<(), GameError> {
        let req = street_requirement(street).ok_or_else(|| GameError::WrongPhase {
            phase: self.phase.to_string(),
        })?;
        let cards = self.deck.deal(req.deal)?;
        self.street = street;
        self.player.receive(street, cards);
        self.phase = Phase::Placing(street);
        Ok(())
    }
}
