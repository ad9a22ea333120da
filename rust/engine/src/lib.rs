//! # ofc-engine: Pineapple Open-Face Chinese Poker rules
//!
//! A deterministic two-player Pineapple OFC engine: a shared seeded deck, five
//! tiered streets, row evaluation, royalties, fouling, Fantasyland and a
//! zero-sum head-to-head scorer.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and card codes
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`board`] - Three-row board with row capacities
//! - [`hand`] - Three- and five-card row evaluation and comparison
//! - [`royalties`] - Per-row royalty tables
//! - [`fantasyland`] - Top-row Fantasyland qualification
//! - [`rules`] - Street deal/place/discard table and discard policy
//! - [`game`] - Hand state machine and cross-hand Fantasyland context
//! - [`scoring`] - Foul detection and two-board scoring
//! - [`logger`] - HandRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use ofc_engine::cards::parse_cards;
//! use ofc_engine::hand::{evaluate_row, Category};
//!
//! let cards = parse_cards("Ah 2d 3c 4s 5h").unwrap();
//! let eval = evaluate_row(&cards).unwrap();
//! assert_eq!(eval.category, Category::Straight);
//! assert_eq!(eval.tiebreak, vec![5]);
//! ```
//!
//! ## Scoring Two Boards
//!
//! ```rust
//! use ofc_engine::board::Board;
//! use ofc_engine::scoring::score_hand;
//!
//! let a = Board::parse("6s 6h 2c / 9s 9h 9d 4c 2d / 9c Tc Jc Qc Kc").unwrap();
//! let b = Board::parse("Ks 8d 3c / Kh Kd 8c 5d 2s / Qs Qd Jh Jd 2h").unwrap();
//! let score = score_hand(&a, &b).unwrap();
//! assert_eq!((score.points_a, score.points_b), (24, -24));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! The same seed always deals the same hand:
//!
//! ```rust
//! use ofc_engine::game::{HandState, MatchContext, Side};
//! use ofc_engine::rules::DiscardPolicy;
//!
//! let a = HandState::start_hand(&mut MatchContext::default(), 42, DiscardPolicy::Leftover).unwrap();
//! let b = HandState::start_hand(&mut MatchContext::default(), 42, DiscardPolicy::Leftover).unwrap();
//! assert_eq!(a.side(Side::Player).pool, b.side(Side::Player).pool);
//! ```

pub mod board;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod fantasyland;
pub mod game;
pub mod hand;
pub mod logger;
pub mod royalties;
pub mod rules;
pub mod scoring;
