//! # ridesim-engine: Let It Ride Session Engine
//!
//! Deterministic table engine for multi-seat Let It Ride. Seats share a
//! shuffled deck and two community cards per round, make two pull-or-ride
//! decisions through a [`strategy::Strategy`], and carry their own bankroll
//! and stop conditions. All randomness flows from explicit seeds managed by
//! [`seed::SeedAuthority`].
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card)
//! - [`deck`] - 52-card deck shuffled with a caller-owned generator
//! - [`hand`] - Five-card and three-card hand evaluation
//! - [`paytable`] - Main game and bonus payout multipliers
//! - [`config`] - Validated session and table configuration
//! - [`bankroll`] - Bankroll, peak and drawdown tracking
//! - [`seat`] - Per-seat session state
//! - [`table`] - Table session state machine (classic and seat replacement)
//! - [`result`] - Session and table results
//! - [`seed`] - Seed authority, per-session generators, checkpoint state
//! - [`quality`] - Statistical sanity check for generator output
//! - [`strategy`] - Decision trait consumed by the table
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use ridesim_engine::config::{SessionConfig, TableConfig};
//! use ridesim_engine::strategy::{Decision, DecisionContext, Strategy};
//! use ridesim_engine::table::TableSession;
//!
//! struct Cautious;
//!
//! impl Strategy for Cautious {
//!     fn decide_bet_one(&self, _: &DecisionContext<'_>) -> Decision {
//!         Decision::Pull
//!     }
//!     fn decide_bet_two(&self, _: &DecisionContext<'_>) -> Decision {
//!         Decision::Pull
//!     }
//!     fn name(&self) -> &str {
//!         "cautious"
//!     }
//! }
//!
//! let session = SessionConfig::builder(500, 5)
//!     .win_limit(100)
//!     .loss_limit(100)
//!     .max_hands(200)
//!     .build()
//!     .unwrap();
//! let table = TableConfig::single_seat(session);
//! let result = TableSession::new(&table, &Cautious, 42)
//!     .run_to_completion()
//!     .unwrap();
//! assert_eq!(result.seats[0].sessions.len(), 1);
//! ```
//!
//! ## Deterministic Play
//!
//! The same seed always deals the same cards:
//!
//! ```rust
//! use ridesim_engine::deck::Deck;
//! use ridesim_engine::seed::create_generator;
//!
//! let mut d1 = Deck::new();
//! let mut d2 = Deck::new();
//! d1.shuffle(&mut create_generator(7));
//! d2.shuffle(&mut create_generator(7));
//! assert_eq!(d1.deal_card(), d2.deal_card());
//! ```

pub mod bankroll;
pub mod cards;
pub mod config;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod paytable;
pub mod quality;
pub mod result;
pub mod seat;
pub mod seed;
pub mod strategy;
pub mod table;
