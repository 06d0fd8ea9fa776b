//! A deterministic rule engine for a property-trading board game.
//!
//! The engine drives complete games for 2-8 players over the classic
//! 40-space board: dice movement, property purchase, rent with monopoly
//! and railroad/utility schedules, taxes, a 16-card chance deck, jail,
//! trades, bankruptcy, and a last-player-standing finish.
//!
//! ## Design
//!
//! - **Command/query surface.** Front ends drive the game through
//!   [`engine::TurnEngine`] commands (`roll_dice`, `buy_current_property`,
//!   `end_turn`, ...) and observe it through [`engine::GameSnapshot`] and
//!   the [`events::EventBus`]. Illegal commands return
//!   [`error::EngineError`] and leave state untouched.
//! - **Determinism.** All randomness flows from one seed through
//!   [`core::GameRng`], with independent streams for dice and the deck.
//!   The same seed and command sequence replays the same game.
//! - **Policies.** Computer players answer the engine's open decisions
//!   through [`policy::DecisionPolicy`]; [`policy::GreedyPolicy`] is the
//!   built-in opponent.
//!
//! ## Example
//!
//! ```
//! use landlord_engine::engine::GameBuilder;
//! use landlord_engine::policy::GreedyPolicy;
//!
//! let mut engine = GameBuilder::new()
//!     .computer("North")
//!     .computer("South")
//!     .build(7);
//!
//! let policy = GreedyPolicy::default();
//! for _ in 0..10 {
//!     engine.play_policy_turn(&policy).unwrap();
//! }
//! assert!(engine.snapshot().turn_number > 1);
//! ```

pub mod board;
pub mod core;
pub mod deck;
pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod policy;

pub use crate::core::{Controller, GameConfig, PlayerId, TaxRule};
pub use crate::engine::{GameBuilder, GameSnapshot, Phase, TurnEngine};
pub use crate::error::EngineError;
pub use crate::events::GameEvent;
