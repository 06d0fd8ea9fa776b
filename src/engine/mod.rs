//! The turn state machine.
//!
//! ## Phases
//!
//! Observable phases between engine calls:
//!
//! ```text
//! AwaitingRoll -> (Moving -> ResolvingSpace, inside roll_dice)
//!              -> AwaitingPurchaseDecision | TurnEnd
//! TurnEnd      -> AwaitingRoll (same player on doubles, else next player)
//!              -> GameOver (one solvent player left)
//! ```
//!
//! Movement and space resolution are transient: `roll_dice` runs them to
//! completion, including nested resolutions from card effects, before it
//! returns. Jail is a player-level sub-state observed during `AwaitingRoll`;
//! a jailed player resolves jail (bail, card, or escape roll) instead of
//! rolling normally.
//!
//! The engine owns the board, deck, ledger, roster, and event bus. It is a
//! single explicitly-owned instance constructed by the caller - no
//! process-wide state, no internal locking, single-writer access assumed.

mod snapshot;
mod turn;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

pub use snapshot::GameSnapshot;
pub use turn::{GameBuilder, TurnEngine};

/// Observable turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Current player must roll (or resolve jail).
    AwaitingRoll,
    /// Current player landed on an unowned space and must buy or decline.
    AwaitingPurchaseDecision { space: u8 },
    /// Turn resolved; waiting for `end_turn`.
    TurnEnd,
    /// Terminal.
    GameOver { winner: PlayerId },
}
