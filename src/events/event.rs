//! Event records emitted by the turn engine.

use serde::Serialize;

use crate::core::PlayerId;
use crate::deck::Card;
use crate::ledger::Account;

/// Why a player was sent to jail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum JailReason {
    /// Landed on the Go to Jail space.
    GoToJailSpace,
    /// Third consecutive doubles roll.
    ThirdDoubles,
    /// Drew a go-to-jail card.
    Card,
}

/// Something that happened inside the engine.
///
/// Events are facts, not commands: front ends render them, they never answer
/// them. Every state transition emits its events before the engine call that
/// caused it returns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GameEvent {
    DiceRolled {
        player: PlayerId,
        dice: [u8; 2],
    },
    TokenMoved {
        player: PlayerId,
        from: u8,
        to: u8,
    },
    /// Credit for passing or landing on Go.
    GoCredit {
        player: PlayerId,
        amount: i64,
    },
    RentPaid {
        payer: PlayerId,
        owner: PlayerId,
        amount: i64,
    },
    PropertyBought {
        player: PlayerId,
        space: u8,
    },
    CardDrawn {
        player: PlayerId,
        card: Card,
    },
    TaxPaid {
        player: PlayerId,
        amount: i64,
    },
    SentToJail {
        player: PlayerId,
        reason: JailReason,
    },
    BailPaid {
        player: PlayerId,
    },
    PlayerBankrupted {
        player: PlayerId,
        creditor: Account,
    },
    TradeSettled {
        from: PlayerId,
        to: PlayerId,
    },
    TurnEnded {
        next_player: PlayerId,
    },
    GameOver {
        winner: PlayerId,
    },
}
