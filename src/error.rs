//! Engine error type.
//!
//! Every rejected command returns one of these and leaves the game state
//! untouched. Errors are recoverable by construction: the caller retries
//! with a legal command.

use thiserror::Error;

use crate::core::PlayerId;

/// Why a command was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The command is not legal in the current phase.
    #[error("command not allowed in the current phase")]
    WrongPhase,

    /// The game has finished; no further commands are accepted.
    #[error("the game is over")]
    GameOver,

    /// The space has no price and can never be owned.
    #[error("space is not purchasable")]
    NotPurchasable,

    /// The space already has an owner.
    #[error("space is already owned")]
    AlreadyOwned,

    /// The player cannot afford the payment.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A jailed player tried to roll normally.
    #[error("player is in jail")]
    InJail,

    /// A jail command was issued by a player who is not in jail.
    #[error("player is not in jail")]
    NotInJail,

    /// No Get Out of Jail Free card is held.
    #[error("no jail card held")]
    NoJailCard,

    /// A trade names the same player on both sides.
    #[error("cannot trade with yourself")]
    TradeWithSelf,

    /// A trade names a player who is out of the game.
    #[error("trade party {0} is bankrupt")]
    TradePartyBankrupt(PlayerId),

    /// A traded title is not owned by the side offering it.
    #[error("traded title is not owned by the offering side")]
    TitleNotOwned,
}
