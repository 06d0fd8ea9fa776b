//! Immutable state snapshots.
//!
//! A snapshot is a plain copy of everything observable: players, titles,
//! phase, turn bookkeeping. Decision policies consume snapshots instead of
//! the live engine, which keeps them pure and replayable.

use serde::{Deserialize, Serialize};

use super::Phase;
use crate::core::{Player, PlayerId};
use crate::ledger::TitleState;

/// Immutable copy of the observable game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Players in turn order, bankrupt ones included.
    pub players: Vec<Player>,
    /// Title states indexed by board position.
    pub titles: Vec<TitleState>,
    pub phase: Phase,
    pub current_player: PlayerId,
    /// Dice from the most recent roll this turn, if any.
    pub last_roll: Option<[u8; 2]>,
    /// Completed turn count plus one.
    pub turn_number: u32,
}

impl GameSnapshot {
    /// Player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> &Player {
        self.player(self.current_player)
    }

    /// Owner of a space, if any.
    #[must_use]
    pub fn owner_of(&self, space: u8) -> Option<PlayerId> {
        self.titles[space as usize].owner
    }

    /// Spaces a player owns, in board order.
    #[must_use]
    pub fn owned_spaces(&self, player: PlayerId) -> Vec<u8> {
        self.titles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.owner == Some(player))
            .map(|(i, _)| i as u8)
            .collect()
    }
}
