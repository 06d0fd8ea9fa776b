//! Player identity and the turn-ordered roster.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Games run 2-8 players; ids are 0-based and
//! fixed at game creation.
//!
//! ## Roster
//!
//! All players in turn order, backed by `Vec` for O(1) access. Bankrupt
//! players stay in the roster (for end-of-game reporting) but are skipped
//! by the rotation helpers.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier. Ids are 0-based positions in turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Who drives a player's decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    /// A front end relays a human's choices.
    Human,
    /// A `DecisionPolicy` answers for this player.
    Computer,
}

/// One participant's mutable state.
///
/// Balances are signed: a required payment may briefly push a balance
/// negative, which is the ledger's deficit signal for bankruptcy
/// resolution. Owned titles live in the ledger's title table, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Fixed id, equal to the turn-order position.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Cash on hand, in currency units.
    pub balance: i64,
    /// Board position, 0-39.
    pub position: u8,
    /// In jail (as opposed to just visiting space 10).
    pub in_jail: bool,
    /// Failed escape rolls this jail stay, 0-3.
    pub jail_turns: u8,
    /// Held Get Out of Jail Free cards.
    pub jail_cards: u8,
    /// Out of the game. Skipped in rotation, kept for reporting.
    pub bankrupt: bool,
    /// Human or computer controlled.
    pub controller: Controller,
}

impl Player {
    /// Create a player at Go with the given starting balance.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, balance: i64, controller: Controller) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            position: 0,
            in_jail: false,
            jail_turns: 0,
            jail_cards: 0,
            bankrupt: false,
            controller,
        }
    }

    /// Still in the game.
    #[must_use]
    pub fn is_solvent(&self) -> bool {
        !self.bankrupt
    }
}

/// All players in fixed turn order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Create a roster from players already in turn order.
    ///
    /// Panics if the count is outside 2-8 or ids do not match positions.
    #[must_use]
    pub fn new(players: Vec<Player>) -> Self {
        assert!(
            (2..=8).contains(&players.len()),
            "Roster requires 2-8 players"
        );
        for (i, p) in players.iter().enumerate() {
            assert_eq!(p.id.index(), i, "Player ids must match turn order");
        }
        Self { players }
    }

    /// Number of players, bankrupt ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Rosters are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get a player by id.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &Player {
        &self.players[player.index()]
    }

    /// Get a mutable player by id.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player.index()]
    }

    /// Iterate over all players in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Ids of players still in the game, in turn order.
    pub fn solvent_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().filter(|p| p.is_solvent()).map(|p| p.id)
    }

    /// Count of players still in the game.
    #[must_use]
    pub fn solvent_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_solvent()).count()
    }

    /// The next non-bankrupt player after `current`, wrapping around.
    ///
    /// Panics if no solvent player exists - the engine must have reached
    /// `GameOver` before that can happen.
    #[must_use]
    pub fn next_solvent_after(&self, current: PlayerId) -> PlayerId {
        let n = self.players.len();
        for step in 1..=n {
            let candidate = PlayerId::new(((current.index() + step) % n) as u8);
            if self.get(candidate).is_solvent() {
                return candidate;
            }
        }
        panic!("no solvent player in roster");
    }
}

impl Index<PlayerId> for Roster {
    type Output = Player;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl IndexMut<PlayerId> for Roster {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: u8) -> Roster {
        Roster::new(
            (0..n)
                .map(|i| {
                    Player::new(
                        PlayerId::new(i),
                        format!("P{i}"),
                        1500,
                        Controller::Human,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        assert_eq!(p0.index(), 0);
        assert_eq!(format!("{}", p0), "Player 0");

        let all: Vec<_> = PlayerId::all(4).collect();
        assert_eq!(all.len(), 4);
        assert_eq!(all[3], PlayerId::new(3));
    }

    #[test]
    fn test_roster_access() {
        let mut r = roster(3);
        assert_eq!(r.len(), 3);
        assert_eq!(r[PlayerId::new(1)].balance, 1500);

        r[PlayerId::new(1)].balance -= 200;
        assert_eq!(r[PlayerId::new(1)].balance, 1300);
    }

    #[test]
    fn test_rotation_skips_bankrupt() {
        let mut r = roster(4);
        r[PlayerId::new(1)].bankrupt = true;
        r[PlayerId::new(2)].bankrupt = true;

        assert_eq!(r.next_solvent_after(PlayerId::new(0)), PlayerId::new(3));
        assert_eq!(r.next_solvent_after(PlayerId::new(3)), PlayerId::new(0));
        assert_eq!(r.solvent_count(), 2);
    }

    #[test]
    fn test_rotation_wraps() {
        let r = roster(2);
        assert_eq!(r.next_solvent_after(PlayerId::new(1)), PlayerId::new(0));
    }

    #[test]
    #[should_panic(expected = "Roster requires 2-8 players")]
    fn test_roster_too_small() {
        let _ = roster(1);
    }

    #[test]
    fn test_roster_serde() {
        let r = roster(2);
        let json = serde_json::to_string(&r).unwrap();
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
