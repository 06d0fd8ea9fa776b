//! Ownership and money movement.
//!
//! The ledger owns the per-space title table and performs every balance
//! mutation in the game. Operations are atomic: they either apply fully or
//! reject with [`EngineError`] leaving state untouched. The one deliberate
//! exception to "reject" is a required payment the payer cannot cover:
//! [`Ledger::transfer`] applies it anyway, drives the balance negative, and
//! reports a [`TransferOutcome::Deficit`] so the turn engine can run
//! bankruptcy resolution. Purchases and trades are voluntary and are
//! rejected outright when unaffordable.
//!
//! Rent computation ([`Ledger::rent_due`]) is a pure function of the board,
//! the title table, and the dice total - no side effects, so policies and
//! tests can call it freely.

use serde::{Deserialize, Serialize};

use crate::board::{Board, ColorGroup, SpaceKind, BOARD_SIZE};
use crate::core::{GameConfig, PlayerId, Roster};
use crate::error::EngineError;

/// A party to a money movement: a player, or the bank.
///
/// The bank is the unowned sink and source - Go credit and taxes mint and
/// burn currency; everything player-to-player nets to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Account {
    Bank,
    Player(PlayerId),
}

/// Per-space ownership state for an ownable space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleState {
    /// Current owner; `None` means bank-held.
    pub owner: Option<PlayerId>,
    /// Improvement level 0 (unimproved) through 5 (hotel).
    pub improvements: u8,
    pub mortgaged: bool,
}

/// Result of a required transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Payer covered the amount.
    Paid,
    /// Payer's balance went negative by `shortfall`; the caller must
    /// initiate bankruptcy resolution.
    Deficit { shortfall: i64 },
}

/// A proposed exchange of cash and titles between two players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    /// Offering player.
    pub from: PlayerId,
    /// Counterparty.
    pub to: PlayerId,
    /// Cash `from` gives `to`.
    pub cash_given: i64,
    /// Cash `to` gives `from`.
    pub cash_received: i64,
    /// Titles `from` gives `to`.
    pub spaces_given: Vec<u8>,
    /// Titles `to` gives `from`.
    pub spaces_received: Vec<u8>,
}

/// Ownership/balance state and money-movement operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Indexed by board position; entries for non-ownable spaces stay
    /// bank-held forever.
    titles: Vec<TitleState>,
}

impl Ledger {
    /// A fresh ledger with every title bank-held.
    #[must_use]
    pub fn new() -> Self {
        Self {
            titles: vec![TitleState::default(); BOARD_SIZE as usize],
        }
    }

    /// Title state for a space. Panics on an out-of-range index.
    #[must_use]
    pub fn title(&self, space: u8) -> &TitleState {
        assert!(space < BOARD_SIZE, "space index {space} out of range");
        &self.titles[space as usize]
    }

    /// Current owner of a space, if any.
    #[must_use]
    pub fn owner_of(&self, space: u8) -> Option<PlayerId> {
        self.title(space).owner
    }

    /// Indices of all spaces a player owns, in board order.
    #[must_use]
    pub fn owned_spaces(&self, player: PlayerId) -> Vec<u8> {
        self.titles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.owner == Some(player))
            .map(|(i, _)| i as u8)
            .collect()
    }

    /// Does `player` own every street in `group`?
    #[must_use]
    pub fn owns_full_group(&self, board: &Board, player: PlayerId, group: ColorGroup) -> bool {
        board
            .group_members(group)
            .iter()
            .all(|&i| self.owner_of(i) == Some(player))
    }

    /// How many spaces of the given kind the player owns.
    #[must_use]
    pub fn count_owned(&self, board: &Board, player: PlayerId, kind: SpaceKind) -> usize {
        self.titles
            .iter()
            .enumerate()
            .filter(|(i, t)| t.owner == Some(player) && board.space(*i as u8).kind == kind)
            .count()
    }

    /// Repair assessment over the player's improvements.
    ///
    /// Level 5 counts as one hotel; levels 1-4 count as that many houses.
    #[must_use]
    pub fn repair_assessment(&self, player: PlayerId, per_house: i64, per_hotel: i64) -> i64 {
        self.titles
            .iter()
            .filter(|t| t.owner == Some(player))
            .map(|t| match t.improvements {
                0 => 0,
                5 => per_hotel,
                houses => i64::from(houses) * per_house,
            })
            .sum()
    }

    /// Move currency between accounts.
    ///
    /// A bank payer always covers; a player payer may be driven negative,
    /// in which case the transfer still applies fully and the outcome is a
    /// deficit signal. Player-to-player transfers therefore always net to
    /// zero regardless of solvency.
    pub fn transfer(
        &mut self,
        roster: &mut Roster,
        payer: Account,
        payee: Account,
        amount: i64,
    ) -> TransferOutcome {
        assert!(amount >= 0, "transfer amount must be non-negative");

        let mut outcome = TransferOutcome::Paid;

        if let Account::Player(p) = payer {
            let balance = &mut roster[p].balance;
            *balance -= amount;
            if *balance < 0 {
                outcome = TransferOutcome::Deficit {
                    shortfall: -*balance,
                };
            }
        }
        if let Account::Player(p) = payee {
            roster[p].balance += amount;
        }

        log::trace!("transfer {payer:?} -> {payee:?}: {amount}");
        outcome
    }

    /// Buy an unowned space for its listed price.
    ///
    /// Rejects (state unchanged) when the space is not purchasable, already
    /// owned, or the buyer cannot afford it.
    pub fn buy_property(
        &mut self,
        roster: &mut Roster,
        board: &Board,
        player: PlayerId,
        space: u8,
    ) -> Result<(), EngineError> {
        let listing = board.space(space);
        if !listing.is_ownable() {
            return Err(EngineError::NotPurchasable);
        }
        if self.owner_of(space).is_some() {
            return Err(EngineError::AlreadyOwned);
        }
        if roster[player].balance < listing.price {
            return Err(EngineError::InsufficientBalance);
        }

        roster[player].balance -= listing.price;
        self.titles[space as usize].owner = Some(player);
        Ok(())
    }

    /// Rent owed for landing on an owned space. Pure.
    ///
    /// - Street: rent-table value for the improvement level, doubled at
    ///   level 0 when the owner holds the whole color group.
    /// - Railroad: base rent doubling per additional railroad owned
    ///   (1x, 2x, 4x, 8x).
    /// - Utility: dice total times the single- or all-utilities multiplier.
    ///
    /// Panics if the space is unowned - callers check ownership first.
    #[must_use]
    pub fn rent_due(&self, board: &Board, config: &GameConfig, space: u8, dice_total: u8) -> i64 {
        let title = self.title(space);
        let owner = title.owner.expect("rent_due on unowned space");

        match board.space(space).kind {
            SpaceKind::Property { group, rent } => {
                let base = rent[title.improvements as usize];
                if title.improvements == 0 && self.owns_full_group(board, owner, group) {
                    base * 2
                } else {
                    base
                }
            }
            SpaceKind::Railroad => {
                let count = self.count_owned(board, owner, SpaceKind::Railroad);
                config.railroad_base_rent << (count.saturating_sub(1))
            }
            SpaceKind::Utility => {
                let count = self.count_owned(board, owner, SpaceKind::Utility);
                let multiplier = if count >= board.utilities().len() {
                    config.utility_all_multiplier
                } else {
                    config.utility_single_multiplier
                };
                i64::from(dice_total) * multiplier
            }
            _ => panic!("rent_due on non-ownable space {space}"),
        }
    }

    /// Resolve a bankruptcy: every title (improvements and mortgage reset)
    /// and any remaining positive balance go to the creditor, then the
    /// debtor is marked bankrupt with a zero balance.
    ///
    /// Titles ceded to the bank become unowned again.
    pub fn settle_bankruptcy(&mut self, roster: &mut Roster, debtor: PlayerId, creditor: Account) {
        let new_owner = match creditor {
            Account::Bank => None,
            Account::Player(p) => Some(p),
        };

        for title in self.titles.iter_mut().filter(|t| t.owner == Some(debtor)) {
            *title = TitleState {
                owner: new_owner,
                improvements: 0,
                mortgaged: false,
            };
        }

        let remainder = roster[debtor].balance.max(0);
        if remainder > 0 {
            if let Account::Player(p) = creditor {
                roster[p].balance += remainder;
            }
        }

        let debtor_state = &mut roster[debtor];
        debtor_state.balance = 0;
        debtor_state.bankrupt = true;
        debtor_state.in_jail = false;

        log::debug!("{} bankrupted, assets to {creditor:?}", debtor_state.name);
    }

    /// Apply a validated trade atomically.
    ///
    /// Rejects self-trades, trades involving a bankrupt party, offers of
    /// titles the offering side does not own, and cash either side cannot
    /// cover. On rejection nothing moves.
    pub fn apply_trade(&mut self, roster: &mut Roster, offer: &TradeOffer) -> Result<(), EngineError> {
        if offer.from == offer.to {
            return Err(EngineError::TradeWithSelf);
        }
        for party in [offer.from, offer.to] {
            if roster[party].bankrupt {
                return Err(EngineError::TradePartyBankrupt(party));
            }
        }
        assert!(offer.cash_given >= 0 && offer.cash_received >= 0);

        if offer.spaces_given.iter().any(|&s| self.owner_of(s) != Some(offer.from))
            || offer.spaces_received.iter().any(|&s| self.owner_of(s) != Some(offer.to))
        {
            return Err(EngineError::TitleNotOwned);
        }
        if roster[offer.from].balance < offer.cash_given
            || roster[offer.to].balance < offer.cash_received
        {
            return Err(EngineError::InsufficientBalance);
        }

        roster[offer.from].balance += offer.cash_received - offer.cash_given;
        roster[offer.to].balance += offer.cash_given - offer.cash_received;
        for &s in &offer.spaces_given {
            self.titles[s as usize].owner = Some(offer.to);
        }
        for &s in &offer.spaces_received {
            self.titles[s as usize].owner = Some(offer.from);
        }
        Ok(())
    }

    /// Test and scenario hook: assign an owner directly.
    #[doc(hidden)]
    pub fn set_owner(&mut self, space: u8, owner: Option<PlayerId>) {
        assert!(space < BOARD_SIZE, "space index {space} out of range");
        self.titles[space as usize].owner = owner;
    }

    /// Test and scenario hook: set an improvement level directly.
    #[doc(hidden)]
    pub fn set_improvements(&mut self, space: u8, level: u8) {
        assert!(level <= 5, "improvement level {level} out of range");
        self.titles[space as usize].improvements = level;
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
