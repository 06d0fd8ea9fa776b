//! Decision policies for computer-controlled players.
//!
//! A [`DecisionPolicy`] answers the three questions the engine cannot answer
//! itself: buy or decline an unowned space, how to get out of jail, and
//! whether to accept a trade. Policies are pure readers of a
//! [`GameSnapshot`]; the engine validates and executes whatever they choose,
//! falling back to the escape roll when a choice is not executable.
//!
//! [`GreedyPolicy`] is the built-in heuristic opponent. It is deliberately
//! simple: it buys whatever it can afford, pays its way out of jail, and
//! scores trades by listed price with a premium on completing color groups.

use crate::board::{Board, SpaceKind};
use crate::core::{GameConfig, PlayerId};
use crate::engine::GameSnapshot;
use crate::ledger::TradeOffer;

/// How a jailed player wants to resolve jail this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JailDecision {
    /// Pay the bail and roll normally.
    PayBail,
    /// Attempt the escape roll.
    RollForDoubles,
    /// Spend a held Get Out of Jail Free card.
    UseCard,
}

/// Answer to a proposed trade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TradeResponse {
    Accept,
    Reject,
    /// Reject, but suggest these terms instead. The proposer is free to
    /// re-propose or walk away.
    Counter(TradeOffer),
}

/// Decision-making seam for a computer-controlled player.
pub trait DecisionPolicy {
    /// Buy the unowned space the player just landed on?
    fn decide_buy(&self, state: &GameSnapshot, space: u8) -> bool;

    /// How to resolve jail at the start of the turn.
    fn decide_jail(&self, state: &GameSnapshot) -> JailDecision;

    /// Accept or reject a trade, judged from the counterparty's
    /// (`offer.to`'s) perspective.
    fn decide_trade(&self, state: &GameSnapshot, offer: &TradeOffer) -> TradeResponse;
}

/// Cash-on-hand heuristic opponent.
///
/// - Buys any space it can afford with change to spare.
/// - Leaves jail the cheapest way available: a held card, then bail, then
///   the escape roll.
/// - Accepts a trade only when its own price-weighted gain clearly beats
///   the proposer's.
pub struct GreedyPolicy {
    board: Board,
    config: GameConfig,
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GreedyPolicy {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::standard(),
            config,
        }
    }

    /// Streets of `space`'s color group the player already owns, not
    /// counting `space` itself. Zero for railroads and utilities.
    fn group_affinity(&self, state: &GameSnapshot, player: PlayerId, space: u8) -> i64 {
        let SpaceKind::Property { group, .. } = self.board.space(space).kind else {
            return 0;
        };
        self.board
            .group_members(group)
            .iter()
            .filter(|&&s| s != space && state.owner_of(s) == Some(player))
            .count() as i64
    }

    /// Net worth change of one side of a trade, in heuristic points.
    ///
    /// Spaces count at listed price. Gaining a street near a completed
    /// group is worth a premium; surrendering one costs a larger penalty.
    /// Cash is weighted up when the player is short on funds.
    fn trade_gain(
        &self,
        state: &GameSnapshot,
        player: PlayerId,
        gained: &[u8],
        lost: &[u8],
        cash_delta: i64,
    ) -> f64 {
        let mut gain = 0.0;

        for &space in gained {
            let affinity = self.group_affinity(state, player, space);
            gain += self.board.space(space).price as f64;
            gain += (10 + 10 * affinity) as f64;
        }
        for &space in lost {
            let affinity = self.group_affinity(state, player, space);
            gain -= self.board.space(space).price as f64;
            gain -= (40 + 10 * affinity) as f64;
        }

        let balance = state.player(player).balance;
        let cash_weight = if balance < 200 { 5.0 } else { 2.5 };
        gain + cash_delta as f64 * cash_weight / 10.0
    }
}

impl DecisionPolicy for GreedyPolicy {
    fn decide_buy(&self, state: &GameSnapshot, space: u8) -> bool {
        state.current().balance > self.board.space(space).price
    }

    fn decide_jail(&self, state: &GameSnapshot) -> JailDecision {
        let me = state.current();
        if me.jail_cards > 0 {
            JailDecision::UseCard
        } else if me.balance >= self.config.bail {
            JailDecision::PayBail
        } else {
            JailDecision::RollForDoubles
        }
    }

    fn decide_trade(&self, state: &GameSnapshot, offer: &TradeOffer) -> TradeResponse {
        let my_gain = self.trade_gain(
            state,
            offer.to,
            &offer.spaces_given,
            &offer.spaces_received,
            offer.cash_given - offer.cash_received,
        );
        let their_gain = self.trade_gain(
            state,
            offer.from,
            &offer.spaces_received,
            &offer.spaces_given,
            offer.cash_received - offer.cash_given,
        );

        // A trade has to be clearly better for us than for the proposer.
        if my_gain > their_gain + 10.0 {
            TradeResponse::Accept
        } else {
            TradeResponse::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameBuilder;

    fn snapshot_with_balance(balance: i64) -> GameSnapshot {
        let engine = GameBuilder::new()
            .computer("Left")
            .computer("Right")
            .build(3);
        let mut snap = engine.snapshot();
        snap.players[0].balance = balance;
        snap
    }

    #[test]
    fn test_buys_when_affordable() {
        let policy = GreedyPolicy::default();
        let snap = snapshot_with_balance(1500);

        // Boardwalk, price 400.
        assert!(policy.decide_buy(&snap, 39));
    }

    #[test]
    fn test_declines_when_cash_does_not_exceed_price() {
        let policy = GreedyPolicy::default();
        let snap = snapshot_with_balance(400);

        assert!(!policy.decide_buy(&snap, 39));
    }

    #[test]
    fn test_jail_prefers_card_then_bail_then_roll() {
        let policy = GreedyPolicy::default();

        let mut snap = snapshot_with_balance(1500);
        snap.players[0].jail_cards = 1;
        assert_eq!(policy.decide_jail(&snap), JailDecision::UseCard);

        snap.players[0].jail_cards = 0;
        assert_eq!(policy.decide_jail(&snap), JailDecision::PayBail);

        snap.players[0].balance = 20;
        assert_eq!(policy.decide_jail(&snap), JailDecision::RollForDoubles);
    }

    #[test]
    fn test_rejects_even_trade() {
        let policy = GreedyPolicy::default();
        let mut snap = snapshot_with_balance(1500);
        snap.titles[1].owner = Some(PlayerId::new(0));
        snap.titles[3].owner = Some(PlayerId::new(1));

        // Mediterranean for Baltic, straight across. Symmetric, so neither
        // side clears the acceptance margin.
        let offer = TradeOffer {
            from: PlayerId::new(0),
            to: PlayerId::new(1),
            cash_given: 0,
            cash_received: 0,
            spaces_given: vec![1],
            spaces_received: vec![3],
        };
        assert_eq!(policy.decide_trade(&snap, &offer), TradeResponse::Reject);
    }

    #[test]
    fn test_accepts_lopsided_cash_offer() {
        let policy = GreedyPolicy::default();
        let mut snap = snapshot_with_balance(1500);
        snap.titles[1].owner = Some(PlayerId::new(1));

        // Proposer pays 500 for Mediterranean (price 60). Free money for
        // the counterparty.
        let offer = TradeOffer {
            from: PlayerId::new(0),
            to: PlayerId::new(1),
            cash_given: 500,
            cash_received: 0,
            spaces_given: vec![],
            spaces_received: vec![1],
        };
        assert_eq!(policy.decide_trade(&snap, &offer), TradeResponse::Accept);
    }

    #[test]
    fn test_group_completion_raises_value() {
        let policy = GreedyPolicy::default();
        let mut snap = snapshot_with_balance(1500);

        // Receiver already holds Baltic; Mediterranean completes Brown.
        snap.titles[3].owner = Some(PlayerId::new(1));
        snap.titles[1].owner = Some(PlayerId::new(0));

        let neutral = GameSnapshot {
            titles: {
                let mut t = snap.titles.clone();
                t[3].owner = None;
                t
            },
            ..snap.clone()
        };

        let with_group = policy.trade_gain(&snap, PlayerId::new(1), &[1], &[], -100);
        let without_group = policy.trade_gain(&neutral, PlayerId::new(1), &[1], &[], -100);
        assert!(with_group > without_group);
    }
}
