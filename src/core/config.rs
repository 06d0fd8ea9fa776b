//! Game configuration.
//!
//! Callers configure money constants at startup rather than the engine
//! hardcoding them. Defaults match the classic US rule set.

use serde::{Deserialize, Serialize};

/// How the Income Tax space charges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxRule {
    /// Fixed deduction.
    Flat(i64),
    /// Percentage of the payer's current balance, rounded down.
    Percent(u8),
}

impl TaxRule {
    /// Amount owed by a player with the given balance.
    #[must_use]
    pub fn amount(self, balance: i64) -> i64 {
        match self {
            TaxRule::Flat(amount) => amount,
            TaxRule::Percent(pct) => balance.max(0) * i64::from(pct) / 100,
        }
    }
}

/// Money constants and rule knobs, fixed for the life of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cash each player starts with.
    pub starting_balance: i64,
    /// Credit for passing or landing on Go.
    pub go_credit: i64,
    /// Fixed payment to leave jail.
    pub bail: i64,
    /// Income Tax policy (the Luxury Tax space is always flat).
    pub income_tax: TaxRule,
    /// Flat Luxury Tax deduction.
    pub luxury_tax: i64,
    /// Failed escape rolls before bail is forced.
    pub max_jail_turns: u8,
    /// Utility rent: dice total times this when the owner holds one utility.
    pub utility_single_multiplier: i64,
    /// Utility rent: dice total times this when the owner holds both.
    pub utility_all_multiplier: i64,
    /// Railroad rent with one railroad; doubles per additional railroad.
    pub railroad_base_rent: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1500,
            go_credit: 200,
            bail: 50,
            income_tax: TaxRule::Flat(200),
            luxury_tax: 75,
            max_jail_turns: 3,
            utility_single_multiplier: 4,
            utility_all_multiplier: 10,
            railroad_base_rent: 25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.starting_balance, 1500);
        assert_eq!(cfg.go_credit, 200);
        assert_eq!(cfg.bail, 50);
        assert_eq!(cfg.income_tax, TaxRule::Flat(200));
    }

    #[test]
    fn test_tax_rule_flat() {
        assert_eq!(TaxRule::Flat(200).amount(1500), 200);
        assert_eq!(TaxRule::Flat(200).amount(50), 200);
    }

    #[test]
    fn test_tax_rule_percent() {
        assert_eq!(TaxRule::Percent(10).amount(1500), 150);
        assert_eq!(TaxRule::Percent(10).amount(155), 15);
        // Negative balances owe nothing under a percentage rule.
        assert_eq!(TaxRule::Percent(10).amount(-40), 0);
    }
}
