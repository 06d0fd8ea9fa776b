//! The immutable 40-space board.
//!
//! ## Design Philosophy
//!
//! Space behavior is a tagged variant consumed by exhaustive matching in the
//! turn engine, not runtime type inspection. The board is pure lookup: no
//! mutation, no failure modes. Out-of-range indices are core bugs and panic.
//!
//! Ownership and improvements are *not* here - they live in the ledger's
//! title table so the board can be shared freely.

mod layout;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of spaces on the board.
pub const BOARD_SIZE: u8 = 40;

/// Index of the Go space.
pub const GO_INDEX: u8 = 0;

/// Index of the Jail / Just Visiting space.
pub const JAIL_INDEX: u8 = 10;

/// Color group of a street property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
}

/// Which tax a Tax space levies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxKind {
    /// Configurable: flat or a percentage of balance.
    Income,
    /// Always flat.
    Luxury,
}

/// What a space does when landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpaceKind {
    Go,
    /// A street with a color group and a rent table indexed by
    /// improvement level 0 (unimproved) through 5 (hotel).
    Property {
        group: ColorGroup,
        rent: [i64; 6],
    },
    Railroad,
    Utility,
    Tax {
        kind: TaxKind,
    },
    /// Draw-a-card space (Chance and Community Chest share one deck).
    Chance,
    /// Just visiting unless sent here.
    Jail,
    GoToJail,
    FreeParking,
}

/// One space's static metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Space {
    /// Board index, 0-39.
    pub index: u8,
    /// Printed name.
    pub name: &'static str,
    pub kind: SpaceKind,
    /// Purchase price; zero for non-ownable spaces.
    pub price: i64,
    /// Mortgage value; zero for non-ownable spaces.
    pub mortgage_value: i64,
}

impl Space {
    /// Can this space ever be owned?
    #[must_use]
    pub fn is_ownable(&self) -> bool {
        matches!(
            self.kind,
            SpaceKind::Property { .. } | SpaceKind::Railroad | SpaceKind::Utility
        )
    }
}

/// The full board. Static for the process lifetime.
#[derive(Clone, Debug)]
pub struct Board {
    spaces: Vec<Space>,
}

impl Board {
    /// The classic US layout.
    #[must_use]
    pub fn standard() -> Self {
        let spaces = layout::standard_spaces();
        debug_assert_eq!(spaces.len(), BOARD_SIZE as usize);
        Self { spaces }
    }

    /// Look up a space. Panics on an out-of-range index.
    #[must_use]
    pub fn space(&self, index: u8) -> &Space {
        assert!(index < BOARD_SIZE, "space index {index} out of range");
        &self.spaces[index as usize]
    }

    /// Iterate over all spaces in board order.
    pub fn spaces(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter()
    }

    /// Indices of the streets in a color group, in board order.
    #[must_use]
    pub fn group_members(&self, group: ColorGroup) -> SmallVec<[u8; 4]> {
        self.spaces
            .iter()
            .filter(|s| matches!(s.kind, SpaceKind::Property { group: g, .. } if g == group))
            .map(|s| s.index)
            .collect()
    }

    /// Indices of the four railroads, in board order.
    #[must_use]
    pub fn railroads(&self) -> SmallVec<[u8; 4]> {
        self.spaces
            .iter()
            .filter(|s| s.kind == SpaceKind::Railroad)
            .map(|s| s.index)
            .collect()
    }

    /// Indices of the two utilities, in board order.
    #[must_use]
    pub fn utilities(&self) -> SmallVec<[u8; 4]> {
        self.spaces
            .iter()
            .filter(|s| s.kind == SpaceKind::Utility)
            .map(|s| s.index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_has_40_spaces() {
        let board = Board::standard();
        assert_eq!(board.spaces().count(), 40);
        for (i, space) in board.spaces().enumerate() {
            assert_eq!(space.index as usize, i);
        }
    }

    #[test]
    fn test_corners() {
        let board = Board::standard();
        assert_eq!(board.space(0).kind, SpaceKind::Go);
        assert_eq!(board.space(10).kind, SpaceKind::Jail);
        assert_eq!(board.space(20).kind, SpaceKind::FreeParking);
        assert_eq!(board.space(30).kind, SpaceKind::GoToJail);
    }

    #[test]
    fn test_group_members() {
        let board = Board::standard();

        let browns = board.group_members(ColorGroup::Brown);
        assert_eq!(browns.as_slice(), &[1, 3]);

        let reds = board.group_members(ColorGroup::Red);
        assert_eq!(reds.as_slice(), &[21, 23, 24]);

        let dark_blues = board.group_members(ColorGroup::DarkBlue);
        assert_eq!(dark_blues.as_slice(), &[37, 39]);
    }

    #[test]
    fn test_railroads_and_utilities() {
        let board = Board::standard();
        assert_eq!(board.railroads().as_slice(), &[5, 15, 25, 35]);
        assert_eq!(board.utilities().as_slice(), &[12, 28]);
    }

    #[test]
    fn test_ownable_spaces() {
        let board = Board::standard();
        let ownable = board.spaces().filter(|s| s.is_ownable()).count();
        // 22 streets + 4 railroads + 2 utilities.
        assert_eq!(ownable, 28);

        assert!(!board.space(0).is_ownable());
        assert!(board.space(39).is_ownable());
    }

    #[test]
    fn test_tax_spaces() {
        let board = Board::standard();
        assert_eq!(board.space(4).kind, SpaceKind::Tax { kind: TaxKind::Income });
        assert_eq!(board.space(38).kind, SpaceKind::Tax { kind: TaxKind::Luxury });
    }

    #[test]
    fn test_known_prices_and_rents() {
        let board = Board::standard();

        let med = board.space(1);
        assert_eq!(med.name, "Mediterranean Avenue");
        assert_eq!(med.price, 60);
        assert_eq!(med.mortgage_value, 30);
        match med.kind {
            SpaceKind::Property { rent, .. } => assert_eq!(rent, [2, 10, 30, 90, 160, 250]),
            _ => panic!("space 1 must be a street"),
        }

        let boardwalk = board.space(39);
        assert_eq!(boardwalk.price, 400);
        match boardwalk.kind {
            SpaceKind::Property { rent, .. } => assert_eq!(rent[5], 2000),
            _ => panic!("space 39 must be a street"),
        }

        assert_eq!(board.space(5).price, 200);
        assert_eq!(board.space(12).price, 150);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        Board::standard().space(40);
    }
}
