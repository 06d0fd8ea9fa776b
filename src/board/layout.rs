//! The classic US board layout.

use super::{ColorGroup, Space, SpaceKind, TaxKind};

fn street(
    index: u8,
    name: &'static str,
    group: ColorGroup,
    price: i64,
    rent: [i64; 6],
) -> Space {
    Space {
        index,
        name,
        kind: SpaceKind::Property { group, rent },
        price,
        // Mortgage value is half the purchase price across the board.
        mortgage_value: price / 2,
    }
}

fn railroad(index: u8, name: &'static str) -> Space {
    Space {
        index,
        name,
        kind: SpaceKind::Railroad,
        price: 200,
        mortgage_value: 100,
    }
}

fn utility(index: u8, name: &'static str) -> Space {
    Space {
        index,
        name,
        kind: SpaceKind::Utility,
        price: 150,
        mortgage_value: 75,
    }
}

fn fixture(index: u8, name: &'static str, kind: SpaceKind) -> Space {
    Space {
        index,
        name,
        kind,
        price: 0,
        mortgage_value: 0,
    }
}

/// All 40 spaces in board order.
pub(super) fn standard_spaces() -> Vec<Space> {
    use ColorGroup::*;

    vec![
        fixture(0, "Go", SpaceKind::Go),
        street(1, "Mediterranean Avenue", Brown, 60, [2, 10, 30, 90, 160, 250]),
        fixture(2, "Community Chest", SpaceKind::Chance),
        street(3, "Baltic Avenue", Brown, 60, [4, 20, 60, 180, 320, 450]),
        fixture(4, "Income Tax", SpaceKind::Tax { kind: TaxKind::Income }),
        railroad(5, "Reading Railroad"),
        street(6, "Oriental Avenue", LightBlue, 100, [6, 30, 90, 270, 400, 550]),
        fixture(7, "Chance", SpaceKind::Chance),
        street(8, "Vermont Avenue", LightBlue, 100, [6, 30, 90, 270, 400, 550]),
        street(9, "Connecticut Avenue", LightBlue, 120, [8, 40, 100, 300, 450, 600]),
        fixture(10, "Jail / Just Visiting", SpaceKind::Jail),
        street(11, "St. Charles Place", Pink, 140, [10, 50, 150, 450, 625, 750]),
        utility(12, "Electric Company"),
        street(13, "States Avenue", Pink, 140, [10, 50, 150, 450, 625, 750]),
        street(14, "Virginia Avenue", Pink, 160, [12, 60, 180, 500, 700, 900]),
        railroad(15, "Pennsylvania Railroad"),
        street(16, "St. James Place", Orange, 180, [14, 70, 200, 550, 750, 950]),
        fixture(17, "Community Chest", SpaceKind::Chance),
        street(18, "Tennessee Avenue", Orange, 180, [14, 70, 200, 550, 750, 950]),
        street(19, "New York Avenue", Orange, 200, [16, 80, 220, 600, 800, 1000]),
        fixture(20, "Free Parking", SpaceKind::FreeParking),
        street(21, "Kentucky Avenue", Red, 220, [18, 90, 250, 700, 875, 1050]),
        fixture(22, "Chance", SpaceKind::Chance),
        street(23, "Indiana Avenue", Red, 220, [18, 90, 250, 700, 875, 1050]),
        street(24, "Illinois Avenue", Red, 240, [20, 100, 300, 750, 925, 1100]),
        railroad(25, "B. & O. Railroad"),
        street(26, "Atlantic Avenue", Yellow, 260, [22, 110, 330, 800, 975, 1150]),
        street(27, "Ventnor Avenue", Yellow, 260, [22, 110, 330, 800, 975, 1150]),
        utility(28, "Water Works"),
        street(29, "Marvin Gardens", Yellow, 280, [24, 120, 360, 850, 1025, 1200]),
        fixture(30, "Go to Jail", SpaceKind::GoToJail),
        street(31, "Pacific Avenue", Green, 300, [26, 130, 390, 900, 1100, 1275]),
        street(32, "North Carolina Avenue", Green, 300, [26, 130, 390, 900, 1100, 1275]),
        fixture(33, "Community Chest", SpaceKind::Chance),
        street(34, "Pennsylvania Avenue", Green, 300, [28, 150, 450, 1000, 1200, 1400]),
        railroad(35, "Short Line"),
        fixture(36, "Chance", SpaceKind::Chance),
        street(37, "Park Place", DarkBlue, 350, [35, 175, 500, 1100, 1300, 1500]),
        fixture(38, "Luxury Tax", SpaceKind::Tax { kind: TaxKind::Luxury }),
        street(39, "Boardwalk", DarkBlue, 400, [50, 200, 600, 1400, 1700, 2000]),
    ]
}
