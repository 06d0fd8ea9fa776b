//! Property tests: whole games under the greedy policy, checked against
//! the engine's structural invariants for arbitrary seeds.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use landlord_engine::board::BOARD_SIZE;
use landlord_engine::deck::CardEffect;
use landlord_engine::engine::GameBuilder;
use landlord_engine::events::GameEvent;
use landlord_engine::policy::GreedyPolicy;
use landlord_engine::{GameSnapshot, Phase, PlayerId};

const TURN_CAP: usize = 300;

/// Run one game to completion or the turn cap, returning the final
/// snapshot and every event emitted along the way.
fn run_game(seed: u64, players: usize) -> (GameSnapshot, Vec<GameEvent>) {
    let mut builder = GameBuilder::new();
    for i in 0..players {
        builder = builder.computer(format!("Bot {i}"));
    }
    let mut engine = builder.build(seed);

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let policy = GreedyPolicy::default();
    for _ in 0..TURN_CAP {
        if matches!(engine.phase(), Phase::GameOver { .. }) {
            break;
        }
        engine.play_policy_turn(&policy).unwrap();
    }

    let events = log.borrow().clone();
    (engine.snapshot(), events)
}

/// Net currency the bank injected, judging only by emitted events.
///
/// Rent and player-to-player card collections net to zero and are skipped.
/// Bankruptcy forgives a deficit by zeroing a negative balance, which only
/// ever adds money relative to this figure.
fn bank_net_from_events(events: &[GameEvent]) -> i64 {
    events
        .iter()
        .map(|event| match event {
            GameEvent::GoCredit { amount, .. } => *amount,
            GameEvent::TaxPaid { amount, .. } => -amount,
            GameEvent::BailPaid { .. } => -50,
            GameEvent::CardDrawn { card, .. } => match card.effect {
                CardEffect::Collect { amount } => amount,
                CardEffect::Pay { amount } => -amount,
                _ => 0,
            },
            _ => 0,
        })
        .sum()
}

fn purchase_total(events: &[GameEvent]) -> i64 {
    let board = landlord_engine::board::Board::standard();
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::PropertyBought { space, .. } => Some(*space),
            _ => None,
        })
        .map(|space| board.space(space).price)
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_dice_are_always_valid(seed in any::<u64>()) {
        let (_, events) = run_game(seed, 2);

        for event in &events {
            if let GameEvent::DiceRolled { dice, .. } = event {
                prop_assert!((1..=6).contains(&dice[0]));
                prop_assert!((1..=6).contains(&dice[1]));
            }
        }
    }

    #[test]
    fn test_positions_stay_on_board(seed in any::<u64>(), players in 2usize..=4) {
        let (snapshot, _) = run_game(seed, players);

        for player in &snapshot.players {
            prop_assert!(player.position < BOARD_SIZE);
        }
    }

    #[test]
    fn test_bankrupt_players_hold_nothing(seed in any::<u64>(), players in 2usize..=4) {
        let (snapshot, _) = run_game(seed, players);

        for player in &snapshot.players {
            if player.bankrupt {
                prop_assert_eq!(player.balance, 0);
                prop_assert!(snapshot.owned_spaces(player.id).is_empty());
            }
        }
    }

    #[test]
    fn test_every_title_has_at_most_one_solvent_owner(seed in any::<u64>()) {
        let (snapshot, _) = run_game(seed, 3);

        for title in &snapshot.titles {
            if let Some(owner) = title.owner {
                prop_assert!(!snapshot.player(owner).bankrupt);
            }
        }
    }

    #[test]
    fn test_money_conservation(seed in any::<u64>(), players in 2usize..=4) {
        let (snapshot, events) = run_game(seed, players);

        let total: i64 = snapshot.players.iter().map(|p| p.balance).sum();
        let expected = players as i64 * 1500 + bank_net_from_events(&events)
            - purchase_total(&events);

        // Bankruptcy settlement adjusts a deficit outside the event
        // stream, so the exact figure only holds for bankruptcy-free
        // games. Solvent balances are non-negative either way.
        let bankruptcies = events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerBankrupted { .. }));
        if !bankruptcies {
            prop_assert_eq!(total, expected);
        }
        for player in &snapshot.players {
            if !player.bankrupt {
                prop_assert!(player.balance >= 0);
            }
        }
    }

    #[test]
    fn test_game_over_means_exactly_one_survivor(seed in any::<u64>()) {
        let (snapshot, events) = run_game(seed, 2);

        if let Phase::GameOver { winner } = snapshot.phase {
            let solvent: Vec<PlayerId> = snapshot
                .players
                .iter()
                .filter(|p| !p.bankrupt)
                .map(|p| p.id)
                .collect();
            prop_assert_eq!(solvent, vec![winner]);
            prop_assert!(
                events
                    .iter()
                    .any(|e| matches!(e, GameEvent::GameOver { winner: w } if *w == winner)),
                "expected a GameOver event with the matching winner"
            );
        }
    }

    #[test]
    fn test_turns_rotate_over_solvent_players_only(seed in any::<u64>()) {
        let (snapshot, events) = run_game(seed, 3);

        for event in &events {
            if let GameEvent::TurnEnded { next_player } = event {
                prop_assert!(next_player.index() < snapshot.players.len());
            }
        }
        // The seat never rests on a bankrupt player.
        if !matches!(snapshot.phase, Phase::GameOver { .. }) {
            prop_assert!(!snapshot.current().bankrupt);
        }
    }
}

#[test]
fn test_replay_is_deterministic_across_player_counts() {
    for players in 2..=4 {
        let (a, _) = run_game(99, players);
        let (b, _) = run_game(99, players);
        assert_eq!(a, b);
    }
}
