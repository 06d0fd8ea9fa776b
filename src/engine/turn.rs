//! Engine construction and the command API.

use std::collections::VecDeque;

use super::{GameSnapshot, Phase};
use crate::board::{Board, SpaceKind, TaxKind, BOARD_SIZE, JAIL_INDEX};
use crate::core::{Controller, GameConfig, GameRng, Player, PlayerId, Roster};
use crate::deck::{Card, CardEffect, Deck};
use crate::error::EngineError;
use crate::events::{EventBus, GameEvent, JailReason, SubscriptionId};
use crate::ledger::{Account, Ledger, TradeOffer, TransferOutcome};
use crate::policy::{DecisionPolicy, JailDecision};

/// Builds a [`TurnEngine`] from a player list, config, and seed.
///
/// ```
/// use landlord_engine::engine::GameBuilder;
///
/// let engine = GameBuilder::new()
///     .human("Alice")
///     .computer("Banker Bot")
///     .build(42);
/// assert_eq!(engine.snapshot().players.len(), 2);
/// ```
pub struct GameBuilder {
    players: Vec<(String, Controller)>,
    config: GameConfig,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            config: GameConfig::default(),
        }
    }
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a human-controlled player. Turn order follows insertion order.
    #[must_use]
    pub fn human(mut self, name: impl Into<String>) -> Self {
        self.players.push((name.into(), Controller::Human));
        self
    }

    /// Add a computer-controlled player.
    #[must_use]
    pub fn computer(mut self, name: impl Into<String>) -> Self {
        self.players.push((name.into(), Controller::Computer));
        self
    }

    /// Override the default rule constants.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the engine. Panics unless 2-8 players were added.
    #[must_use]
    pub fn build(self, seed: u64) -> TurnEngine {
        assert!(
            (2..=8).contains(&self.players.len()),
            "Game requires 2-8 players"
        );

        let config = self.config;
        let roster = Roster::new(
            self.players
                .into_iter()
                .enumerate()
                .map(|(i, (name, controller))| {
                    Player::new(
                        PlayerId::new(i as u8),
                        name,
                        config.starting_balance,
                        controller,
                    )
                })
                .collect(),
        );

        let rng = GameRng::new(seed);
        TurnEngine {
            config,
            board: Board::standard(),
            deck: Deck::standard(rng.for_context("deck")),
            ledger: Ledger::new(),
            roster,
            dice: rng.for_context("dice"),
            bus: EventBus::new(),
            phase: Phase::AwaitingRoll,
            current: PlayerId::new(0),
            last_roll: None,
            doubles_streak: 0,
            turn_number: 1,
            queued_rolls: VecDeque::new(),
        }
    }
}

/// The rule engine driving one game to completion.
///
/// One command runs to completion - movement, nested card resolutions, event
/// emissions and all - before the next is accepted. Front ends call these
/// methods synchronously and render the events they receive; they must not
/// interleave calls.
pub struct TurnEngine {
    config: GameConfig,
    board: Board,
    deck: Deck,
    ledger: Ledger,
    roster: Roster,
    dice: GameRng,
    bus: EventBus,
    phase: Phase,
    current: PlayerId,
    last_roll: Option<[u8; 2]>,
    /// Consecutive doubles rolled by the current player this turn.
    doubles_streak: u8,
    turn_number: u32,
    /// Scripted dice, consumed before the RNG. Scenario/test hook.
    queued_rolls: VecDeque<[u8; 2]>,
}

impl TurnEngine {
    // === Read surface ===

    /// Current observable phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// A player's state.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.roster[id]
    }

    /// The static board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The ownership/balance ledger.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Immutable copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.roster.iter().cloned().collect(),
            titles: (0..BOARD_SIZE).map(|i| *self.ledger.title(i)).collect(),
            phase: self.phase,
            current_player: self.current,
            last_roll: self.last_roll,
            turn_number: self.turn_number,
        }
    }

    /// Register an event handler; see [`EventBus`].
    pub fn subscribe(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.bus.subscribe(handler)
    }

    /// Remove a previously registered handler.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.bus.unsubscribe(id)
    }

    // === Commands ===

    /// Roll and resolve the resulting movement.
    ///
    /// A third consecutive doubles roll sends the player to jail and
    /// forfeits the move. Otherwise the token advances `(position + total)
    /// mod 40`, collecting the Go credit on a wrap, and the landing space is
    /// resolved - possibly recursively, when a drawn card moves the token
    /// again.
    pub fn roll_dice(&mut self) -> Result<(), EngineError> {
        self.expect_phase_awaiting_roll()?;
        if self.roster[self.current].in_jail {
            return Err(EngineError::InJail);
        }

        let dice = self.roll();
        if dice[0] == dice[1] {
            self.doubles_streak += 1;
            if self.doubles_streak >= 3 {
                log::debug!("{} rolled a third consecutive double", self.name(self.current));
                self.send_to_jail(self.current, JailReason::ThirdDoubles);
                self.phase = Phase::TurnEnd;
                return Ok(());
            }
        } else {
            self.doubles_streak = 0;
        }

        let total = dice[0] + dice[1];
        self.advance_token(self.current, total);
        self.resolve_space(total);
        Ok(())
    }

    /// Buy the space awaiting a purchase decision.
    pub fn buy_current_property(&mut self) -> Result<(), EngineError> {
        let space = self.expect_purchase_decision()?;
        self.ledger
            .buy_property(&mut self.roster, &self.board, self.current, space)?;
        self.emit(GameEvent::PropertyBought {
            player: self.current,
            space,
        });
        self.phase = Phase::TurnEnd;
        Ok(())
    }

    /// Decline the space awaiting a purchase decision.
    pub fn decline_current_property(&mut self) -> Result<(), EngineError> {
        self.expect_purchase_decision()?;
        self.phase = Phase::TurnEnd;
        Ok(())
    }

    /// Pay bail voluntarily and leave jail, ready to roll this turn.
    pub fn pay_jail_bail(&mut self) -> Result<(), EngineError> {
        self.expect_in_jail()?;
        if self.roster[self.current].balance < self.config.bail {
            return Err(EngineError::InsufficientBalance);
        }

        self.ledger.transfer(
            &mut self.roster,
            Account::Player(self.current),
            Account::Bank,
            self.config.bail,
        );
        self.emit(GameEvent::BailPaid {
            player: self.current,
        });
        self.release_from_jail(self.current);
        Ok(())
    }

    /// Spend a held Get Out of Jail Free card and leave jail.
    pub fn use_jail_card(&mut self) -> Result<(), EngineError> {
        self.expect_in_jail()?;
        if self.roster[self.current].jail_cards == 0 {
            return Err(EngineError::NoJailCard);
        }

        self.roster[self.current].jail_cards -= 1;
        self.release_from_jail(self.current);
        Ok(())
    }

    /// Attempt to escape jail by rolling doubles.
    ///
    /// Doubles escape and move immediately (no extra roll afterwards). The
    /// third failed attempt forces the bail payment - which can bankrupt -
    /// and, if the player survives it, moves them by the rolled total.
    pub fn attempt_jail_roll(&mut self) -> Result<(), EngineError> {
        self.expect_in_jail()?;

        let dice = self.roll();
        let total = dice[0] + dice[1];

        if dice[0] == dice[1] {
            self.release_from_jail(self.current);
            self.advance_token(self.current, total);
            self.resolve_space(total);
            return Ok(());
        }

        self.roster[self.current].jail_turns += 1;
        if self.roster[self.current].jail_turns >= self.config.max_jail_turns {
            log::debug!("{} failed a third escape roll, bail forced", self.name(self.current));
            self.charge(self.current, Account::Bank, self.config.bail);
            if self.roster[self.current].bankrupt {
                self.phase = Phase::TurnEnd;
                return Ok(());
            }
            self.emit(GameEvent::BailPaid {
                player: self.current,
            });
            self.release_from_jail(self.current);
            self.advance_token(self.current, total);
            self.resolve_space(total);
            return Ok(());
        }

        self.phase = Phase::TurnEnd;
        Ok(())
    }

    /// Close the turn: hand off to the next solvent player, grant the
    /// doubles extra roll, or end the game when one solvent player remains.
    pub fn end_turn(&mut self) -> Result<(), EngineError> {
        match self.phase {
            Phase::TurnEnd => {}
            Phase::GameOver { .. } => return Err(EngineError::GameOver),
            _ => return Err(EngineError::WrongPhase),
        }

        if self.roster.solvent_count() == 1 {
            let winner = self
                .roster
                .solvent_players()
                .next()
                .expect("exactly one solvent player");
            self.phase = Phase::GameOver { winner };
            self.emit(GameEvent::GameOver { winner });
            return Ok(());
        }

        let me = &self.roster[self.current];
        if self.doubles_streak > 0 && me.is_solvent() && !me.in_jail {
            // Doubles grant another roll; the streak carries forward so a
            // third consecutive double still jails.
            self.phase = Phase::AwaitingRoll;
            self.emit(GameEvent::TurnEnded {
                next_player: self.current,
            });
            return Ok(());
        }

        self.doubles_streak = 0;
        self.last_roll = None;
        self.current = self.roster.next_solvent_after(self.current);
        self.turn_number += 1;
        self.phase = Phase::AwaitingRoll;
        self.emit(GameEvent::TurnEnded {
            next_player: self.current,
        });
        Ok(())
    }

    /// Validate and settle a trade between two solvent players.
    ///
    /// Whether the counterparty agrees is decided before calling - by a
    /// human front end or a [`DecisionPolicy`].
    pub fn propose_trade(&mut self, offer: &TradeOffer) -> Result<(), EngineError> {
        if matches!(self.phase, Phase::GameOver { .. }) {
            return Err(EngineError::GameOver);
        }
        self.ledger.apply_trade(&mut self.roster, offer)?;
        self.emit(GameEvent::TradeSettled {
            from: offer.from,
            to: offer.to,
        });
        Ok(())
    }

    /// Drive one full turn of the current player with a decision policy.
    ///
    /// Repeats through doubles extra rolls; returns once the turn has
    /// rotated away or the game is over. Policy choices that are not
    /// executable (paying bail without funds, spending a card not held)
    /// degrade to the escape roll.
    pub fn play_policy_turn(&mut self, policy: &dyn DecisionPolicy) -> Result<(), EngineError> {
        let me = self.current;

        loop {
            match self.phase {
                Phase::GameOver { .. } => return Ok(()),
                Phase::AwaitingRoll => {
                    if self.roster[me].in_jail {
                        self.resolve_jail_with_policy(policy)?;
                    } else {
                        self.roll_dice()?;
                    }
                }
                Phase::AwaitingPurchaseDecision { space } => {
                    let price = self.board.space(space).price;
                    let wants = policy.decide_buy(&self.snapshot(), space);
                    if wants && self.roster[me].balance >= price {
                        self.buy_current_property()?;
                    } else {
                        self.decline_current_property()?;
                    }
                }
                Phase::TurnEnd => {
                    self.end_turn()?;
                    if self.current != me {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn resolve_jail_with_policy(&mut self, policy: &dyn DecisionPolicy) -> Result<(), EngineError> {
        let me = self.current;
        match policy.decide_jail(&self.snapshot()) {
            JailDecision::UseCard if self.roster[me].jail_cards > 0 => self.use_jail_card(),
            JailDecision::PayBail if self.roster[me].balance >= self.config.bail => {
                self.pay_jail_bail()
            }
            _ => self.attempt_jail_roll(),
        }
    }

    /// Scenario/test hook: script the next dice roll instead of the RNG.
    #[doc(hidden)]
    pub fn queue_roll(&mut self, dice: [u8; 2]) {
        self.queued_rolls.push_back(dice);
    }

    // === Internals ===

    fn name(&self, player: PlayerId) -> &str {
        &self.roster[player].name
    }

    fn emit(&mut self, event: GameEvent) {
        self.bus.emit(&event);
    }

    fn expect_phase_awaiting_roll(&self) -> Result<(), EngineError> {
        match self.phase {
            Phase::AwaitingRoll => Ok(()),
            Phase::GameOver { .. } => Err(EngineError::GameOver),
            _ => Err(EngineError::WrongPhase),
        }
    }

    fn expect_purchase_decision(&self) -> Result<u8, EngineError> {
        match self.phase {
            Phase::AwaitingPurchaseDecision { space } => Ok(space),
            Phase::GameOver { .. } => Err(EngineError::GameOver),
            _ => Err(EngineError::WrongPhase),
        }
    }

    fn expect_in_jail(&self) -> Result<(), EngineError> {
        self.expect_phase_awaiting_roll()?;
        if !self.roster[self.current].in_jail {
            return Err(EngineError::NotInJail);
        }
        Ok(())
    }

    fn roll(&mut self) -> [u8; 2] {
        let dice = self
            .queued_rolls
            .pop_front()
            .unwrap_or_else(|| [self.dice.roll_die(), self.dice.roll_die()]);
        self.last_roll = Some(dice);
        self.emit(GameEvent::DiceRolled {
            player: self.current,
            dice,
        });
        dice
    }

    /// Advance forward by `steps`, crediting Go on a wrap.
    fn advance_token(&mut self, player: PlayerId, steps: u8) {
        let from = self.roster[player].position;
        let passed_go = from as u16 + steps as u16 >= BOARD_SIZE as u16;
        let to = ((from as u16 + steps as u16) % BOARD_SIZE as u16) as u8;

        self.roster[player].position = to;
        self.emit(GameEvent::TokenMoved { player, from, to });
        if passed_go {
            self.credit_go(player);
        }
    }

    /// Jump to an absolute position, crediting Go when the jump wraps.
    fn move_to_absolute(&mut self, player: PlayerId, target: u8) {
        let from = self.roster[player].position;
        let passed_go = target <= from;

        self.roster[player].position = target;
        self.emit(GameEvent::TokenMoved {
            player,
            from,
            to: target,
        });
        if passed_go {
            self.credit_go(player);
        }
    }

    fn credit_go(&mut self, player: PlayerId) {
        self.ledger.transfer(
            &mut self.roster,
            Account::Bank,
            Account::Player(player),
            self.config.go_credit,
        );
        self.emit(GameEvent::GoCredit {
            player,
            amount: self.config.go_credit,
        });
    }

    fn send_to_jail(&mut self, player: PlayerId, reason: JailReason) {
        let state = &mut self.roster[player];
        state.position = JAIL_INDEX;
        state.in_jail = true;
        state.jail_turns = 0;
        self.doubles_streak = 0;
        self.emit(GameEvent::SentToJail { player, reason });
    }

    fn release_from_jail(&mut self, player: PlayerId) {
        let state = &mut self.roster[player];
        state.in_jail = false;
        state.jail_turns = 0;
    }

    /// Required payment: applies in full and resolves a deficit through
    /// bankruptcy. Never errors.
    fn charge(&mut self, payer: PlayerId, creditor: Account, amount: i64) {
        match self
            .ledger
            .transfer(&mut self.roster, Account::Player(payer), creditor, amount)
        {
            TransferOutcome::Paid => {}
            TransferOutcome::Deficit { .. } => {
                self.ledger.settle_bankruptcy(&mut self.roster, payer, creditor);
                self.emit(GameEvent::PlayerBankrupted {
                    player: payer,
                    creditor,
                });
            }
        }
    }

    /// Resolve the current player's landing space, setting the next phase.
    ///
    /// Recurses when a card moves the token.
    fn resolve_space(&mut self, dice_total: u8) {
        let player = self.current;
        if self.roster[player].bankrupt {
            self.phase = Phase::TurnEnd;
            return;
        }

        let position = self.roster[player].position;
        let kind = self.board.space(position).kind;
        log::trace!("{} resolving space {position}", self.name(player));

        match kind {
            SpaceKind::Go | SpaceKind::FreeParking | SpaceKind::Jail => {
                self.phase = Phase::TurnEnd;
            }
            SpaceKind::GoToJail => {
                self.send_to_jail(player, JailReason::GoToJailSpace);
                self.phase = Phase::TurnEnd;
            }
            SpaceKind::Tax { kind } => {
                let amount = match kind {
                    TaxKind::Income => self.config.income_tax.amount(self.roster[player].balance),
                    TaxKind::Luxury => self.config.luxury_tax,
                };
                self.emit(GameEvent::TaxPaid { player, amount });
                self.charge(player, Account::Bank, amount);
                self.phase = Phase::TurnEnd;
            }
            SpaceKind::Chance => {
                let card = self.deck.draw();
                self.emit(GameEvent::CardDrawn { player, card });
                self.apply_card(card, dice_total);
            }
            SpaceKind::Property { .. } | SpaceKind::Railroad | SpaceKind::Utility => {
                match self.ledger.owner_of(position) {
                    None => {
                        self.phase = Phase::AwaitingPurchaseDecision { space: position };
                    }
                    Some(owner) if owner == player => {
                        self.phase = Phase::TurnEnd;
                    }
                    Some(owner) => {
                        if self.ledger.title(position).mortgaged {
                            self.phase = Phase::TurnEnd;
                            return;
                        }
                        let rent =
                            self.ledger
                                .rent_due(&self.board, &self.config, position, dice_total);
                        self.emit(GameEvent::RentPaid {
                            payer: player,
                            owner,
                            amount: rent,
                        });
                        self.charge(player, Account::Player(owner), rent);
                        self.phase = Phase::TurnEnd;
                    }
                }
            }
        }
    }

    fn apply_card(&mut self, card: Card, dice_total: u8) {
        let player = self.current;

        match card.effect {
            CardEffect::MoveTo { position } => {
                self.move_to_absolute(player, position);
                self.resolve_space(dice_total);
            }
            CardEffect::MoveBy { offset } => {
                if offset >= 0 {
                    self.advance_token(player, offset as u8);
                } else {
                    // Backward moves never credit Go.
                    let from = self.roster[player].position;
                    let to = ((i16::from(from) + i16::from(offset) + i16::from(BOARD_SIZE))
                        % i16::from(BOARD_SIZE)) as u8;
                    self.roster[player].position = to;
                    self.emit(GameEvent::TokenMoved { player, from, to });
                }
                self.resolve_space(dice_total);
            }
            CardEffect::Collect { amount } => {
                self.ledger.transfer(
                    &mut self.roster,
                    Account::Bank,
                    Account::Player(player),
                    amount,
                );
                self.phase = Phase::TurnEnd;
            }
            CardEffect::Pay { amount } => {
                self.charge(player, Account::Bank, amount);
                self.phase = Phase::TurnEnd;
            }
            CardEffect::GoToJail => {
                self.send_to_jail(player, JailReason::Card);
                self.phase = Phase::TurnEnd;
            }
            CardEffect::GetOutOfJailFree => {
                self.roster[player].jail_cards += 1;
                self.phase = Phase::TurnEnd;
            }
            CardEffect::CollectFromEachPlayer { amount } => {
                let others: Vec<PlayerId> = self
                    .roster
                    .solvent_players()
                    .filter(|&p| p != player)
                    .collect();
                for other in others {
                    self.charge(other, Account::Player(player), amount);
                }
                self.phase = Phase::TurnEnd;
            }
            CardEffect::PayPerImprovement {
                per_house,
                per_hotel,
            } => {
                let assessment = self.ledger.repair_assessment(player, per_house, per_hotel);
                if assessment > 0 {
                    self.charge(player, Account::Bank, assessment);
                }
                self.phase = Phase::TurnEnd;
            }
        }
    }

    /// Scenario/test hook: direct access to mutate titles.
    #[doc(hidden)]
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Scenario/test hook: direct access to mutate players.
    #[doc(hidden)]
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
}
