use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::CardSet;
use crate::model::player::{PlayerPosition, Team};
use crate::model::trick::{TRICK_SIZE, Trick};
use crate::model::trump::{Declaration, Trump, TrumpAction, TrumpStage, declaring_seat, forehand_seat};
use crate::model::variant::{ParseVariantError, Variant};
use crate::rule::Rule;
use crate::view::RoundViewRef;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

pub const TRICKS_PER_ROUND: usize = 9;
pub const CARDS_PER_ROUND: usize = TRICKS_PER_ROUND * TRICK_SIZE;

/// Authoritative state of one round: hands, tricks, trump and scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    variant: Variant,
    dealer: PlayerPosition,
    player: Option<PlayerPosition>,
    stage: TrumpStage,
    hands: [CardSet; 4],
    tricks: [Trick; TRICKS_PER_ROUND],
    nr_tricks: usize,
    nr_cards_in_trick: usize,
    nr_played_cards: usize,
    points: [i32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: PlayerPosition, points: i32 },
    RoundCompleted { winner: PlayerPosition, points: i32 },
}

/// Whether [`Round::play`] validates the card against the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayCheck {
    #[default]
    Checked,
    Unchecked,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown play check '{0}' (expected checked or unchecked)")]
pub struct ParsePlayCheckError(pub String);

impl FromStr for PlayCheck {
    type Err = ParsePlayCheckError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "checked" => Ok(PlayCheck::Checked),
            "unchecked" => Ok(PlayCheck::Unchecked),
            other => Err(ParsePlayCheckError(other.to_string())),
        }
    }
}

impl fmt::Display for PlayCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayCheck::Checked => f.write_str("checked"),
            PlayCheck::Unchecked => f.write_str("unchecked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("round is already complete")]
    RoundComplete,
    #[error("trump must be declared before cards are played")]
    TrumpPending,
    #[error("trump has already been declared")]
    TrumpAlreadyDeclared,
    #[error("trump was already pushed; the partner must declare")]
    AlreadyPushed,
    #[error("{seat} does not hold {card}")]
    CardNotInHand { seat: PlayerPosition, card: Card },
    #[error("{card} is not a legal play for {seat}")]
    IllegalCard { seat: PlayerPosition, card: Card },
    #[error("cannot deal after {played} cards have been played")]
    AlreadyStarted { played: usize },
}

impl Round {
    pub fn new(variant: Variant, dealer: PlayerPosition) -> Self {
        let forehand = forehand_seat(dealer);
        let stage = if variant.uses_trump() {
            TrumpStage::Undecided
        } else {
            TrumpStage::NotUsed
        };
        let mut tricks = [Trick::new(); TRICKS_PER_ROUND];
        tricks[0] = Trick::led_by(forehand);
        Self {
            variant,
            dealer,
            player: Some(forehand),
            stage,
            hands: [CardSet::EMPTY; 4],
            tricks,
            nr_tricks: 0,
            nr_cards_in_trick: 0,
            nr_played_cards: 0,
            points: [0; 2],
        }
    }

    /// Creates a round for a variant given by name, e.g. `"SCHIEBER_1000"`.
    pub fn from_name(name: &str, dealer: PlayerPosition) -> Result<Self, ParseVariantError> {
        Ok(Self::new(name.parse()?, dealer))
    }

    /// Reassembles a round from stored state. Counters and team points are
    /// derived from `nr_played_cards` and the resolved tricks.
    pub(crate) fn from_parts(
        variant: Variant,
        dealer: PlayerPosition,
        player: Option<PlayerPosition>,
        stage: TrumpStage,
        hands: [CardSet; 4],
        tricks: [Trick; TRICKS_PER_ROUND],
        nr_played_cards: usize,
    ) -> Self {
        let nr_tricks = nr_played_cards / TRICK_SIZE;
        Self {
            variant,
            dealer,
            player,
            stage,
            hands,
            tricks,
            nr_tricks,
            nr_cards_in_trick: nr_played_cards % TRICK_SIZE,
            nr_played_cards,
            points: team_totals(&tricks[..nr_tricks.min(TRICKS_PER_ROUND)]),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn rule(&self) -> Rule {
        self.variant.rule()
    }

    pub fn dealer(&self) -> PlayerPosition {
        self.dealer
    }

    pub fn forehand_seat(&self) -> PlayerPosition {
        forehand_seat(self.dealer)
    }

    /// Seat expected to act next; `None` once the round is complete.
    pub fn player(&self) -> Option<PlayerPosition> {
        self.player
    }

    pub fn stage(&self) -> TrumpStage {
        self.stage
    }

    pub fn trump(&self) -> Option<Trump> {
        self.stage.trump()
    }

    pub fn declaration(&self) -> Option<Declaration> {
        self.stage.declaration()
    }

    pub fn declarer(&self) -> Option<PlayerPosition> {
        self.declaration().map(|declaration| declaration.declarer)
    }

    pub fn forehand(&self) -> Option<bool> {
        self.stage.forehand()
    }

    pub fn is_awaiting_trump(&self) -> bool {
        self.stage.is_pending()
    }

    pub fn hand(&self, seat: PlayerPosition) -> CardSet {
        self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[CardSet; 4] {
        &self.hands
    }

    /// All nine trick slots, including ones not yet started.
    pub fn tricks(&self) -> &[Trick; TRICKS_PER_ROUND] {
        &self.tricks
    }

    pub fn completed_tricks(&self) -> &[Trick] {
        &self.tricks[..self.nr_tricks]
    }

    pub fn current_trick(&self) -> Option<&Trick> {
        self.tricks.get(self.nr_tricks)
    }

    pub fn nr_tricks(&self) -> usize {
        self.nr_tricks
    }

    pub fn nr_cards_in_trick(&self) -> usize {
        self.nr_cards_in_trick
    }

    pub fn nr_played_cards(&self) -> usize {
        self.nr_played_cards
    }

    pub fn is_complete(&self) -> bool {
        self.nr_played_cards == CARDS_PER_ROUND
    }

    /// Card played as the `index`-th move of the round, counting from zero.
    pub fn card_played(&self, index: usize) -> Option<Card> {
        if index >= self.nr_played_cards {
            return None;
        }
        self.tricks
            .get(index / TRICK_SIZE)
            .and_then(|trick| trick.card(index % TRICK_SIZE))
    }

    pub fn points(&self, team: Team) -> i32 {
        self.points[team.index()]
    }

    pub fn team_points(&self) -> [i32; 2] {
        self.points
    }

    pub fn points_for(&self, seat: PlayerPosition) -> i32 {
        self.points(seat.team())
    }

    /// Team with more points once the round is complete; `None` on a tie.
    pub fn winning_team(&self) -> Option<Team> {
        if !self.is_complete() {
            return None;
        }
        let [north_south, east_west] = self.points;
        match north_south.cmp(&east_west) {
            core::cmp::Ordering::Greater => Some(Team::NorthSouth),
            core::cmp::Ordering::Less => Some(Team::EastWest),
            core::cmp::Ordering::Equal => None,
        }
    }

    /// Read-only projection for `seat`.
    pub fn view(&self, seat: PlayerPosition) -> RoundViewRef<'_> {
        RoundViewRef::new(self, seat)
    }

    pub fn deal<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RoundError> {
        self.deal_from(&Deck::shuffled(rng))
    }

    pub fn deal_from(&mut self, deck: &Deck) -> Result<(), RoundError> {
        self.set_hands(deck.hands())
    }

    pub fn set_hands(&mut self, hands: [CardSet; 4]) -> Result<(), RoundError> {
        if self.nr_played_cards > 0 {
            return Err(RoundError::AlreadyStarted {
                played: self.nr_played_cards,
            });
        }
        self.hands = hands;
        debug!(dealer = %self.dealer, variant = %self.variant, "hands dealt");
        Ok(())
    }

    /// Cards the acting seat may play, or `None` while trump is pending or
    /// after the round has ended.
    pub fn legal_cards(&self) -> Option<CardSet> {
        if self.is_awaiting_trump() {
            return None;
        }
        let seat = self.player?;
        let trick = self.current_trick()?;
        Some(
            self.rule()
                .legal_cards(self.hand(seat), trick.cards(), self.trump()),
        )
    }

    /// Applies a trump-phase decision for the acting seat. Variants without
    /// trump ignore the call.
    pub fn declare_trump(&mut self, action: TrumpAction) -> Result<(), RoundError> {
        let forehand = self.forehand_seat();
        match (self.stage, action) {
            (TrumpStage::NotUsed, _) => {
                trace!(%action, "variant plays without trump");
                return Ok(());
            }
            (TrumpStage::Declared(_), _) => return Err(RoundError::TrumpAlreadyDeclared),
            (TrumpStage::Pushed, TrumpAction::Push) => return Err(RoundError::AlreadyPushed),
            (TrumpStage::Undecided, TrumpAction::Push) => {
                self.stage = TrumpStage::Pushed;
                self.player = Some(forehand.partner());
            }
            (stage, TrumpAction::Declare(trump)) => {
                let pushed = stage == TrumpStage::Pushed;
                self.stage = TrumpStage::Declared(Declaration {
                    trump,
                    declarer: declaring_seat(self.dealer, pushed),
                    forehand: !pushed,
                });
                self.player = Some(forehand);
            }
        }
        debug!(%action, stage = ?self.stage, "trump action applied");
        Ok(())
    }

    /// Plays `card` for the acting seat without checking the rules beyond
    /// ownership of the card.
    pub fn play_card(&mut self, card: Card) -> Result<PlayOutcome, RoundError> {
        let seat = self.acting_seat()?;
        if !self.hand(seat).contains(card) {
            return Err(RoundError::CardNotInHand { seat, card });
        }
        Ok(self.apply_card(seat, card))
    }

    /// Plays `card` for the acting seat after validating it is legal.
    pub fn play_card_checked(&mut self, card: Card) -> Result<PlayOutcome, RoundError> {
        let seat = self.acting_seat()?;
        let hand = self.hand(seat);
        if !hand.contains(card) {
            return Err(RoundError::CardNotInHand { seat, card });
        }
        let trick = self.current_trick().ok_or(RoundError::RoundComplete)?;
        let legal = self.rule().legal_cards(hand, trick.cards(), self.trump());
        if !legal.contains(card) {
            return Err(RoundError::IllegalCard { seat, card });
        }
        Ok(self.apply_card(seat, card))
    }

    pub fn play(&mut self, card: Card, check: PlayCheck) -> Result<PlayOutcome, RoundError> {
        match check {
            PlayCheck::Checked => self.play_card_checked(card),
            PlayCheck::Unchecked => self.play_card(card),
        }
    }

    fn acting_seat(&self) -> Result<PlayerPosition, RoundError> {
        if self.is_complete() {
            return Err(RoundError::RoundComplete);
        }
        if self.is_awaiting_trump() {
            return Err(RoundError::TrumpPending);
        }
        self.player.ok_or(RoundError::RoundComplete)
    }

    fn apply_card(&mut self, seat: PlayerPosition, card: Card) -> PlayOutcome {
        self.hands[seat.index()].remove(card);
        let index = self.nr_tricks;
        let trick = &mut self.tricks[index];
        let leader = trick.lead_with(seat);
        trick.push(card);
        self.nr_played_cards += 1;
        trace!(%seat, %card, trick = index, "card played");

        let full = trick.full().copied();
        match full {
            Some(cards) => self.resolve_trick(index, cards, leader),
            None => {
                self.nr_cards_in_trick += 1;
                self.player = Some(seat.next());
                PlayOutcome::Played
            }
        }
    }

    fn resolve_trick(
        &mut self,
        index: usize,
        cards: [Card; TRICK_SIZE],
        leader: PlayerPosition,
    ) -> PlayOutcome {
        let rule = self.rule();
        let trump = self.trump();
        let is_last = index + 1 == TRICKS_PER_ROUND;
        let points = rule.trick_points(&cards, is_last, trump);
        let winner = rule.trick_winner(&cards, leader, trump);

        self.tricks[index].resolve(winner, points);
        self.points[winner.team().index()] += points;
        self.nr_tricks += 1;
        self.nr_cards_in_trick = 0;
        debug!(trick = index, %winner, points, "trick resolved");

        match self.tricks.get_mut(self.nr_tricks) {
            Some(next) => {
                next.lead_with(winner);
                self.player = Some(winner);
                PlayOutcome::TrickCompleted { winner, points }
            }
            None => {
                self.player = None;
                debug!(
                    north_south = self.points[0],
                    east_west = self.points[1],
                    "round complete"
                );
                PlayOutcome::RoundCompleted { winner, points }
            }
        }
    }
}

/// Points per team summed over resolved tricks.
pub(crate) fn team_totals(tricks: &[Trick]) -> [i32; 2] {
    let mut totals = [0; 2];
    for trick in tricks {
        if let Some(winner) = trick.winner() {
            totals[winner.team().index()] += trick.points();
        }
    }
    totals
}
