//! Card-play rules: which cards may be played, what a trick is worth and who
//! takes it.
//!
//! Every function works on the cards of the current trick in play order.
//! `trick.len()` is therefore the index of the move being decided.

pub mod hearts;
pub mod schieber;

use crate::model::card::Card;
use crate::model::hand::CardSet;
use crate::model::player::PlayerPosition;
use crate::model::trick::TRICK_SIZE;
use crate::model::trump::Trump;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    Schieber,
    Hearts,
}

impl Rule {
    pub const fn uses_trump(self) -> bool {
        matches!(self, Rule::Schieber)
    }

    /// Cards from `hand` that may be played onto `trick`. Schieber without a
    /// declared trump falls back to Obe-Abe, which only enforces following suit.
    pub fn legal_cards(self, hand: CardSet, trick: &[Card], trump: Option<Trump>) -> CardSet {
        match self {
            Rule::Schieber => schieber::legal_cards(hand, trick, trump.unwrap_or(Trump::ObeAbe)),
            Rule::Hearts => hearts::legal_cards(hand, trick),
        }
    }

    pub fn trick_points(self, trick: &[Card; TRICK_SIZE], is_last: bool, trump: Option<Trump>) -> i32 {
        match self {
            Rule::Schieber => {
                schieber::trick_points(trick, is_last, trump.unwrap_or(Trump::ObeAbe))
            }
            Rule::Hearts => hearts::trick_points(trick),
        }
    }

    pub fn trick_winner(
        self,
        trick: &[Card; TRICK_SIZE],
        leader: PlayerPosition,
        trump: Option<Trump>,
    ) -> PlayerPosition {
        match self {
            Rule::Schieber => {
                schieber::trick_winner(trick, leader, trump.unwrap_or(Trump::ObeAbe))
            }
            Rule::Hearts => hearts::trick_winner(trick, leader),
        }
    }
}

/// Cards of the led suit if the hand holds any, otherwise the whole hand.
pub(crate) fn follow_suit(hand: CardSet, trick: &[Card]) -> CardSet {
    match trick.first() {
        Some(lead) => {
            let following = hand.of_suit(lead.suit());
            if following.is_empty() { hand } else { following }
        }
        None => hand,
    }
}

/// Position of the strongest card of the led suit in plain order.
pub(crate) fn highest_of_led_suit(trick: &[Card]) -> usize {
    led_suit_positions(trick)
        .min_by_key(|(_, card)| card.rank().offset())
        .map_or(0, |(position, _)| position)
}

/// Position of the weakest card of the led suit in plain order.
pub(crate) fn lowest_of_led_suit(trick: &[Card]) -> usize {
    led_suit_positions(trick)
        .max_by_key(|(_, card)| card.rank().offset())
        .map_or(0, |(position, _)| position)
}

fn led_suit_positions(trick: &[Card]) -> impl Iterator<Item = (usize, Card)> + '_ {
    let led = trick.first().map(|card| card.suit());
    trick
        .iter()
        .copied()
        .enumerate()
        .filter(move |(_, card)| Some(card.suit()) == led)
}
