use crate::model::card::Card;
use crate::model::card::cards::SQ;
use crate::model::hand::CardSet;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use crate::model::trick::TRICK_SIZE;
use crate::rule::{follow_suit, highest_of_led_suit};

pub const HEART_PENALTY: i32 = -1;
pub const QUEEN_OF_SPADES_PENALTY: i32 = -9;

pub fn legal_cards(hand: CardSet, trick: &[Card]) -> CardSet {
    follow_suit(hand, trick)
}

/// Penalty points taken with a trick. There is no last-trick bonus.
pub fn trick_points(trick: &[Card; TRICK_SIZE]) -> i32 {
    trick
        .iter()
        .map(|&card| match card {
            SQ => QUEEN_OF_SPADES_PENALTY,
            card if card.suit() == Suit::Hearts => HEART_PENALTY,
            _ => 0,
        })
        .sum()
}

pub fn trick_winner(trick: &[Card; TRICK_SIZE], leader: PlayerPosition) -> PlayerPosition {
    leader.advance(highest_of_led_suit(trick))
}
