use crate::model::card::Card;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Set of cards stored as a 36-bit mask indexed by card id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardSet(u64);

/// A player's holding.
pub type Hand = CardSet;

const FULL_MASK: u64 = (1 << Card::COUNT) - 1;
const SUIT_MASK: u64 = (1 << 9) - 1;

impl CardSet {
    pub const EMPTY: CardSet = CardSet(0);
    pub const FULL: CardSet = CardSet(FULL_MASK);

    pub const fn new() -> Self {
        Self::EMPTY
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits & FULL_MASK)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn of_suit_mask(suit: Suit) -> Self {
        Self(SUIT_MASK << (suit as u8 * 9))
    }

    /// Inserts `card`, returning `false` when it was already present.
    pub fn add(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.id();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn remove(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.id();
        let present = self.0 & bit != 0;
        self.0 &= !bit;
        present
    }

    pub const fn contains(self, card: Card) -> bool {
        self.0 & (1u64 << card.id()) != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn of_suit(self, suit: Suit) -> Self {
        Self(self.0 & Self::of_suit_mask(suit).0)
    }

    pub const fn has_suit(self, suit: Suit) -> bool {
        !self.of_suit(suit).is_empty()
    }

    pub const fn union(self, other: CardSet) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: CardSet) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn difference(self, other: CardSet) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_subset(self, other: CardSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn filter(self, mut keep: impl FnMut(Card) -> bool) -> Self {
        self.iter().filter(|&card| keep(card)).collect()
    }

    /// Cards in ascending id order.
    pub fn iter(self) -> CardSetIter {
        CardSetIter(self.0)
    }

    pub fn cards(self) -> Vec<Card> {
        self.iter().collect()
    }
}

#[derive(Debug, Clone)]
pub struct CardSetIter(u64);

impl Iterator for CardSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let id = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Card::from_id(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = CardSetIter;

    fn into_iter(self) -> CardSetIter {
        self.iter()
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::new();
        for card in iter {
            set.add(card);
        }
        set
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, card) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}
