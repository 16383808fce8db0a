use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::model::trump::Trump;
use core::fmt;
use core::str::FromStr;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// A card of the 36-card Swiss deck, identified by `suit * 9 + rank offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub const COUNT: usize = 36;

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self(suit as u8 * 9 + rank as u8)
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        if (id as usize) < Self::COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    pub const fn id(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn suit(self) -> Suit {
        match self.0 / 9 {
            0 => Suit::Diamonds,
            1 => Suit::Hearts,
            2 => Suit::Spades,
            _ => Suit::Clubs,
        }
    }

    pub const fn rank(self) -> Rank {
        match Rank::from_offset(self.0 % 9) {
            Some(rank) => rank,
            None => Rank::Six,
        }
    }

    pub fn all() -> impl Iterator<Item = Card> {
        (0..Self::COUNT as u8).map(Card)
    }

    /// Points this card is worth in a Schieber trick played under `trump`.
    pub fn points(self, trump: Trump) -> i32 {
        let rank = self.rank();
        match trump {
            Trump::Suit(suit) if suit == self.suit() => match rank {
                Rank::Jack => 20,
                Rank::Nine => 14,
                Rank::Ace => 11,
                Rank::Ten => 10,
                Rank::King => 4,
                Rank::Queen => 3,
                _ => 0,
            },
            Trump::Suit(_) => plain_points(rank),
            Trump::ObeAbe => match rank {
                Rank::Eight => 8,
                other => plain_points(other),
            },
            Trump::UneUfe => match rank {
                Rank::Ace => 0,
                Rank::Six => 11,
                Rank::Eight => 8,
                other => plain_points(other),
            },
        }
    }
}

const fn plain_points(rank: Rank) -> i32 {
    match rank {
        Rank::Ace => 11,
        Rank::Ten => 10,
        Rank::King => 4,
        Rank::Queen => 3,
        Rank::Jack => 2,
        _ => 0,
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit(), self.rank())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid card code '{code}'")]
pub struct ParseCardError {
    pub code: String,
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCardError {
            code: code.to_string(),
        };
        let mut chars = code.chars();
        let suit = chars.next().and_then(Suit::from_symbol).ok_or_else(invalid)?;
        let rank = Rank::from_symbol(chars.as_str()).ok_or_else(invalid)?;
        Ok(Card::new(rank, suit))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}

/// Named constants for every card, spelled the way they are printed.
pub mod cards {
    use super::Card;

    pub const DA: Card = Card(0);
    pub const DK: Card = Card(1);
    pub const DQ: Card = Card(2);
    pub const DJ: Card = Card(3);
    pub const D10: Card = Card(4);
    pub const D9: Card = Card(5);
    pub const D8: Card = Card(6);
    pub const D7: Card = Card(7);
    pub const D6: Card = Card(8);
    pub const HA: Card = Card(9);
    pub const HK: Card = Card(10);
    pub const HQ: Card = Card(11);
    pub const HJ: Card = Card(12);
    pub const H10: Card = Card(13);
    pub const H9: Card = Card(14);
    pub const H8: Card = Card(15);
    pub const H7: Card = Card(16);
    pub const H6: Card = Card(17);
    pub const SA: Card = Card(18);
    pub const SK: Card = Card(19);
    pub const SQ: Card = Card(20);
    pub const SJ: Card = Card(21);
    pub const S10: Card = Card(22);
    pub const S9: Card = Card(23);
    pub const S8: Card = Card(24);
    pub const S7: Card = Card(25);
    pub const S6: Card = Card(26);
    pub const CA: Card = Card(27);
    pub const CK: Card = Card(28);
    pub const CQ: Card = Card(29);
    pub const CJ: Card = Card(30);
    pub const C10: Card = Card(31);
    pub const C9: Card = Card(32);
    pub const C8: Card = Card(33);
    pub const C7: Card = Card(34);
    pub const C6: Card = Card(35);
}
