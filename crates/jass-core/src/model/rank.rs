use core::fmt;
use serde::{Deserialize, Serialize};

/// Rank of a card, numbered by its offset inside a suit block of the deck.
///
/// Lower offsets are stronger in plain (non-trump) play: the ace leads and the
/// six trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 0,
    King = 1,
    Queen = 2,
    Jack = 3,
    Ten = 4,
    Nine = 5,
    Eight = 6,
    Seven = 7,
    Six = 8,
}

impl Rank {
    pub const ORDERED: [Rank; 9] = [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
    ];

    pub const fn from_offset(offset: u8) -> Option<Self> {
        match offset {
            0 => Some(Rank::Ace),
            1 => Some(Rank::King),
            2 => Some(Rank::Queen),
            3 => Some(Rank::Jack),
            4 => Some(Rank::Ten),
            5 => Some(Rank::Nine),
            6 => Some(Rank::Eight),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Six),
            _ => None,
        }
    }

    pub const fn offset(self) -> u8 {
        self as u8
    }

    /// Strength inside the trump suit: J > 9 > A > K > Q > 10 > 8 > 7 > 6.
    pub const fn trump_strength(self) -> u8 {
        match self {
            Rank::Jack => 8,
            Rank::Nine => 7,
            Rank::Ace => 6,
            Rank::King => 5,
            Rank::Queen => 4,
            Rank::Ten => 3,
            Rank::Eight => 2,
            Rank::Seven => 1,
            Rank::Six => 0,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::King => "K",
            Rank::Queen => "Q",
            Rank::Jack => "J",
            Rank::Ten => "10",
            Rank::Nine => "9",
            Rank::Eight => "8",
            Rank::Seven => "7",
            Rank::Six => "6",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Rank::ORDERED
            .iter()
            .copied()
            .find(|rank| rank.symbol() == symbol)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn from_offset_maps() {
        assert_eq!(Rank::from_offset(3), Some(Rank::Jack));
        assert_eq!(Rank::from_offset(9), None);
    }

    #[test]
    fn display_matches_symbols() {
        assert_eq!(Rank::Queen.to_string(), "Q");
        assert_eq!(Rank::Ten.to_string(), "10");
        assert_eq!(Rank::from_symbol("10"), Some(Rank::Ten));
        assert_eq!(Rank::from_symbol("1"), None);
    }

    #[test]
    fn trump_strength_puts_jack_and_nine_on_top() {
        let mut by_strength = Rank::ORDERED;
        by_strength.sort_by_key(|rank| core::cmp::Reverse(rank.trump_strength()));
        assert_eq!(
            by_strength,
            [
                Rank::Jack,
                Rank::Nine,
                Rank::Ace,
                Rank::King,
                Rank::Queen,
                Rank::Ten,
                Rank::Eight,
                Rank::Seven,
                Rank::Six,
            ]
        );
    }
}
