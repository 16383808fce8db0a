use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Trump mode of a Schieber round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trump {
    Suit(Suit),
    /// Top-down: no trump suit, highest card of the led suit wins.
    ObeAbe,
    /// Bottom-up: no trump suit, lowest card of the led suit wins.
    UneUfe,
}

impl Trump {
    pub const ALL: [Trump; 6] = [
        Trump::Suit(Suit::Diamonds),
        Trump::Suit(Suit::Hearts),
        Trump::Suit(Suit::Spades),
        Trump::Suit(Suit::Clubs),
        Trump::ObeAbe,
        Trump::UneUfe,
    ];

    /// Numeric code used in recorded rounds: suits 0-3, Obe-Abe 4, Une-Ufe 5.
    pub const fn code(self) -> u8 {
        match self {
            Trump::Suit(suit) => suit as u8,
            Trump::ObeAbe => 4,
            Trump::UneUfe => 5,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0..=3 => match Suit::from_index(code as usize) {
                Some(suit) => Some(Trump::Suit(suit)),
                None => None,
            },
            4 => Some(Trump::ObeAbe),
            5 => Some(Trump::UneUfe),
            _ => None,
        }
    }

    pub const fn suit(self) -> Option<Suit> {
        match self {
            Trump::Suit(suit) => Some(suit),
            Trump::ObeAbe | Trump::UneUfe => None,
        }
    }
}

impl fmt::Display for Trump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trump::Suit(suit) => write!(f, "{suit}"),
            Trump::ObeAbe => f.write_str("Obe-Abe"),
            Trump::UneUfe => f.write_str("Une-Ufe"),
        }
    }
}

/// A decision taken during the trump phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrumpAction {
    Declare(Trump),
    Push,
}

impl TrumpAction {
    pub const PUSH_CODE: u8 = 10;
    /// Alternate push code accepted on input and normalized to [`TrumpAction::Push`].
    pub const PUSH_ALT_CODE: u8 = 6;

    pub const ALL: [TrumpAction; 7] = [
        TrumpAction::Declare(Trump::Suit(Suit::Diamonds)),
        TrumpAction::Declare(Trump::Suit(Suit::Hearts)),
        TrumpAction::Declare(Trump::Suit(Suit::Spades)),
        TrumpAction::Declare(Trump::Suit(Suit::Clubs)),
        TrumpAction::Declare(Trump::ObeAbe),
        TrumpAction::Declare(Trump::UneUfe),
        TrumpAction::Push,
    ];

    pub const fn code(self) -> u8 {
        match self {
            TrumpAction::Declare(trump) => trump.code(),
            TrumpAction::Push => Self::PUSH_CODE,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            Self::PUSH_CODE | Self::PUSH_ALT_CODE => Some(TrumpAction::Push),
            _ => match Trump::from_code(code) {
                Some(trump) => Some(TrumpAction::Declare(trump)),
                None => None,
            },
        }
    }
}

impl fmt::Display for TrumpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrumpAction::Declare(trump) => write!(f, "declare {trump}"),
            TrumpAction::Push => f.write_str("push"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    pub trump: Trump,
    pub declarer: PlayerPosition,
    /// `true` when the forehand declared without pushing.
    pub forehand: bool,
}

/// Where a round stands with respect to trump selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrumpStage {
    /// Forehand has not acted yet.
    Undecided,
    /// Forehand pushed; the partner must declare.
    Pushed,
    Declared(Declaration),
    /// The variant plays without trump.
    NotUsed,
}

impl TrumpStage {
    pub const fn trump(self) -> Option<Trump> {
        match self {
            TrumpStage::Declared(declaration) => Some(declaration.trump),
            _ => None,
        }
    }

    pub const fn declaration(self) -> Option<Declaration> {
        match self {
            TrumpStage::Declared(declaration) => Some(declaration),
            _ => None,
        }
    }

    pub const fn is_pending(self) -> bool {
        matches!(self, TrumpStage::Undecided | TrumpStage::Pushed)
    }

    /// `Some(true)` once the forehand declared, `Some(false)` once it pushed.
    pub const fn forehand(self) -> Option<bool> {
        match self {
            TrumpStage::Declared(declaration) => Some(declaration.forehand),
            TrumpStage::Pushed => Some(false),
            TrumpStage::Undecided | TrumpStage::NotUsed => None,
        }
    }
}

/// The player to the dealer's right, who decides trump and leads the first trick.
pub const fn forehand_seat(dealer: PlayerPosition) -> PlayerPosition {
    dealer.next()
}

/// Seat credited with the trump declaration.
pub const fn declaring_seat(dealer: PlayerPosition, pushed: bool) -> PlayerPosition {
    let forehand = forehand_seat(dealer);
    if pushed { forehand.partner() } else { forehand }
}
