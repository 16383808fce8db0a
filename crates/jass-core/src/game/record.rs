use crate::model::card::Card;
use crate::model::hand::CardSet;
use crate::model::invariants::InvariantViolation;
use crate::model::player::PlayerPosition;
use crate::model::round::{CARDS_PER_ROUND, Round, TRICKS_PER_ROUND};
use crate::model::trick::{TRICK_SIZE, Trick};
use crate::model::trump::{Declaration, Trump, TrumpStage, declaring_seat};
use crate::model::variant::Variant;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Log entry of one completed round, in the field layout used by recorded
/// Schieber games.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trump: Option<u8>,
    pub dealer: u8,
    /// 1 when the forehand pushed.
    #[serde(default)]
    pub tss: u8,
    pub tricks: Vec<TrickRecord>,
    #[serde(rename = "jassTyp")]
    pub jass_type: Variant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrickRecord {
    pub cards: [Card; TRICK_SIZE],
    pub points: i32,
    pub win: u8,
    pub first: u8,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("round is not complete ({played} of 36 cards played)")]
    RoundIncomplete { played: usize },
    #[error("record holds {found} tricks, expected 9")]
    TrickCount { found: usize },
    #[error("record for {variant} has no trump")]
    MissingTrump { variant: Variant },
    #[error("invalid trump code {0}")]
    InvalidTrump(u8),
    #[error("record for {variant} carries trump code {code}")]
    UnexpectedTrump { variant: Variant, code: u8 },
    #[error("invalid seat {value} in field '{field}'")]
    InvalidSeat { field: &'static str, value: u8 },
    #[error("recorded round is inconsistent: {0}")]
    Inconsistent(#[from] InvariantViolation),
    #[error("record JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RoundRecord {
    pub fn capture(round: &Round) -> Result<Self, RecordError> {
        if !round.is_complete() {
            return Err(RecordError::RoundIncomplete {
                played: round.nr_played_cards(),
            });
        }
        let tricks = round
            .tricks()
            .iter()
            .enumerate()
            .map(|(index, trick)| {
                let cards = trick
                    .full()
                    .copied()
                    .ok_or(RecordError::RoundIncomplete {
                        played: index * TRICK_SIZE + trick.len(),
                    })?;
                let (Some(first), Some(win)) = (trick.leader(), trick.winner()) else {
                    return Err(RecordError::RoundIncomplete {
                        played: round.nr_played_cards(),
                    });
                };
                Ok(TrickRecord {
                    cards,
                    points: trick.points(),
                    win: win.index() as u8,
                    first: first.index() as u8,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trump: round.trump().map(Trump::code),
            dealer: round.dealer().index() as u8,
            tss: u8::from(round.forehand() == Some(false)),
            tricks,
            jass_type: round.variant(),
        })
    }

    /// Rebuilds the completed round, deriving the declarer and team points.
    pub fn restore(&self) -> Result<Round, RecordError> {
        if self.tricks.len() != TRICKS_PER_ROUND {
            return Err(RecordError::TrickCount {
                found: self.tricks.len(),
            });
        }
        let dealer = seat("dealer", self.dealer)?;
        let stage = self.stage(dealer)?;

        let mut tricks = [Trick::new(); TRICKS_PER_ROUND];
        for (slot, record) in tricks.iter_mut().zip(&self.tricks) {
            *slot = Trick::resolved(
                record.cards,
                seat("first", record.first)?,
                seat("win", record.win)?,
                record.points,
            );
        }

        let round = Round::from_parts(
            self.jass_type,
            dealer,
            None,
            stage,
            [CardSet::EMPTY; 4],
            tricks,
            CARDS_PER_ROUND,
        );
        round.check_invariants()?;
        Ok(round)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    fn stage(&self, dealer: PlayerPosition) -> Result<TrumpStage, RecordError> {
        if !self.jass_type.uses_trump() {
            return match self.trump {
                Some(code) => Err(RecordError::UnexpectedTrump {
                    variant: self.jass_type,
                    code,
                }),
                None => Ok(TrumpStage::NotUsed),
            };
        }
        let code = self.trump.ok_or(RecordError::MissingTrump {
            variant: self.jass_type,
        })?;
        let trump = Trump::from_code(code).ok_or(RecordError::InvalidTrump(code))?;
        let pushed = self.tss != 0;
        Ok(TrumpStage::Declared(Declaration {
            trump,
            declarer: declaring_seat(dealer, pushed),
            forehand: !pushed,
        }))
    }
}

fn seat(field: &'static str, value: u8) -> Result<PlayerPosition, RecordError> {
    PlayerPosition::from_index(value as usize).ok_or(RecordError::InvalidSeat { field, value })
}

#[cfg(test)]
mod tests {
    use super::{RecordError, RoundRecord};
    use crate::model::deck::Deck;
    use crate::model::player::PlayerPosition;
    use crate::model::round::Round;
    use crate::model::suit::Suit;
    use crate::model::trump::{Trump, TrumpAction};
    use crate::model::variant::Variant;

    fn finished(variant: Variant, push: bool) -> Round {
        let mut round = Round::new(variant, PlayerPosition::East);
        round.deal_from(&Deck::shuffled_with_seed(51)).unwrap();
        if push {
            round.declare_trump(TrumpAction::Push).unwrap();
        }
        round
            .declare_trump(TrumpAction::Declare(Trump::Suit(Suit::Spades)))
            .unwrap();
        while let Some(legal) = round.legal_cards() {
            round.play_card(legal.iter().next().unwrap()).unwrap();
        }
        round
    }

    #[test]
    fn capture_requires_complete_round() {
        let round = Round::new(Variant::Schieber1000, PlayerPosition::East);
        assert!(matches!(
            RoundRecord::capture(&round),
            Err(RecordError::RoundIncomplete { played: 0 })
        ));
    }

    #[test]
    fn record_roundtrips_through_json() {
        for (variant, push) in [
            (Variant::Schieber1000, false),
            (Variant::Schieber2500, true),
            (Variant::Hearts, false),
        ] {
            let round = finished(variant, push);
            let record = RoundRecord::capture(&round).unwrap();
            assert_eq!(record.tss, u8::from(push));
            let json = record.to_json().unwrap();
            assert!(json.contains("\"jassTyp\""));
            let restored = RoundRecord::from_json(&json).unwrap().restore().unwrap();
            assert_eq!(restored, round);
        }
    }

    #[test]
    fn missing_trump_is_rejected() {
        let round = finished(Variant::Schieber1000, false);
        let mut record = RoundRecord::capture(&round).unwrap();
        record.trump = None;
        assert!(matches!(record.restore(), Err(RecordError::MissingTrump { .. })));
    }

    #[test]
    fn hearts_record_with_trump_is_rejected() {
        let round = finished(Variant::Hearts, false);
        let mut record = RoundRecord::capture(&round).unwrap();
        assert_eq!(record.trump, None);
        record.trump = Some(2);
        assert!(matches!(
            record.restore(),
            Err(RecordError::UnexpectedTrump {
                variant: Variant::Hearts,
                code: 2
            })
        ));
    }

    #[test]
    fn short_records_are_rejected() {
        let round = finished(Variant::Schieber1000, false);
        let mut record = RoundRecord::capture(&round).unwrap();
        record.tricks.pop();
        assert!(matches!(record.restore(), Err(RecordError::TrickCount { found: 8 })));
    }

    #[test]
    fn tampered_points_are_rejected() {
        let round = finished(Variant::Schieber1000, false);
        let mut record = RoundRecord::capture(&round).unwrap();
        record.tricks[0].points += 1;
        assert!(matches!(record.restore(), Err(RecordError::Inconsistent(_))));
    }
}
