use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::round::{CARDS_PER_ROUND, Round, TRICKS_PER_ROUND, team_totals};
use crate::model::trick::TRICK_SIZE;
use crate::model::trump::{TrumpStage, declaring_seat};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("card {card} appears {count} times across hands and tricks")]
    CardMultiplicity { card: Card, count: usize },
    #[error("{played} cards played but {tricks} tricks and {in_trick} cards in the current trick")]
    PlayCounter {
        played: usize,
        tricks: usize,
        in_trick: usize,
    },
    #[error("trick {trick} holds {found} cards, expected {expected}")]
    TrickLength {
        trick: usize,
        found: usize,
        expected: usize,
    },
    #[error("trick {trick} is led by {found:?}, expected {expected:?}")]
    Leader {
        trick: usize,
        found: Option<PlayerPosition>,
        expected: Option<PlayerPosition>,
    },
    #[error("trick {trick} records winner {found:?} with {points} points, rules give {expected} with {expected_points}")]
    TrickResult {
        trick: usize,
        found: Option<PlayerPosition>,
        points: i32,
        expected: PlayerPosition,
        expected_points: i32,
    },
    #[error("team points {found:?} do not match resolved tricks {expected:?}")]
    TeamPoints { found: [i32; 2], expected: [i32; 2] },
    #[error("trump declared by {found}, expected {expected}")]
    Declarer {
        found: PlayerPosition,
        expected: PlayerPosition,
    },
    #[error("acting seat is {found:?}, expected {expected:?}")]
    ActingSeat {
        found: Option<PlayerPosition>,
        expected: Option<PlayerPosition>,
    },
}

impl Round {
    /// Checks the structural invariants of a dealt round.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.check_cards()?;
        self.check_counters()?;
        self.check_tricks()?;
        self.check_points()?;
        self.check_declaration()?;
        self.check_acting_seat()
    }

    fn check_cards(&self) -> Result<(), InvariantViolation> {
        let mut counts = [0usize; Card::COUNT];
        let held = self.hands().iter().flat_map(|hand| hand.iter());
        let played = self.tricks().iter().flat_map(|trick| trick.cards().iter().copied());
        for card in held.chain(played) {
            counts[card.index()] += 1;
        }
        match Card::all().find(|card| counts[card.index()] != 1) {
            Some(card) => Err(InvariantViolation::CardMultiplicity {
                card,
                count: counts[card.index()],
            }),
            None => Ok(()),
        }
    }

    fn check_counters(&self) -> Result<(), InvariantViolation> {
        let played = self.nr_played_cards();
        let tricks = self.nr_tricks();
        let in_trick = self.nr_cards_in_trick();
        if played > CARDS_PER_ROUND || in_trick >= TRICK_SIZE || played != tricks * TRICK_SIZE + in_trick {
            return Err(InvariantViolation::PlayCounter {
                played,
                tricks,
                in_trick,
            });
        }
        Ok(())
    }

    fn check_tricks(&self) -> Result<(), InvariantViolation> {
        let rule = self.rule();
        let trump = self.trump();
        let mut expected_leader = Some(self.forehand_seat());

        for (index, trick) in self.tricks().iter().enumerate() {
            let expected_len = match index.cmp(&self.nr_tricks()) {
                core::cmp::Ordering::Less => TRICK_SIZE,
                core::cmp::Ordering::Equal => self.nr_cards_in_trick(),
                core::cmp::Ordering::Greater => 0,
            };
            if trick.len() != expected_len {
                return Err(InvariantViolation::TrickLength {
                    trick: index,
                    found: trick.len(),
                    expected: expected_len,
                });
            }
            if index > self.nr_tricks() {
                continue;
            }
            if trick.leader() != expected_leader {
                return Err(InvariantViolation::Leader {
                    trick: index,
                    found: trick.leader(),
                    expected: expected_leader,
                });
            }
            let (Some(cards), Some(leader)) = (trick.full(), trick.leader()) else {
                continue;
            };
            let is_last = index + 1 == TRICKS_PER_ROUND;
            let winner = rule.trick_winner(cards, leader, trump);
            let points = rule.trick_points(cards, is_last, trump);
            if trick.winner() != Some(winner) || trick.points() != points {
                return Err(InvariantViolation::TrickResult {
                    trick: index,
                    found: trick.winner(),
                    points: trick.points(),
                    expected: winner,
                    expected_points: points,
                });
            }
            expected_leader = Some(winner);
        }
        Ok(())
    }

    fn check_points(&self) -> Result<(), InvariantViolation> {
        let expected = team_totals(self.completed_tricks());
        if self.team_points() != expected {
            return Err(InvariantViolation::TeamPoints {
                found: self.team_points(),
                expected,
            });
        }
        Ok(())
    }

    fn check_declaration(&self) -> Result<(), InvariantViolation> {
        let Some(declaration) = self.declaration() else {
            return Ok(());
        };
        let expected = declaring_seat(self.dealer(), !declaration.forehand);
        if declaration.declarer != expected {
            return Err(InvariantViolation::Declarer {
                found: declaration.declarer,
                expected,
            });
        }
        Ok(())
    }

    fn check_acting_seat(&self) -> Result<(), InvariantViolation> {
        let forehand = self.forehand_seat();
        let expected = if self.is_complete() {
            None
        } else {
            match self.stage() {
                TrumpStage::Undecided => Some(forehand),
                TrumpStage::Pushed => Some(forehand.partner()),
                TrumpStage::Declared(_) | TrumpStage::NotUsed => self
                    .current_trick()
                    .and_then(|trick| trick.player_at(self.nr_cards_in_trick())),
            }
        };
        if self.player() != expected {
            return Err(InvariantViolation::ActingSeat {
                found: self.player(),
                expected,
            });
        }
        Ok(())
    }
}
