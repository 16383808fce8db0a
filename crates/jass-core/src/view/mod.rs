//! Per-seat projections of a round.
//!
//! A [`RoundView`] holds what one seat may know: its own hand, every card
//! played so far, trump state and the score. A [`FullView`] adds every hand and
//! is meant for training data and analysis. Both can be taken from a live
//! round or rebuilt for any earlier moment of a completed one.

mod borrowed;
mod full;
mod owned;
pub(crate) mod reconstruct;

pub use borrowed::RoundViewRef;
pub use full::FullView;
pub use owned::RoundView;

use crate::model::hand::CardSet;
use crate::model::player::PlayerPosition;
use crate::model::trick::Trick;
use crate::model::trump::{Trump, TrumpStage};
use crate::model::variant::Variant;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("round is not complete ({played} of 36 cards played)")]
    RoundIncomplete { played: usize },
    #[error("move index {cards_played} is out of range (0..36)")]
    MoveOutOfRange { cards_played: usize },
    #[error("trick {trick} has no leader")]
    MissingLeader { trick: usize },
}

/// Read access shared by every view flavour.
pub trait Observation {
    fn variant(&self) -> Variant;
    fn dealer(&self) -> PlayerPosition;
    /// Seat the view belongs to.
    fn seat(&self) -> PlayerPosition;
    /// Seat expected to act; `None` once the round is over.
    fn player(&self) -> Option<PlayerPosition>;
    fn stage(&self) -> TrumpStage;
    fn hand(&self) -> CardSet;
    /// All nine trick slots.
    fn tricks(&self) -> &[Trick];
    fn nr_played_cards(&self) -> usize;
    fn team_points(&self) -> [i32; 2];

    fn trump(&self) -> Option<Trump> {
        self.stage().trump()
    }

    fn nr_tricks(&self) -> usize {
        self.nr_played_cards() / 4
    }

    fn nr_cards_in_trick(&self) -> usize {
        self.nr_played_cards() % 4
    }

    fn current_trick(&self) -> Option<&Trick> {
        self.tricks().get(self.nr_tricks())
    }

    fn completed_tricks(&self) -> &[Trick] {
        let tricks = self.tricks();
        &tricks[..self.nr_tricks().min(tricks.len())]
    }

    fn played_cards(&self) -> CardSet {
        self.tricks()
            .iter()
            .flat_map(|trick| trick.cards().iter().copied())
            .collect()
    }

    fn is_own_turn(&self) -> bool {
        self.player() == Some(self.seat())
    }

    fn own_points(&self) -> i32 {
        self.team_points()[self.seat().team().index()]
    }

    fn opponent_points(&self) -> i32 {
        self.team_points()[self.seat().team().opponent().index()]
    }

    /// Cards of the view's hand that may be played onto the current trick.
    /// Only meaningful on the seat's own turn.
    fn legal_cards(&self) -> Option<CardSet> {
        if self.stage().is_pending() {
            return None;
        }
        let trick = self.current_trick()?;
        Some(
            self.variant()
                .rule()
                .legal_cards(self.hand(), trick.cards(), self.trump()),
        )
    }
}
