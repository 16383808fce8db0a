//! Replay utilities for completed rounds.

use crate::model::card::Card;
use crate::model::hand::CardSet;
use crate::model::invariants::InvariantViolation;
use crate::model::player::PlayerPosition;
use crate::model::round::{CARDS_PER_ROUND, Round, RoundError};
use crate::model::trump::TrumpAction;
use crate::view::reconstruct;
use crate::view::{Observation, RoundView, ViewError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error("replay setup failed: {0}")]
    Setup(#[source] RoundError),
    #[error("move {index}: {seat} may not play {card}")]
    IllegalMove {
        index: usize,
        seat: PlayerPosition,
        card: Card,
    },
    #[error("move {index}: {source}")]
    Move { index: usize, source: RoundError },
    #[error("move {index} is missing from the round")]
    MissingMove { index: usize },
    #[error("replayed round differs from the recorded one")]
    Diverged,
}

/// Hands as dealt, rebuilt from the tricks of a completed round.
pub fn starting_hands(round: &Round) -> Result<[CardSet; 4], ViewError> {
    hands_at(round, 0)
}

/// Every hand as it stood before move `cards_played` of a completed round.
pub fn hands_at(round: &Round, cards_played: usize) -> Result<[CardSet; 4], ViewError> {
    reconstruct::require_complete(round)?;
    if cards_played > CARDS_PER_ROUND {
        return Err(ViewError::MoveOutOfRange { cards_played });
    }
    Ok(reconstruct::hands_at(round, cards_played))
}

/// One view per card played, in play order.
pub fn all_views(round: &Round) -> Result<Vec<RoundView>, ViewError> {
    (0..CARDS_PER_ROUND)
        .map(|cards_played| RoundView::from_complete_round(round, cards_played))
        .collect()
}

/// Checks a completed round by replaying it from the reconstructed deal with
/// every card validated against the rules, both on the replayed round and on
/// the view of the seat that played it.
pub fn validate_round(round: &Round) -> Result<(), ReplayError> {
    round.check_invariants()?;
    let hands = starting_hands(round)?;

    let mut replay = Round::new(round.variant(), round.dealer());
    replay.set_hands(hands).map_err(ReplayError::Setup)?;
    if let Some(declaration) = round.declaration() {
        if !declaration.forehand {
            replay
                .declare_trump(TrumpAction::Push)
                .map_err(ReplayError::Setup)?;
        }
        replay
            .declare_trump(TrumpAction::Declare(declaration.trump))
            .map_err(ReplayError::Setup)?;
    }

    for index in 0..CARDS_PER_ROUND {
        let card = round
            .card_played(index)
            .ok_or(ReplayError::MissingMove { index })?;
        let view = RoundView::from_complete_round(round, index)?;
        if !view.legal_cards().is_some_and(|legal| legal.contains(card)) {
            return Err(ReplayError::IllegalMove {
                index,
                seat: view.seat(),
                card,
            });
        }
        match replay.play_card_checked(card) {
            Ok(_) => {}
            Err(RoundError::IllegalCard { seat, card }) => {
                return Err(ReplayError::IllegalMove { index, seat, card });
            }
            Err(source) => return Err(ReplayError::Move { index, source }),
        }
    }

    if replay != *round {
        return Err(ReplayError::Diverged);
    }
    debug!(variant = %round.variant(), dealer = %round.dealer(), "round validated");
    Ok(())
}
