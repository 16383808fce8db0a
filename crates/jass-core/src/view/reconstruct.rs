use crate::model::hand::CardSet;
use crate::model::player::PlayerPosition;
use crate::model::round::{CARDS_PER_ROUND, Round, TRICKS_PER_ROUND};
use crate::model::trick::{TRICK_SIZE, Trick};
use crate::view::ViewError;

pub(crate) fn require_complete(round: &Round) -> Result<(), ViewError> {
    if round.is_complete() {
        Ok(())
    } else {
        Err(ViewError::RoundIncomplete {
            played: round.nr_played_cards(),
        })
    }
}

/// Trick slots of a completed round as they stood before move `cards_played`,
/// together with the seat about to play that move.
pub(crate) fn tricks_at(
    round: &Round,
    cards_played: usize,
) -> Result<([Trick; TRICKS_PER_ROUND], PlayerPosition), ViewError> {
    require_complete(round)?;
    if cards_played >= CARDS_PER_ROUND {
        return Err(ViewError::MoveOutOfRange { cards_played });
    }
    let nr_tricks = cards_played / TRICK_SIZE;
    let in_trick = cards_played % TRICK_SIZE;
    let source = round.tricks();

    let mut tricks = [Trick::new(); TRICKS_PER_ROUND];
    tricks[..nr_tricks].copy_from_slice(&source[..nr_tricks]);
    tricks[nr_tricks] = source[nr_tricks].prefix(in_trick);

    let player = tricks[nr_tricks]
        .player_at(in_trick)
        .ok_or(ViewError::MissingLeader { trick: nr_tricks })?;
    Ok((tricks, player))
}

/// Cards `seat` still held before move `cards_played` of a completed round.
pub(crate) fn remaining_hand(round: &Round, seat: PlayerPosition, cards_played: usize) -> CardSet {
    round
        .tricks()
        .iter()
        .flat_map(|trick| trick.plays())
        .skip(cards_played)
        .filter(|play| play.position == seat)
        .map(|play| play.card)
        .collect()
}

pub(crate) fn hands_at(round: &Round, cards_played: usize) -> [CardSet; 4] {
    PlayerPosition::LOOP.map(|seat| remaining_hand(round, seat, cards_played))
}
