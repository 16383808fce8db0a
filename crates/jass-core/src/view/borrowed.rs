use crate::model::hand::CardSet;
use crate::model::player::PlayerPosition;
use crate::model::round::Round;
use crate::model::trick::Trick;
use crate::model::trump::TrumpStage;
use crate::model::variant::Variant;
use crate::view::{Observation, RoundView};

/// Zero-copy view of a live round restricted to one seat's knowledge.
#[derive(Debug, Clone, Copy)]
pub struct RoundViewRef<'a> {
    round: &'a Round,
    seat: PlayerPosition,
}

impl<'a> RoundViewRef<'a> {
    pub fn new(round: &'a Round, seat: PlayerPosition) -> Self {
        Self { round, seat }
    }

    pub fn to_owned_view(&self) -> RoundView {
        RoundView::for_seat(self.round, self.seat)
    }
}

impl Observation for RoundViewRef<'_> {
    fn variant(&self) -> Variant {
        self.round.variant()
    }

    fn dealer(&self) -> PlayerPosition {
        self.round.dealer()
    }

    fn seat(&self) -> PlayerPosition {
        self.seat
    }

    fn player(&self) -> Option<PlayerPosition> {
        self.round.player()
    }

    fn stage(&self) -> TrumpStage {
        self.round.stage()
    }

    fn hand(&self) -> CardSet {
        self.round.hand(self.seat)
    }

    fn tricks(&self) -> &[Trick] {
        self.round.tricks()
    }

    fn nr_played_cards(&self) -> usize {
        self.round.nr_played_cards()
    }

    fn team_points(&self) -> [i32; 2] {
        self.round.team_points()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::deck::Deck;
    use crate::model::player::PlayerPosition;
    use crate::model::round::Round;
    use crate::model::variant::Variant;
    use crate::view::{Observation, RoundView};

    #[test]
    fn borrowed_view_tracks_the_round() {
        let mut round = Round::new(Variant::Hearts, PlayerPosition::North);
        round.deal_from(&Deck::shuffled_with_seed(41)).unwrap();
        let seat = PlayerPosition::West;
        assert_eq!(round.player(), Some(seat));

        let card = round.legal_cards().unwrap().iter().next().unwrap();
        assert_eq!(round.view(seat).legal_cards(), round.legal_cards());
        round.play_card(card).unwrap();

        let view = round.view(seat);
        assert!(!view.hand().contains(card));
        assert!(view.played_cards().contains(card));
        assert_eq!(view.player(), Some(PlayerPosition::South));
        assert!(!view.is_own_turn());
        assert_eq!(view.to_owned_view(), RoundView::for_seat(&round, seat));
    }
}
