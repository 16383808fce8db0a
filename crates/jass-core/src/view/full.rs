use crate::model::hand::CardSet;
use crate::model::player::PlayerPosition;
use crate::model::round::Round;
use crate::model::trick::Trick;
use crate::model::trump::TrumpStage;
use crate::model::variant::Variant;
use crate::view::reconstruct::hands_at;
use crate::view::{Observation, RoundView, ViewError};

/// A seat's view plus every hand at the same moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullView {
    view: RoundView,
    hands: [CardSet; 4],
}

impl FullView {
    pub fn for_seat(round: &Round, seat: PlayerPosition) -> Self {
        Self {
            view: RoundView::for_seat(round, seat),
            hands: *round.hands(),
        }
    }

    pub fn for_acting_seat(round: &Round) -> Option<Self> {
        round.player().map(|seat| Self::for_seat(round, seat))
    }

    pub fn from_complete_round(round: &Round, cards_played: usize) -> Result<Self, ViewError> {
        Ok(Self {
            view: RoundView::from_complete_round(round, cards_played)?,
            hands: hands_at(round, cards_played),
        })
    }

    pub fn trump_from_complete_round(round: &Round, forehand: bool) -> Result<Option<Self>, ViewError> {
        let view = RoundView::trump_from_complete_round(round, forehand)?;
        Ok(view.map(|view| Self {
            view,
            hands: hands_at(round, 0),
        }))
    }

    pub fn all_from_complete_round(round: &Round) -> Result<Vec<Self>, ViewError> {
        let mut views = Vec::new();
        for forehand in [true, false] {
            if let Some(view) = Self::trump_from_complete_round(round, forehand)? {
                views.push(view);
            }
        }
        for cards_played in 0..round.nr_played_cards() {
            views.push(Self::from_complete_round(round, cards_played)?);
        }
        Ok(views)
    }

    pub fn view(&self) -> &RoundView {
        &self.view
    }

    pub fn hands(&self) -> &[CardSet; 4] {
        &self.hands
    }

    pub fn hand_of(&self, seat: PlayerPosition) -> CardSet {
        self.hands[seat.index()]
    }

    pub fn to_round(&self) -> Round {
        self.view.to_round(self.hands)
    }
}

impl Observation for FullView {
    fn variant(&self) -> Variant {
        self.view.variant()
    }

    fn dealer(&self) -> PlayerPosition {
        self.view.dealer()
    }

    fn seat(&self) -> PlayerPosition {
        self.view.seat()
    }

    fn player(&self) -> Option<PlayerPosition> {
        self.view.player()
    }

    fn stage(&self) -> TrumpStage {
        self.view.stage()
    }

    fn hand(&self) -> CardSet {
        self.view.hand()
    }

    fn tricks(&self) -> &[Trick] {
        self.view.tricks()
    }

    fn nr_played_cards(&self) -> usize {
        self.view.nr_played_cards()
    }

    fn team_points(&self) -> [i32; 2] {
        self.view.team_points()
    }
}
