use crate::model::hand::CardSet;
use crate::model::player::PlayerPosition;
use crate::model::round::{CARDS_PER_ROUND, Round, TRICKS_PER_ROUND, team_totals};
use crate::model::trick::Trick;
use crate::model::trump::TrumpStage;
use crate::model::variant::Variant;
use crate::view::reconstruct::{remaining_hand, require_complete, tricks_at};
use crate::view::{Observation, ViewError};

/// Owned snapshot of what one seat can observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    variant: Variant,
    dealer: PlayerPosition,
    seat: PlayerPosition,
    player: Option<PlayerPosition>,
    stage: TrumpStage,
    hand: CardSet,
    tricks: [Trick; TRICKS_PER_ROUND],
    nr_played_cards: usize,
    points: [i32; 2],
}

impl RoundView {
    pub fn for_seat(round: &Round, seat: PlayerPosition) -> Self {
        Self {
            variant: round.variant(),
            dealer: round.dealer(),
            seat,
            player: round.player(),
            stage: round.stage(),
            hand: round.hand(seat),
            tricks: *round.tricks(),
            nr_played_cards: round.nr_played_cards(),
            points: round.team_points(),
        }
    }

    /// View of the seat about to act; `None` once the round is over.
    pub fn for_acting_seat(round: &Round) -> Option<Self> {
        round.player().map(|seat| Self::for_seat(round, seat))
    }

    /// View of the seat that played move `cards_played` of a completed round,
    /// taken just before it played.
    pub fn from_complete_round(round: &Round, cards_played: usize) -> Result<Self, ViewError> {
        let (tricks, seat) = tricks_at(round, cards_played)?;
        let nr_tricks = cards_played / 4;
        Ok(Self {
            variant: round.variant(),
            dealer: round.dealer(),
            seat,
            player: Some(seat),
            stage: round.stage(),
            hand: remaining_hand(round, seat, cards_played),
            points: team_totals(&tricks[..nr_tricks]),
            tricks,
            nr_played_cards: cards_played,
        })
    }

    /// View at the trump decision of a completed round: the forehand's choice
    /// when `forehand` is set, otherwise the partner's choice after a push.
    /// Returns `None` for variants without trump and for the partner when the
    /// forehand declared directly.
    pub fn trump_from_complete_round(round: &Round, forehand: bool) -> Result<Option<Self>, ViewError> {
        require_complete(round)?;
        let Some(declaration) = round.declaration() else {
            return Ok(None);
        };
        if !forehand && declaration.forehand {
            return Ok(None);
        }
        let (tricks, first) = tricks_at(round, 0)?;
        let (seat, stage) = if forehand {
            (first, TrumpStage::Undecided)
        } else {
            (first.partner(), TrumpStage::Pushed)
        };
        Ok(Some(Self {
            variant: round.variant(),
            dealer: round.dealer(),
            seat,
            player: Some(seat),
            stage,
            hand: remaining_hand(round, seat, 0),
            tricks,
            nr_played_cards: 0,
            points: [0; 2],
        }))
    }

    /// Every decision point of a completed round in order: trump decisions
    /// first, then one view per card played.
    pub fn all_from_complete_round(round: &Round) -> Result<Vec<Self>, ViewError> {
        let mut views = Vec::with_capacity(CARDS_PER_ROUND + 2);
        for forehand in [true, false] {
            if let Some(view) = Self::trump_from_complete_round(round, forehand)? {
                views.push(view);
            }
        }
        for cards_played in 0..CARDS_PER_ROUND {
            views.push(Self::from_complete_round(round, cards_played)?);
        }
        Ok(views)
    }

    /// Builds a full round from this view and a guess of every hand. The
    /// view's own hand replaces the guess for its seat.
    pub fn to_round(&self, mut hands: [CardSet; 4]) -> Round {
        hands[self.seat.index()] = self.hand;
        Round::from_parts(
            self.variant,
            self.dealer,
            self.player,
            self.stage,
            hands,
            self.tricks,
            self.nr_played_cards,
        )
    }
}

impl Observation for RoundView {
    fn variant(&self) -> Variant {
        self.variant
    }

    fn dealer(&self) -> PlayerPosition {
        self.dealer
    }

    fn seat(&self) -> PlayerPosition {
        self.seat
    }

    fn player(&self) -> Option<PlayerPosition> {
        self.player
    }

    fn stage(&self) -> TrumpStage {
        self.stage
    }

    fn hand(&self) -> CardSet {
        self.hand
    }

    fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    fn nr_played_cards(&self) -> usize {
        self.nr_played_cards
    }

    fn team_points(&self) -> [i32; 2] {
        self.points
    }
}
