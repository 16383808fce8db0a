use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;

pub const TRICK_SIZE: usize = 4;

/// Filler for slots that have not been played yet. Never exposed through
/// [`Trick::cards`].
const OPEN_SLOT: Card = crate::model::card::cards::DA;

/// One trick of a round. The leader is known as soon as the previous trick
/// resolves; winner and points are set once the fourth card lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trick {
    slots: [Card; TRICK_SIZE],
    len: u8,
    leader: Option<PlayerPosition>,
    winner: Option<PlayerPosition>,
    points: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

impl Default for Trick {
    fn default() -> Self {
        Self::new()
    }
}

impl Trick {
    pub const fn new() -> Self {
        Self {
            slots: [OPEN_SLOT; TRICK_SIZE],
            len: 0,
            leader: None,
            winner: None,
            points: 0,
        }
    }

    pub const fn led_by(leader: PlayerPosition) -> Self {
        let mut trick = Self::new();
        trick.leader = Some(leader);
        trick
    }

    /// Rebuilds a resolved trick from recorded data.
    pub const fn resolved(
        cards: [Card; TRICK_SIZE],
        leader: PlayerPosition,
        winner: PlayerPosition,
        points: i32,
    ) -> Self {
        Self {
            slots: cards,
            len: TRICK_SIZE as u8,
            leader: Some(leader),
            winner: Some(winner),
            points,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.slots[..self.len()]
    }

    /// All four cards, once the trick is complete.
    pub fn full(&self) -> Option<&[Card; TRICK_SIZE]> {
        self.is_complete().then_some(&self.slots)
    }

    pub fn card(&self, position: usize) -> Option<Card> {
        self.cards().get(position).copied()
    }

    pub const fn len(&self) -> usize {
        self.len as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_complete(&self) -> bool {
        self.len() == TRICK_SIZE
    }

    pub const fn leader(&self) -> Option<PlayerPosition> {
        self.leader
    }

    pub const fn winner(&self) -> Option<PlayerPosition> {
        self.winner
    }

    pub const fn points(&self) -> i32 {
        self.points
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.card(0).map(Card::suit)
    }

    /// Seat that plays (or played) at `position` within the trick.
    pub fn player_at(&self, position: usize) -> Option<PlayerPosition> {
        self.leader.map(|leader| leader.advance(position))
    }

    pub fn plays(&self) -> impl Iterator<Item = Play> + '_ {
        self.cards()
            .iter()
            .enumerate()
            .filter_map(|(index, &card)| {
                self.player_at(index)
                    .map(|position| Play { position, card })
            })
    }

    /// Copy holding only the first `count` cards and no result.
    pub fn prefix(&self, count: usize) -> Self {
        if count >= self.len() {
            return *self;
        }
        let mut trick = Trick {
            leader: self.leader,
            ..Trick::new()
        };
        for &card in &self.slots[..count] {
            trick.push(card);
        }
        trick
    }

    /// Fixes the leader if none is set and returns the effective leader.
    pub(crate) fn lead_with(&mut self, seat: PlayerPosition) -> PlayerPosition {
        *self.leader.get_or_insert(seat)
    }

    pub(crate) fn push(&mut self, card: Card) {
        debug_assert!(!self.is_complete(), "trick already holds four cards");
        let len = self.len();
        if let Some(slot) = self.slots.get_mut(len) {
            *slot = card;
            self.len += 1;
        }
    }

    pub(crate) fn resolve(&mut self, winner: PlayerPosition, points: i32) {
        self.winner = Some(winner);
        self.points = points;
    }
}

#[cfg(test)]
mod tests {
    use super::{Play, Trick};
    use crate::model::card::cards::*;
    use crate::model::player::PlayerPosition;
    use crate::model::suit::Suit;

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::led_by(PlayerPosition::East);
        trick.push(SA);
        trick.push(SK);
        let plays: Vec<Play> = trick.plays().collect();
        assert_eq!(
            plays,
            vec![
                Play { position: PlayerPosition::East, card: SA },
                Play { position: PlayerPosition::North, card: SK },
            ]
        );
        assert_eq!(trick.player_at(3), Some(PlayerPosition::South));
        assert_eq!(trick.lead_suit(), Some(Suit::Spades));
        assert!(trick.full().is_none());
    }

    #[test]
    fn prefix_drops_later_cards_and_result() {
        let mut trick = Trick::led_by(PlayerPosition::North);
        for card in [C7, CK, C6, CJ] {
            trick.push(card);
        }
        trick.resolve(PlayerPosition::West, 17);

        let partial = trick.prefix(2);
        assert_eq!(partial.cards(), &[C7, CK]);
        assert_eq!(partial.leader(), Some(PlayerPosition::North));
        assert_eq!(partial.winner(), None);
        assert_eq!(partial.points(), 0);
        assert_eq!(trick.prefix(4), trick);

        let mut rebuilt = Trick::led_by(PlayerPosition::North);
        rebuilt.push(C7);
        rebuilt.push(CK);
        assert_eq!(partial, rebuilt);
    }

    #[test]
    fn push_fills_slots_in_order() {
        let mut trick = Trick::led_by(PlayerPosition::West);
        for (count, card) in [H6, HJ, H9, HA].into_iter().enumerate() {
            assert_eq!(trick.len(), count);
            trick.push(card);
        }
        assert!(trick.is_complete());
        assert_eq!(trick.full(), Some(&[H6, HJ, H9, HA]));
    }

    #[test]
    fn lead_with_keeps_existing_leader() {
        let mut trick = Trick::led_by(PlayerPosition::South);
        assert_eq!(trick.lead_with(PlayerPosition::West), PlayerPosition::South);
        let mut open = Trick::new();
        assert_eq!(open.lead_with(PlayerPosition::West), PlayerPosition::West);
    }
}
