use crate::model::card::Card;
use crate::model::hand::CardSet;
use crate::model::player::PlayerPosition;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const HAND_SIZE: usize = 9;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        Self {
            cards: Card::all().collect(),
        }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Splits the deck into four hands of nine, in seat-index order.
    pub fn hands(&self) -> [CardSet; 4] {
        let mut hands = [CardSet::EMPTY; 4];
        for (i, chunk) in self.cards.chunks(HAND_SIZE).enumerate().take(4) {
            hands[i] = chunk.iter().copied().collect();
        }
        hands
    }

    pub fn hand_for(&self, seat: PlayerPosition) -> CardSet {
        self.hands()[seat.index()]
    }
}
