pub mod card;
pub mod deck;
pub mod hand;
pub mod invariants;
pub mod player;
pub mod rank;
pub mod round;
pub mod suit;
pub mod trick;
pub mod trump;
pub mod variant;
