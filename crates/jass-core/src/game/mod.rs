pub mod game_record;
pub mod record;
pub mod score;

pub use game_record::{Game, GameError};
pub use record::{RecordError, RoundRecord, TrickRecord};
pub use score::ScoreBoard;
