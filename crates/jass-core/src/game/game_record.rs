use crate::game::record::{RecordError, RoundRecord};
use crate::game::score::ScoreBoard;
use crate::model::player::{PlayerPosition, Team};
use crate::model::round::Round;
use crate::model::variant::Variant;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Completed rounds of one game and the running team totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    variant: Variant,
    scores: ScoreBoard,
    rounds: Vec<RoundRecord>,
    last_dealer: Option<PlayerPosition>,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("round was played as {found}, game is {expected}")]
    VariantMismatch { expected: Variant, found: Variant },
    #[error("game already won by {winner}")]
    Finished { winner: Team },
    #[error(transparent)]
    Record(#[from] RecordError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GameFile {
    variant: Variant,
    rounds: Vec<RoundRecord>,
}

impl Game {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            scores: ScoreBoard::new(),
            rounds: Vec::new(),
            last_dealer: None,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn nr_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Dealer for the next round: the seat after the last dealer, North first.
    pub fn next_dealer(&self) -> PlayerPosition {
        self.last_dealer
            .map_or(PlayerPosition::North, PlayerPosition::next)
    }

    /// Adds a completed round and returns the winner if it decided the game.
    pub fn add_round(&mut self, round: &Round) -> Result<Option<Team>, GameError> {
        if round.variant() != self.variant {
            return Err(GameError::VariantMismatch {
                expected: self.variant,
                found: round.variant(),
            });
        }
        if let Some(winner) = self.winner() {
            return Err(GameError::Finished { winner });
        }
        let record = RoundRecord::capture(round)?;
        self.scores.apply_round(round.team_points());
        self.last_dealer = Some(round.dealer());
        self.rounds.push(record);

        let winner = self.winner();
        if let Some(team) = winner {
            info!(
                %team,
                rounds = self.rounds.len(),
                north_south = self.scores.score(Team::NorthSouth),
                east_west = self.scores.score(Team::EastWest),
                "game decided"
            );
        }
        Ok(winner)
    }

    /// Team that reached the variant's target score. Variants without a
    /// target never finish on their own.
    pub fn winner(&self) -> Option<Team> {
        self.variant
            .target_score()
            .and_then(|target| self.scores.team_reaching(target))
    }

    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }

    /// Team currently ahead; for Hearts this is the team with fewer penalties.
    pub fn leading_team(&self) -> Option<Team> {
        self.scores.leading_team()
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        let file = GameFile {
            variant: self.variant,
            rounds: self.rounds.clone(),
        };
        Ok(serde_json::to_string_pretty(&file).map_err(RecordError::from)?)
    }

    /// Rebuilds a game from JSON, replaying every round record.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let file: GameFile = serde_json::from_str(json).map_err(RecordError::from)?;
        let mut game = Game::new(file.variant);
        for record in &file.rounds {
            game.add_round(&record.restore()?)?;
        }
        Ok(game)
    }
}
