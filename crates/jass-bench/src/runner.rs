//! Seeded self-play of random legal rounds.
//!
//! Every round is dealt from a seed drawn off the run seed, trump is chosen at
//! random (pushing where allowed) and each seat plays a random legal card.
//! Completed rounds are checked, accumulated into games and streamed to JSONL.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use jass_core::game::{Game, GameError, RecordError, RoundRecord};
use jass_core::model::invariants::InvariantViolation;
use jass_core::model::player::{PlayerPosition, Team};
use jass_core::model::round::{PlayCheck, Round, RoundError};
use jass_core::model::trump::TrumpAction;
use jass_core::model::variant::{ParseVariantError, Variant};
use jass_core::replay::{ReplayError, validate_round};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, debug, event};

use crate::config::{BenchConfig, ResolvedOutputs};

/// Drives a configured self-play run.
pub struct BenchRunner {
    config: BenchConfig,
    outputs: ResolvedOutputs,
    variant: Variant,
}

/// Summary details returned after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rounds_played: usize,
    pub rows_written: usize,
    pub games_decided: usize,
    pub game_wins: [usize; 2],
    pub round_wins: [usize; 2],
    pub tied_rounds: usize,
    pub team_points: [i64; 2],
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct RoundRow<'a> {
    run_id: &'a str,
    round_index: usize,
    round_seed: u64,
    game_index: usize,
    dealer: PlayerPosition,
    points: [i32; 2],
    winner: Option<Team>,
    game_winner: Option<Team>,
    record: &'a RoundRecord,
}

#[derive(Debug, Default)]
struct Tally {
    games_decided: usize,
    game_wins: [usize; 2],
    round_wins: [usize; 2],
    tied_rounds: usize,
    team_points: [i64; 2],
}

impl Tally {
    fn record_round(&mut self, round: &Round) {
        match round.winning_team() {
            Some(team) => self.round_wins[team.index()] += 1,
            None => self.tied_rounds += 1,
        }
        for team in Team::BOTH {
            self.team_points[team.index()] += i64::from(round.points(team));
        }
    }
}

impl BenchRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let variant = config.rounds.variant()?;
        Ok(Self {
            config,
            outputs,
            variant,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Play every configured round, streaming one JSONL row per round.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.rounds.seed.unwrap_or(0));
        let mut game = Game::new(self.variant);
        let mut game_index = 0usize;
        let mut tally = Tally::default();
        let mut rows_written = 0usize;

        for round_index in 0..self.config.rounds.count {
            let round_seed = rng.next_u64();
            let dealer = game.next_dealer();
            let round = self.play_round(dealer, round_seed)?;
            self.verify(&round, round_index)?;

            let game_winner = game.add_round(&round)?;
            tally.record_round(&round);
            let record = game
                .rounds()
                .last()
                .ok_or(RunnerError::MissingRecord { round_index })?;

            let row = RoundRow {
                run_id: &self.config.run_id,
                round_index,
                round_seed,
                game_index,
                dealer,
                points: round.team_points(),
                winner: round.winning_team(),
                game_winner,
                record,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;

            event!(
                Level::INFO,
                run_id = %self.config.run_id,
                round_index,
                round_seed,
                dealer = %dealer,
                north_south = round.points(Team::NorthSouth),
                east_west = round.points(Team::EastWest),
                "round complete"
            );

            if let Some(team) = game_winner {
                tally.games_decided += 1;
                tally.game_wins[team.index()] += 1;
                game_index += 1;
                game = Game::new(self.variant);
            }
        }

        writer.flush()?;

        let summary = RunSummary {
            rounds_played: self.config.rounds.count,
            rows_written,
            games_decided: tally.games_decided,
            game_wins: tally.game_wins,
            round_wins: tally.round_wins,
            tied_rounds: tally.tied_rounds,
            team_points: tally.team_points,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        };
        write_summary_markdown(&self.outputs.summary_md, &self.config, self.variant, &summary)?;
        Ok(summary)
    }

    /// Deal from `seed` and play the round out with random legal choices.
    pub fn play_round(&self, dealer: PlayerPosition, seed: u64) -> Result<Round, RunnerError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut round = Round::new(self.variant, dealer);
        round.deal(&mut rng)?;

        choose_trump(&mut round, &mut rng)?;
        self.check_step(&round)?;
        if let Some(declaration) = round.declaration() {
            debug!(
                trump = %declaration.trump,
                declarer = %declaration.declarer,
                forehand = declaration.forehand,
                "trump declared"
            );
        }

        let check = self.config.rounds.play_check;
        while let Some(legal) = round.legal_cards() {
            let card = *legal
                .cards()
                .choose(&mut rng)
                .ok_or(RunnerError::NoLegalCard {
                    played: round.nr_played_cards(),
                })?;
            round.play(card, check)?;
            self.check_step(&round)?;
        }
        Ok(round)
    }

    fn check_step(&self, round: &Round) -> Result<(), RunnerError> {
        if self.config.verify.invariants {
            round.check_invariants()?;
        }
        Ok(())
    }

    fn verify(&self, round: &Round, round_index: usize) -> Result<(), RunnerError> {
        if self.config.verify.replay {
            validate_round(round).map_err(|source| RunnerError::Replay {
                round_index,
                source,
            })?;
        }
        Ok(())
    }
}

fn choose_trump<R: Rng + ?Sized>(round: &mut Round, rng: &mut R) -> Result<(), RunnerError> {
    while round.is_awaiting_trump() {
        let Some(&action) = TrumpAction::ALL.choose(rng) else {
            break;
        };
        match round.declare_trump(action) {
            Ok(()) => {}
            // Only one push per round; draw again.
            Err(RoundError::AlreadyPushed) => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_summary_markdown(
    path: &Path,
    config: &BenchConfig,
    variant: Variant,
    summary: &RunSummary,
) -> Result<(), RunnerError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "# Self-play summary: {}", config.run_id)?;
    writeln!(out)?;
    writeln!(out, "| Setting | Value |")?;
    writeln!(out, "|---|---|")?;
    writeln!(out, "| Variant | {variant} |")?;
    writeln!(out, "| Seed | {} |", config.rounds.seed.unwrap_or(0))?;
    writeln!(out, "| Rounds | {} |", summary.rounds_played)?;
    writeln!(out, "| Play check | {} |", config.rounds.play_check)?;
    writeln!(out, "| Games decided | {} |", summary.games_decided)?;
    writeln!(out, "| Tied rounds | {} |", summary.tied_rounds)?;
    writeln!(out)?;
    writeln!(out, "| Team | Round wins | Game wins | Points |")?;
    writeln!(out, "|---|---|---|---|")?;
    for team in Team::BOTH {
        let index = team.index();
        writeln!(
            out,
            "| {team} | {} | {} | {} |",
            summary.round_wins[index], summary.game_wins[index], summary.team_points[index]
        )?;
    }
    if config.rounds.play_check == PlayCheck::Unchecked {
        writeln!(out)?;
        writeln!(out, "Cards were applied without rule checks.")?;
    }
    out.flush()?;
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid variant: {0}")]
    Variant(#[from] ParseVariantError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("round failed: {0}")]
    Round(#[from] RoundError),
    #[error("round is inconsistent: {0}")]
    Invariant(#[from] InvariantViolation),
    #[error("round {round_index} failed replay: {source}")]
    Replay {
        round_index: usize,
        source: ReplayError,
    },
    #[error("game bookkeeping failed: {0}")]
    Game(#[from] GameError),
    #[error("round record failed: {0}")]
    Record(#[from] RecordError),
    #[error("no legal card after {played} cards played")]
    NoLegalCard { played: usize },
    #[error("round {round_index} was not recorded")]
    MissingRecord { round_index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingConfig, OutputsConfig, RoundsConfig, VerifyConfig};

    fn runner(variant: &str) -> BenchRunner {
        let config = BenchConfig {
            run_id: "unit".to_string(),
            rounds: RoundsConfig {
                variant: variant.to_string(),
                seed: Some(7),
                count: 1,
                play_check: PlayCheck::Checked,
            },
            verify: VerifyConfig::default(),
            outputs: OutputsConfig {
                jsonl: "unused.jsonl".to_string(),
                summary_md: "unused.md".to_string(),
            },
            logging: LoggingConfig::default(),
        };
        let outputs = config.resolved_outputs();
        BenchRunner::new(config, outputs).expect("runner")
    }

    #[test]
    fn same_seed_plays_the_same_round() {
        let runner = runner("SCHIEBER_1000");
        let first = runner.play_round(PlayerPosition::East, 99).unwrap();
        let second = runner.play_round(PlayerPosition::East, 99).unwrap();
        assert!(first.is_complete());
        assert_eq!(first, second);
        assert!(first.trump().is_some());
        runner.verify(&first, 0).unwrap();
    }

    #[test]
    fn hearts_rounds_skip_trump_selection() {
        let runner = runner("HEARTS");
        let round = runner.play_round(PlayerPosition::North, 3).unwrap();
        assert!(round.is_complete());
        assert_eq!(round.trump(), None);
        assert_eq!(round.team_points().iter().sum::<i32>(), -18);
    }

    #[test]
    fn unknown_variant_fails_construction() {
        let mut config = runner("HEARTS").config;
        config.rounds.variant = "COIFFEUR".to_string();
        let outputs = config.resolved_outputs();
        assert!(matches!(
            BenchRunner::new(config, outputs),
            Err(RunnerError::Variant(_))
        ));
    }

    #[test]
    fn tally_counts_ties_and_points() {
        let runner = runner("HEARTS");
        let mut tally = Tally::default();
        for seed in 0..5 {
            tally.record_round(&runner.play_round(PlayerPosition::West, seed).unwrap());
        }
        let rounds = tally.round_wins.iter().sum::<usize>() + tally.tied_rounds;
        assert_eq!(rounds, 5);
        assert_eq!(tally.team_points.iter().sum::<i64>(), -90);
    }
}
