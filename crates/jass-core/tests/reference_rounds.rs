use jass_core::game::{RoundRecord, TrickRecord};
use jass_core::model::card::Card;
use jass_core::model::hand::CardSet;
use jass_core::model::player::{PlayerPosition, Team};
use jass_core::model::round::{PlayOutcome, Round};
use jass_core::model::trump::{Trump, TrumpAction};
use jass_core::model::variant::Variant;
use jass_core::replay::{starting_hands, validate_round};
use jass_core::view::{FullView, Observation, RoundView};

use PlayerPosition::{East, North, South, West};

fn cards(codes: &str) -> Vec<Card> {
    codes
        .split_whitespace()
        .map(|code| code.parse().expect("valid card code"))
        .collect()
}

fn hands(rows: [&str; 4]) -> [CardSet; 4] {
    rows.map(|row| cards(row).into_iter().collect())
}

const FIRST_HANDS: [&str; 4] = [
    "C6 S7 S9 HQ DA CA S8 D6 S10",
    "CK C10 D10 H6 H7 H9 HK DQ D8",
    "C7 SA SQ HJ C9 DJ CQ DK C8",
    "CJ SJ S6 H10 H8 HA SK D9 D7",
];

const FIRST_PLAYS: &str = "C7 CK C6 CJ S7 SJ SA C10 S9 S6 SQ D10 H10 HJ H6 HQ \
    H7 DA H8 C9 H9 CA HA DJ HK S8 SK CQ DQ D6 D9 DK S10 D7 C8 D8";

const SECOND_HANDS: [&str; 4] = [
    "DK H10 S8 C8 C9 H8 D8 H9 H6",
    "D10 HK SK CA C10 SA D9 C6 S10",
    "D7 HJ S7 C7 CK S6 DJ SQ S9",
    "D6 HQ SJ CQ CJ HA DQ DA H7",
];

const SECOND_PLAYS: &str = "D7 D10 DK D6 H10 HQ HJ HK SK S8 SJ S7 CA C8 CQ C7 \
    C10 C9 CJ CK S6 SA H8 HA D9 D8 DQ DJ DA SQ C6 H9 H7 S9 S10 H6";

/// (points, winner, leader) per trick.
type Expected = [(i32, PlayerPosition, PlayerPosition); 9];

const UNE_UFE_TRICKS: Expected = [
    (17, North, South),
    (12, North, North),
    (24, West, North),
    (26, East, West),
    (8, East, East),
    (2, East, East),
    (19, East, East),
    (18, North, East),
    (31, North, North),
];

const OBE_ABE_TRICKS: Expected = [
    (14, North, South),
    (19, East, North),
    (14, East, East),
    (22, East, East),
    (16, South, East),
    (30, East, South),
    (13, West, East),
    (14, West, West),
    (15, West, West),
];

const HEARTS_TRICKS: Expected = [
    (0, East, South),
    (0, West, East),
    (-9, East, West),
    (-4, South, East),
    (-2, North, South),
    (-2, South, North),
    (-1, South, South),
    (0, West, South),
    (0, West, West),
];

fn assert_tricks(round: &Round, expected: &Expected) {
    for (index, (trick, &(points, winner, leader))) in
        round.tricks().iter().zip(expected).enumerate()
    {
        assert_eq!(trick.points(), points, "points of trick {index}");
        assert_eq!(trick.winner(), Some(winner), "winner of trick {index}");
        assert_eq!(trick.leader(), Some(leader), "leader of trick {index}");
    }
}

fn pushed_une_ufe_round() -> Round {
    let mut round = Round::from_name("SCHIEBER_1000", West).expect("known variant");
    round.set_hands(hands(FIRST_HANDS)).unwrap();
    round.declare_trump(TrumpAction::Push).unwrap();
    round
        .declare_trump(TrumpAction::Declare(Trump::UneUfe))
        .unwrap();
    for card in cards(FIRST_PLAYS) {
        round.play_card_checked(card).expect("recorded card is legal");
    }
    round
}

fn forehand_obe_abe_round() -> Round {
    let mut round = Round::new(Variant::Schieber2500, West);
    round.set_hands(hands(SECOND_HANDS)).unwrap();
    round
        .declare_trump(TrumpAction::Declare(Trump::ObeAbe))
        .unwrap();
    for card in cards(SECOND_PLAYS) {
        round.play_card_checked(card).expect("recorded card is legal");
    }
    round
}

#[test]
fn pushed_une_ufe_round_scores_like_the_log() {
    let round = pushed_une_ufe_round();

    assert!(round.is_complete());
    assert_eq!(round.trump(), Some(Trump::UneUfe));
    assert_eq!(round.declarer(), Some(North));
    assert_eq!(round.forehand(), Some(false));
    assert_tricks(&round, &UNE_UFE_TRICKS);
    assert_eq!(round.team_points(), [78, 79]);
    assert_eq!(round.winning_team(), Some(Team::EastWest));
    assert_eq!(round.check_invariants(), Ok(()));
    assert_eq!(validate_round(&round), Ok(()));
    assert_eq!(starting_hands(&round).unwrap(), hands(FIRST_HANDS));
}

#[test]
fn outcome_reports_trick_and_round_completion() {
    let mut round = Round::new(Variant::Schieber1000, West);
    round.set_hands(hands(FIRST_HANDS)).unwrap();
    round.declare_trump(TrumpAction::Push).unwrap();
    round
        .declare_trump(TrumpAction::Declare(Trump::UneUfe))
        .unwrap();

    let plays = cards(FIRST_PLAYS);
    let outcomes: Vec<PlayOutcome> = plays
        .iter()
        .map(|&card| round.play_card_checked(card).unwrap())
        .collect();
    assert_eq!(outcomes[0], PlayOutcome::Played);
    assert_eq!(
        outcomes[3],
        PlayOutcome::TrickCompleted {
            winner: North,
            points: 17
        }
    );
    assert_eq!(
        outcomes[35],
        PlayOutcome::RoundCompleted {
            winner: North,
            points: 31
        }
    );
}

#[test]
fn forehand_obe_abe_round_replays() {
    let round = forehand_obe_abe_round();

    assert_eq!(round.declarer(), Some(South));
    assert_eq!(round.forehand(), Some(true));
    assert_tricks(&round, &OBE_ABE_TRICKS);
    assert_eq!(round.team_points(), [30, 127]);
    assert_eq!(validate_round(&round), Ok(()));

    assert_eq!(RoundView::trump_from_complete_round(&round, false), Ok(None));
    let views = RoundView::all_from_complete_round(&round).unwrap();
    assert_eq!(views.len(), 37);
    assert_eq!(views[0].stage(), jass_core::model::trump::TrumpStage::Undecided);
    assert_eq!(views[0].seat(), South);
    assert_eq!(views[0].hand(), hands(SECOND_HANDS)[South.index()]);
}

#[test]
fn reconstructed_views_match_live_views() {
    let complete = pushed_une_ufe_round();

    let mut live = Round::new(Variant::Schieber1000, West);
    live.set_hands(hands(FIRST_HANDS)).unwrap();

    let forehand_view = RoundView::for_acting_seat(&live).unwrap();
    assert_eq!(
        RoundView::trump_from_complete_round(&complete, true).unwrap(),
        Some(forehand_view)
    );
    live.declare_trump(TrumpAction::Push).unwrap();
    let rearhand_view = RoundView::for_acting_seat(&live).unwrap();
    assert_eq!(rearhand_view.seat(), North);
    assert_eq!(
        RoundView::trump_from_complete_round(&complete, false).unwrap(),
        Some(rearhand_view)
    );
    live.declare_trump(TrumpAction::Declare(Trump::UneUfe))
        .unwrap();

    for (index, card) in cards(FIRST_PLAYS).into_iter().enumerate() {
        let expected = RoundView::for_acting_seat(&live).unwrap();
        let rebuilt = RoundView::from_complete_round(&complete, index).unwrap();
        assert_eq!(rebuilt, expected, "view before move {index}");
        assert!(rebuilt.legal_cards().unwrap().contains(card));

        let full = FullView::from_complete_round(&complete, index).unwrap();
        assert_eq!(Some(full.clone()), FullView::for_acting_seat(&live));
        assert_eq!(full.to_round(), live);

        live.play_card_checked(card).unwrap();
    }
    assert_eq!(live, complete);
}

#[test]
fn une_ufe_record_matches_log_fields() {
    let round = pushed_une_ufe_round();
    let record = RoundRecord::capture(&round).unwrap();
    assert_eq!(record.trump, Some(5));
    assert_eq!(record.tss, 1);
    assert_eq!(record.dealer, 3);
    assert_eq!(record.jass_type, Variant::Schieber1000);
    assert_eq!(
        record.tricks[0],
        TrickRecord {
            cards: [cards("C7")[0], cards("CK")[0], cards("C6")[0], cards("CJ")[0]],
            points: 17,
            win: 0,
            first: 2,
        }
    );

    let json = record.to_json().unwrap();
    assert!(json.contains(r#""cards":["C7","CK","C6","CJ"]"#));
    assert_eq!(RoundRecord::from_json(&json).unwrap().restore().unwrap(), round);
}

#[test]
fn hearts_record_scores_penalties() {
    let plays = cards(FIRST_PLAYS);
    let tricks = plays
        .chunks(4)
        .zip(HEARTS_TRICKS)
        .map(|(chunk, (points, winner, leader))| TrickRecord {
            cards: [chunk[0], chunk[1], chunk[2], chunk[3]],
            points,
            win: winner.index() as u8,
            first: leader.index() as u8,
        })
        .collect();
    let record = RoundRecord {
        trump: None,
        dealer: West.index() as u8,
        tss: 0,
        tricks,
        jass_type: Variant::Hearts,
    };

    let round = record.restore().expect("penalties and winners follow the rules");
    assert_eq!(round.trump(), None);
    assert_eq!(round.team_points(), [-9, -9]);
    assert_eq!(round.winning_team(), None);
    assert_tricks(&round, &HEARTS_TRICKS);
    assert_eq!(RoundView::trump_from_complete_round(&round, true), Ok(None));
    assert_eq!(RoundView::all_from_complete_round(&round).unwrap().len(), 36);
}
