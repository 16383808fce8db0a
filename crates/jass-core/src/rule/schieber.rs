use crate::model::card::Card;
use crate::model::hand::CardSet;
use crate::model::player::PlayerPosition;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::model::trick::TRICK_SIZE;
use crate::model::trump::Trump;
use crate::rule::{follow_suit, highest_of_led_suit, lowest_of_led_suit};

pub const LAST_TRICK_BONUS: i32 = 5;

pub fn legal_cards(hand: CardSet, trick: &[Card], trump: Trump) -> CardSet {
    let Some(lead) = trick.first() else {
        return hand;
    };
    let Trump::Suit(trump_suit) = trump else {
        return follow_suit(hand, trick);
    };

    let led = lead.suit();
    let trumps = hand.of_suit(trump_suit);

    if led == trump_suit {
        // The trump jack never has to be played on a trump lead.
        let only_jack =
            trumps.len() == 1 && trumps.contains(Card::new(Rank::Jack, trump_suit));
        return if trumps.is_empty() || only_jack {
            hand
        } else {
            trumps
        };
    }

    let following = hand.of_suit(led);
    match strongest_trump(&trick[1..], trump_suit) {
        None if following.is_empty() => hand,
        None => following.union(trumps),
        Some(top) => {
            if trumps.len() == hand.len() {
                return hand;
            }
            let higher = trumps.filter(|card| beats_trump(card, top));
            if following.is_empty() {
                hand.difference(trumps.difference(higher))
            } else {
                following.union(higher)
            }
        }
    }
}

pub fn trick_points(trick: &[Card; TRICK_SIZE], is_last: bool, trump: Trump) -> i32 {
    let points: i32 = trick.iter().map(|card| card.points(trump)).sum();
    if is_last {
        points + LAST_TRICK_BONUS
    } else {
        points
    }
}

pub fn trick_winner(
    trick: &[Card; TRICK_SIZE],
    leader: PlayerPosition,
    trump: Trump,
) -> PlayerPosition {
    let position = match trump {
        Trump::ObeAbe => highest_of_led_suit(trick),
        Trump::UneUfe => lowest_of_led_suit(trick),
        Trump::Suit(suit) => trick
            .iter()
            .enumerate()
            .filter(|(_, card)| card.suit() == suit)
            .max_by_key(|(_, card)| card.rank().trump_strength())
            .map_or_else(|| highest_of_led_suit(trick), |(position, _)| position),
    };
    leader.advance(position)
}

fn strongest_trump(cards: &[Card], trump_suit: Suit) -> Option<Card> {
    cards
        .iter()
        .copied()
        .filter(|card| card.suit() == trump_suit)
        .max_by_key(|card| card.rank().trump_strength())
}

fn beats_trump(card: Card, other: Card) -> bool {
    card.rank().trump_strength() > other.rank().trump_strength()
}

#[cfg(test)]
mod tests {
    use super::{legal_cards, trick_points, trick_winner};
    use crate::model::card::Card;
    use crate::model::card::cards::*;
    use crate::model::hand::CardSet;
    use crate::model::player::PlayerPosition;
    use crate::model::suit::Suit;
    use crate::model::trump::Trump;

    const SPADES: Trump = Trump::Suit(Suit::Spades);

    fn hand(cards: &[Card]) -> CardSet {
        cards.iter().copied().collect()
    }

    #[test]
    fn lead_allows_whole_hand() {
        let cards = hand(&[DA, SJ, C6]);
        assert_eq!(legal_cards(cards, &[], SPADES), cards);
    }

    #[test]
    fn following_suit_may_also_trump() {
        let cards = hand(&[DA, D7, HK, SJ, C6]);
        assert_eq!(legal_cards(cards, &[D10], SPADES), hand(&[DA, D7, SJ]));
    }

    #[test]
    fn void_in_led_suit_allows_anything_without_trump_played() {
        let cards = hand(&[HK, SJ, C6]);
        assert_eq!(legal_cards(cards, &[D10], SPADES), cards);
    }

    #[test]
    fn trump_lead_must_be_followed_with_trump() {
        let cards = hand(&[SJ, S6, DA]);
        assert_eq!(legal_cards(cards, &[S10], SPADES), hand(&[SJ, S6]));
    }

    #[test]
    fn lone_trump_jack_is_never_forced() {
        let cards = hand(&[SJ, DA, HK]);
        assert_eq!(legal_cards(cards, &[S10], SPADES), cards);
    }

    #[test]
    fn no_trump_on_trump_lead_allows_anything() {
        let cards = hand(&[DA, HK]);
        assert_eq!(legal_cards(cards, &[S10], SPADES), cards);
    }

    #[test]
    fn undertrumping_is_forbidden_when_void() {
        let cards = hand(&[S6, SJ, H7, HK]);
        assert_eq!(legal_cards(cards, &[DA, S9], SPADES), hand(&[SJ, H7, HK]));
    }

    #[test]
    fn following_suit_may_overtrump_only() {
        let cards = hand(&[D7, S6, SJ]);
        assert_eq!(legal_cards(cards, &[DA, S9], SPADES), hand(&[D7, SJ]));
    }

    #[test]
    fn all_trump_hand_may_undertrump() {
        let cards = hand(&[S6, S7]);
        assert_eq!(legal_cards(cards, &[DA, SJ], SPADES), cards);
    }

    #[test]
    fn overtrump_compares_trump_strength_not_card_order() {
        // The ace sits before the nine in the deck but ranks below it as trump.
        let cards = hand(&[SA, S6, H7]);
        assert_eq!(legal_cards(cards, &[DA, S9], SPADES), hand(&[H7]));
        assert_eq!(legal_cards(cards, &[DA, D9, S9], SPADES), hand(&[H7]));
    }

    #[test]
    fn obe_and_une_only_follow_suit() {
        let cards = hand(&[DA, SJ]);
        assert_eq!(legal_cards(cards, &[D7], Trump::ObeAbe), hand(&[DA]));
        assert_eq!(legal_cards(cards, &[C7], Trump::UneUfe), cards);
    }

    #[test]
    fn points_follow_trump_table() {
        let trick = [SA, SK, SQ, SJ];
        assert_eq!(trick_points(&trick, false, Trump::Suit(Suit::Diamonds)), 20);
        assert_eq!(trick_points(&trick, true, Trump::Suit(Suit::Hearts)), 25);
        assert_eq!(trick_points(&trick, false, SPADES), 38);
        assert_eq!(trick_points(&trick, false, Trump::Suit(Suit::Clubs)), 20);
        assert_eq!(trick_points(&[SA, SJ, S6, S9], false, SPADES), 45);
    }

    #[test]
    fn last_trick_bonus_applies_to_obe_and_une() {
        let trick = [S10, D7, C8, D8];
        assert_eq!(trick_points(&trick, true, Trump::UneUfe), 31);
        assert_eq!(trick_points(&trick, false, Trump::UneUfe), 26);
    }

    #[test]
    fn winner_by_mode() {
        let trick = [SA, SK, HQ, C7];
        let east = PlayerPosition::East;
        assert_eq!(trick_winner(&trick, east, Trump::Suit(Suit::Diamonds)), PlayerPosition::East);
        assert_eq!(trick_winner(&trick, east, Trump::Suit(Suit::Hearts)), PlayerPosition::West);
        assert_eq!(trick_winner(&trick, east, SPADES), PlayerPosition::East);
        assert_eq!(trick_winner(&trick, east, Trump::Suit(Suit::Clubs)), PlayerPosition::South);
        assert_eq!(trick_winner(&trick, east, Trump::ObeAbe), PlayerPosition::East);
        assert_eq!(trick_winner(&trick, east, Trump::UneUfe), PlayerPosition::North);
    }

    #[test]
    fn winner_with_trump_lead() {
        let east = PlayerPosition::East;
        assert_eq!(trick_winner(&[S9, S10, SQ, SK], east, SPADES), PlayerPosition::East);
        assert_eq!(trick_winner(&[S9, S10, SJ, SK], east, SPADES), PlayerPosition::West);
        assert_eq!(trick_winner(&[SA, D6, D7, S9], east, SPADES), PlayerPosition::South);
    }

    #[test]
    fn winner_with_trump_played_off_suit() {
        let east = PlayerPosition::East;
        let trick = [SA, D6, D7, SJ];
        assert_eq!(trick_winner(&trick, east, Trump::Suit(Suit::Hearts)), PlayerPosition::East);
        assert_eq!(trick_winner(&trick, east, Trump::Suit(Suit::Diamonds)), PlayerPosition::West);
        assert_eq!(trick_winner(&trick, east, SPADES), PlayerPosition::South);
    }

    #[test]
    fn winner_without_trump_suit() {
        let east = PlayerPosition::East;
        assert_eq!(trick_winner(&[D7, SA, D6, S9], east, Trump::UneUfe), PlayerPosition::West);
        assert_eq!(trick_winner(&[SA, D6, D7, S9], east, Trump::UneUfe), PlayerPosition::South);
        assert_eq!(trick_winner(&[SA, D6, D7, S9], east, Trump::ObeAbe), PlayerPosition::East);
    }
}
