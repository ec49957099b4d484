use log::{debug, trace};
use std::{cmp::Ordering, collections::BTreeMap};

use super::{
    CompareSettings, HandError,
    constants::HAND_SIZE,
    entities::{Card, EvaluatedHand, Hand, Outcome, Suit, Value, Witness},
};

/// Find the value that appears most often, ignoring `excluded`.
/// Among values that appear equally often, the higher value wins.
fn most_common_value(values: &[Value], excluded: Option<Value>) -> Option<(Value, usize)> {
    let mut value_counts: BTreeMap<Value, usize> = BTreeMap::new();
    for value in values.iter().filter(|v| Some(**v) != excluded) {
        *value_counts.entry(*value).or_insert(0) += 1;
    }
    // Iterating in increasing value order and keeping ties means the
    // highest value with the highest count is kept.
    value_counts
        .into_iter()
        .fold(None, |best, (value, count)| match best {
            Some((_, best_count)) if best_count > count => best,
            _ => Some((value, count)),
        })
}

fn flush_suit(hand: &Hand) -> Option<Suit> {
    let [first, rest @ ..] = hand.cards();
    let suit = first.suit();
    rest.iter().all(|card| card.suit() == suit).then_some(suit)
}

/// Straights must be five consecutive values. An ace is always high,
/// so A-2-3-4-5 isn't a straight.
fn straight_values(hand: &Hand) -> Option<[Value; HAND_SIZE]> {
    let values = hand.values_asc();
    values
        .windows(2)
        .all(|pair| pair[0] + 1 == pair[1])
        .then_some(values)
}

fn high_card(hand: &Hand) -> Card {
    let [first, rest @ ..] = hand.cards();
    rest.iter().fold(*first, |best, card| {
        if card.value() > best.value() {
            *card
        } else {
            best
        }
    })
}

/// Evaluate a five-card hand, assigning it exactly one category along
/// with the values needed to break ties within that category.
///
/// Categories are checked from strongest to weakest, so the strongest
/// category a hand qualifies for is the one it gets.
///
/// # Examples
///
/// ```
/// use poker_hands::{entities::{Category, Hand, Witness}, functional::eval};
///
/// let hand: Hand = "2S AH 2H AS AC".parse().unwrap();
/// let evaluated = eval(&hand);
/// assert_eq!(evaluated.category(), Category::FullHouse);
/// assert_eq!(evaluated.witness(), &Witness::FullHouse { three: 14, pair: 2 });
/// ```
pub fn eval(hand: &Hand) -> EvaluatedHand {
    let values = hand.values_asc();
    let flush = flush_suit(hand);
    let straight = straight_values(hand);
    let most_common = most_common_value(&values, None);

    // Hands don't have to come from the same deck, so a hand can
    // have five of the same value. That still counts as four of a kind.
    let four_of_a_kind = match most_common {
        Some((value, count)) if count >= 4 => Some(value),
        _ => None,
    };
    let three_of_a_kind = match most_common {
        Some((value, 3)) => Some(value),
        _ => None,
    };
    let full_house = three_of_a_kind.and_then(|three| match most_common_value(&values, Some(three)) {
        Some((pair, 2)) => Some((three, pair)),
        _ => None,
    });
    let pair = match most_common {
        Some((value, 2)) => Some(value),
        _ => None,
    };
    let two_pair = pair.and_then(|first| match most_common_value(&values, Some(first)) {
        Some((second, 2)) => Some((first.max(second), first.min(second))),
        _ => None,
    });

    let witness = if let (Some(suit), Some(values)) = (flush, straight) {
        Witness::StraightFlush { values, suit }
    } else if let Some(value) = four_of_a_kind {
        Witness::FourOfAKind(value)
    } else if let Some((three, pair)) = full_house {
        Witness::FullHouse { three, pair }
    } else if let Some(suit) = flush {
        Witness::Flush(suit)
    } else if let Some(values) = straight {
        Witness::Straight(values)
    } else if let Some(value) = three_of_a_kind {
        Witness::ThreeOfAKind(value)
    } else if let Some((high, low)) = two_pair {
        Witness::TwoPair { high, low }
    } else if let Some(value) = pair {
        Witness::Pair(value)
    } else {
        Witness::HighCard(high_card(hand).value())
    };

    debug!("{hand} is a {}", witness.category());
    EvaluatedHand::new(*hand, witness, high_card(hand))
}

/// Parse and evaluate a hand of five space-separated card codes.
///
/// # Examples
///
/// ```
/// use poker_hands::{entities::Category, functional::evaluate, HandError};
///
/// let evaluated = evaluate("AS AH 2H AD AC").unwrap();
/// assert_eq!(evaluated.category(), Category::FourOfAKind);
/// assert!(matches!(evaluate("AS AH 1H AD AC"), Err(HandError::InvalidCardCode { .. })));
/// ```
pub fn evaluate(s: &str) -> Result<EvaluatedHand, HandError> {
    let hand: Hand = s.parse()?;
    Ok(eval(&hand))
}

/// Compare two sequences of card values sorted in decreasing order,
/// one card at a time, until one side has the higher card.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use poker_hands::functional::compare_high_cards;
///
/// assert_eq!(compare_high_cards(&[14, 14, 7, 6, 5], &[14, 14, 7, 6, 4]), Ordering::Greater);
/// assert_eq!(compare_high_cards(&[9, 5], &[9, 5]), Ordering::Equal);
/// ```
pub fn compare_high_cards(ours: &[Value], theirs: &[Value]) -> Ordering {
    match (ours.split_first(), theirs.split_first()) {
        (Some((our_highest, ours)), Some((their_highest, theirs))) => {
            match our_highest.cmp(their_highest) {
                Ordering::Equal => compare_high_cards(ours, theirs),
                ordering => ordering,
            }
        }
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
    }
}

fn tie_break(ours: &EvaluatedHand, theirs: &EvaluatedHand, settings: &CompareSettings) -> Ordering {
    let kickers = || compare_high_cards(&ours.hand().values_desc(), &theirs.hand().values_desc());
    match (ours.witness(), theirs.witness()) {
        (
            Witness::StraightFlush { values: our_values, .. },
            Witness::StraightFlush { values: their_values, .. },
        )
        | (Witness::Straight(our_values), Witness::Straight(their_values)) => {
            our_values[HAND_SIZE - 1].cmp(&their_values[HAND_SIZE - 1])
        }
        (Witness::FourOfAKind(ours), Witness::FourOfAKind(theirs))
        | (Witness::ThreeOfAKind(ours), Witness::ThreeOfAKind(theirs))
        | (Witness::Pair(ours), Witness::Pair(theirs)) => ours.cmp(theirs).then_with(kickers),
        (
            Witness::TwoPair {
                high: our_high,
                low: our_low,
            },
            Witness::TwoPair {
                high: their_high,
                low: their_low,
            },
        ) => our_high
            .cmp(their_high)
            .then(our_low.cmp(their_low))
            .then_with(kickers),
        (
            Witness::FullHouse {
                three: our_three,
                pair: our_pair,
            },
            Witness::FullHouse {
                three: their_three,
                pair: their_pair,
            },
        ) => {
            let ordering = our_three.cmp(their_three);
            if settings.strict_full_house {
                ordering.then(our_pair.cmp(their_pair))
            } else {
                ordering
            }
        }
        (Witness::Flush(_), Witness::Flush(_)) | (Witness::HighCard(_), Witness::HighCard(_)) => {
            kickers()
        }
        _ => unreachable!("hands of the same category have the same kind of witness"),
    }
}

/// Compare two evaluated hands with explicit settings, returning the
/// outcome for `ours`.
pub fn compare_with(
    ours: &EvaluatedHand,
    theirs: &EvaluatedHand,
    settings: &CompareSettings,
) -> Outcome {
    let ordering = match ours.category().cmp(&theirs.category()) {
        Ordering::Equal => tie_break(ours, theirs, settings),
        ordering => ordering,
    };
    let outcome = Outcome::from(ordering);
    trace!("{ours} vs {theirs}: {outcome}");
    outcome
}

/// Compare two evaluated hands, returning the outcome for `ours`.
///
/// # Examples
///
/// ```
/// use poker_hands::{entities::Outcome, functional::{compare, evaluate}};
///
/// let ours = evaluate("2H 3H 4H 5H 6H").unwrap();
/// let theirs = evaluate("9S TS JS QS KS").unwrap();
/// assert_eq!(compare(&ours, &theirs), Outcome::Loss);
/// assert_eq!(compare(&theirs, &ours), Outcome::Win);
/// ```
pub fn compare(ours: &EvaluatedHand, theirs: &EvaluatedHand) -> Outcome {
    compare_with(ours, theirs, &CompareSettings::default())
}

/// Parse, evaluate, and compare two hands in one go.
///
/// # Examples
///
/// ```
/// use poker_hands::{entities::Outcome, functional::showdown};
///
/// assert_eq!(showdown("6S AD 7H 4S AS", "AH AC 5H 6H 7S"), Ok(Outcome::Loss));
/// assert!(showdown("6S AD 7H 4S", "AH AC 5H 6H 7S").is_err());
/// ```
pub fn showdown(ours: &str, theirs: &str) -> Result<Outcome, HandError> {
    let ours = evaluate(ours)?;
    let theirs = evaluate(theirs)?;
    Ok(compare(&ours, &theirs))
}

#[cfg(test)]
mod tests {
    use super::{compare, compare_with, eval, evaluate, most_common_value};
    use crate::hand::{
        CompareSettings,
        entities::{Category, Hand, Outcome, Suit, Witness},
    };

    macro_rules! eval_and_compare_tests {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let ((hand1, category1), (hand2, category2), expected) = $value;
                let hand1 = evaluate(hand1).unwrap();
                let hand2 = evaluate(hand2).unwrap();
                assert_eq!(category1, hand1.category());
                assert_eq!(category2, hand2.category());
                assert_eq!(expected, compare(&hand1, &hand2));
                assert_eq!(expected.reverse(), compare(&hand2, &hand1));
            }
        )*
        }
    }

    eval_and_compare_tests! {
        straight_flush_wins_to_four_of_a_kind: (
            ("2H 3H 4H 5H 6H", Category::StraightFlush),
            ("AS AH AD AC KH", Category::FourOfAKind),
            Outcome::Win,
        ),
        straight_flush_loses_to_straight_flush: (
            ("2H 3H 4H 5H 6H", Category::StraightFlush),
            ("9S TS JS QS KS", Category::StraightFlush),
            Outcome::Loss,
        ),
        four_of_a_kind_wins_to_four_of_a_kind: (
            ("AS AH 2H AD AC", Category::FourOfAKind),
            ("JS JD JC JH 3D", Category::FourOfAKind),
            Outcome::Win,
        ),
        four_of_a_kind_kicker_wins: (
            ("9S 9D 9H 9C AS", Category::FourOfAKind),
            ("9S 9D 9H 9C KS", Category::FourOfAKind),
            Outcome::Win,
        ),
        full_house_wins_to_flush: (
            ("2S AH 2H AS AC", Category::FullHouse),
            ("2H 3H 5H 6H 7H", Category::Flush),
            Outcome::Win,
        ),
        full_house_ties_on_three: (
            ("KS KD KH 2C 2D", Category::FullHouse),
            ("KS KD KH 3C 3D", Category::FullHouse),
            Outcome::Tie,
        ),
        full_house_loses_to_full_house: (
            ("QS QD QH AC AD", Category::FullHouse),
            ("KS KD KH 3C 3D", Category::FullHouse),
            Outcome::Loss,
        ),
        flush_wins_to_straight: (
            ("2H 4H 6H 8H TH", Category::Flush),
            ("5S 6D 7H 8C 9S", Category::Straight),
            Outcome::Win,
        ),
        flush_loses_to_flush: (
            ("2D 5D 6D 7D 9D", Category::Flush),
            ("3D 5D 6D 7D 9D", Category::Flush),
            Outcome::Loss,
        ),
        flush_ties_with_flush: (
            ("2D 5D 6D 7D 9D", Category::Flush),
            ("2C 5C 6C 7C 9C", Category::Flush),
            Outcome::Tie,
        ),
        straight_wins_to_three_of_a_kind: (
            ("4H 5H 6C 7H 8H", Category::Straight),
            ("QS QD QH 2C 3C", Category::ThreeOfAKind),
            Outcome::Win,
        ),
        straight_ties_with_straight: (
            ("4H 5H 6C 7H 8H", Category::Straight),
            ("4S 5D 6D 7S 8C", Category::Straight),
            Outcome::Tie,
        ),
        ace_high_straight_wins_to_king_high_straight: (
            ("TS JD QH KC AS", Category::Straight),
            ("9S TD JH QC KS", Category::Straight),
            Outcome::Win,
        ),
        three_of_a_kind_loses_to_three_of_a_kind: (
            ("7S 7D 7H 2C 3C", Category::ThreeOfAKind),
            ("8S 8D 8H 2D 3D", Category::ThreeOfAKind),
            Outcome::Loss,
        ),
        three_of_a_kind_wins_to_two_pair: (
            ("2S 2D 2H 3C 4C", Category::ThreeOfAKind),
            ("AS AD KH KC QC", Category::TwoPair),
            Outcome::Win,
        ),
        two_pair_wins_on_low_pair: (
            ("KS KD 4H 4C 9S", Category::TwoPair),
            ("KH KC 3H 3C AS", Category::TwoPair),
            Outcome::Win,
        ),
        two_pair_wins_on_kicker: (
            ("KS KD 4H 4C 9S", Category::TwoPair),
            ("KH KC 4S 4D 8S", Category::TwoPair),
            Outcome::Win,
        ),
        two_pair_loses_on_high_pair: (
            ("QS QD JH JC AS", Category::TwoPair),
            ("KH KC 2S 2D 3S", Category::TwoPair),
            Outcome::Loss,
        ),
        one_pair_loses_on_kickers: (
            ("6S AD 7H 4S AS", Category::Pair),
            ("AH AC 5H 6H 7S", Category::Pair),
            Outcome::Loss,
        ),
        one_pair_wins_to_one_pair: (
            ("QC QS 4C 6H 8D", Category::Pair),
            ("JH JD 3C 6H 8D", Category::Pair),
            Outcome::Win,
        ),
        one_pair_wins_to_high_card: (
            ("2S 2D 4H 5C 7S", Category::Pair),
            ("AS KD QH JC 9S", Category::HighCard),
            Outcome::Win,
        ),
        high_card_wins_on_last_card: (
            ("3S 4D 6H 8C TS", Category::HighCard),
            ("2H 4C 6S 8D TH", Category::HighCard),
            Outcome::Win,
        ),
        high_card_ties_with_high_card: (
            ("2S 4D 6H 8C TS", Category::HighCard),
            ("2H 4C 6S 8D TH", Category::HighCard),
            Outcome::Tie,
        ),
        low_ace_is_not_a_straight: (
            ("AS 2D 3H 4C 5S", Category::HighCard),
            ("2S 3D 4H 5C 6S", Category::Straight),
            Outcome::Loss,
        ),
    }

    macro_rules! witness_tests {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (hand, expected) = $value;
                assert_eq!(evaluate(hand).unwrap().witness(), &expected);
            }
        )*
        }
    }

    witness_tests! {
        straight_flush_witness: ("6H 2H 4H 3H 5H", Witness::StraightFlush {
            values: [2, 3, 4, 5, 6],
            suit: Suit::Heart,
        }),
        four_of_a_kind_witness: ("JS JD JC JH 3D", Witness::FourOfAKind(11)),
        full_house_witness: ("2S AH 2H AS AC", Witness::FullHouse { three: 14, pair: 2 }),
        flush_witness: ("2C 9C 5C KC 7C", Witness::Flush(Suit::Club)),
        straight_witness: ("9D 7S 8H TC 6S", Witness::Straight([6, 7, 8, 9, 10])),
        three_of_a_kind_witness: ("4S 4H 4C AD KC", Witness::ThreeOfAKind(4)),
        two_pair_witness: ("4S KD 4H KC 9S", Witness::TwoPair { high: 13, low: 4 }),
        pair_witness: ("6S AD 7H 4S AS", Witness::Pair(14)),
        high_card_witness: ("2S 4D 6H 8C TS", Witness::HighCard(10)),
        five_of_a_kind_is_four_of_a_kind: ("AS AS AS AS AS", Witness::FourOfAKind(14)),
        four_of_a_kind_beats_flush: ("AH AH AH AH KH", Witness::FourOfAKind(14)),
        full_house_beats_flush: ("AS AS KS KS KS", Witness::FullHouse { three: 13, pair: 14 }),
        flush_beats_three_of_a_kind: ("AS AS AS KS QS", Witness::Flush(Suit::Spade)),
        flush_beats_two_pair: ("AS AS KS KS QS", Witness::Flush(Suit::Spade)),
    }

    #[test]
    fn most_common_prefers_higher_value_on_equal_counts() {
        assert_eq!(most_common_value(&[3, 3, 9, 9, 12], None), Some((9, 2)));
        assert_eq!(most_common_value(&[3, 3, 9, 9, 12], Some(9)), Some((3, 2)));
        assert_eq!(most_common_value(&[2, 5, 7, 7, 7], None), Some((7, 3)));
        assert_eq!(most_common_value(&[2, 5, 8, 11, 14], None), Some((14, 1)));
        assert_eq!(most_common_value(&[7, 7], Some(7)), None);
    }

    #[test]
    fn high_card_is_first_highest() {
        let hand: Hand = "KS 2D KH 9C TH".parse().unwrap();
        let evaluated = eval(&hand);
        assert_eq!(evaluated.high_card().to_string(), "KS");
        assert_eq!(evaluated.hand(), &hand);
    }

    #[test]
    fn strict_full_house_compares_pairs() {
        let hand1 = evaluate("KS KD KH 2C 2D").unwrap();
        let hand2 = evaluate("KS KD KH 3C 3D").unwrap();
        let strict = CompareSettings::new(true);
        assert_eq!(compare_with(&hand1, &hand2, &strict), Outcome::Loss);
        assert_eq!(compare_with(&hand2, &hand1, &strict), Outcome::Win);
        assert_eq!(compare_with(&hand1, &hand1, &strict), Outcome::Tie);
    }

    #[test]
    fn strict_full_house_still_ranks_by_three_first() {
        let hand1 = evaluate("QS QD QH AC AD").unwrap();
        let hand2 = evaluate("KS KD KH 3C 3D").unwrap();
        let strict = CompareSettings::new(true);
        assert_eq!(compare_with(&hand1, &hand2, &strict), Outcome::Loss);
    }
}
