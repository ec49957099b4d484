use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{cmp::Ordering, fmt, str::FromStr};

use super::{
    HandError,
    constants::{HAND_SIZE, MAX_VALUE, MIN_VALUE},
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    fn from_code(code: char) -> Option<Self> {
        match code {
            'C' => Some(Self::Club),
            'S' => Some(Self::Spade),
            'D' => Some(Self::Diamond),
            'H' => Some(Self::Heart),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "C",
            Self::Spade => "S",
            Self::Diamond => "D",
            Self::Heart => "H",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values (deuce=2u8 ... ace=14u8).
pub type Value = u8;

fn value_from_code(code: char) -> Option<Value> {
    match code {
        '2'..='9' => code.to_digit(10).map(|digit| digit as Value),
        'T' => Some(10),
        'J' => Some(11),
        'Q' => Some(12),
        'K' => Some(13),
        'A' => Some(14),
        _ => None,
    }
}

fn value_to_code(value: Value) -> char {
    match value {
        10 => 'T',
        11 => 'J',
        12 => 'Q',
        13 => 'K',
        14 => 'A',
        v => char::from(b'0' + v),
    }
}

/// A card is a value (deuce=2u8 ... ace=14u8) and a suit.
///
/// Cards are parsed from two-character codes like `"TS"` or `"4H"`, and
/// display as the same code.
///
/// # Examples
///
/// ```
/// use poker_hands::entities::{Card, Suit};
///
/// let card: Card = "QD".parse().unwrap();
/// assert_eq!(card.value(), 12);
/// assert_eq!(card.suit(), Suit::Diamond);
/// assert_eq!(card.to_string(), "QD");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(Value, Suit);

impl Card {
    pub fn new(value: Value, suit: Suit) -> Result<Self, HandError> {
        if (MIN_VALUE..=MAX_VALUE).contains(&value) {
            Ok(Self(value, suit))
        } else {
            Err(HandError::InvalidCardCode {
                code: format!("{value}{suit}"),
            })
        }
    }

    #[must_use]
    pub fn value(&self) -> Value {
        self.0
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.1
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", value_to_code(self.0), self.1)
    }
}

impl FromStr for Card {
    type Err = HandError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let invalid = || HandError::InvalidCardCode {
            code: code.to_string(),
        };
        let mut chars = code.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(value), Some(suit), None) => {
                let value = value_from_code(value).ok_or_else(invalid)?;
                let suit = Suit::from_code(suit).ok_or_else(invalid)?;
                Ok(Self(value, suit))
            }
            _ => Err(invalid()),
        }
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Exactly five cards, kept in the order they were given.
///
/// Hands don't come from a single deck, so the same card can appear
/// more than once.
///
/// # Examples
///
/// ```
/// use poker_hands::{entities::Hand, HandError};
///
/// let hand: Hand = "AS AH 2H AD AC".parse().unwrap();
/// assert_eq!(hand.values_desc(), [14, 14, 14, 14, 2]);
/// assert_eq!(
///     "AS AH 2H".parse::<Hand>(),
///     Err(HandError::InvalidHandSize { size: 3 })
/// );
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Hand([Card; HAND_SIZE]);

impl Hand {
    #[must_use]
    pub fn new(cards: [Card; HAND_SIZE]) -> Self {
        Self(cards)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.0
    }

    #[must_use]
    pub fn values_asc(&self) -> [Value; HAND_SIZE] {
        let mut values = self.0.map(|card| card.value());
        values.sort_unstable();
        values
    }

    #[must_use]
    pub fn values_desc(&self) -> [Value; HAND_SIZE] {
        let mut values = self.values_asc();
        values.reverse();
        values
    }
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = HandError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        let size = cards.len();
        let cards: [Card; HAND_SIZE] = cards
            .try_into()
            .map_err(|_| HandError::InvalidHandSize { size })?;
        Ok(Self(cards))
    }
}

impl FromStr for Hand {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = s
            .split_ascii_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Card>, _>>()?;
        cards.try_into()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{repr}")
    }
}

impl Serialize for Hand {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Category {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::Pair => "pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// The values that decide a tie between two hands of the same category.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Witness {
    HighCard(Value),
    Pair(Value),
    TwoPair { high: Value, low: Value },
    ThreeOfAKind(Value),
    /// Values in increasing order.
    Straight([Value; HAND_SIZE]),
    Flush(Suit),
    FullHouse { three: Value, pair: Value },
    FourOfAKind(Value),
    /// Values in increasing order.
    StraightFlush { values: [Value; HAND_SIZE], suit: Suit },
}

impl Witness {
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::HighCard(_) => Category::HighCard,
            Self::Pair(_) => Category::Pair,
            Self::TwoPair { .. } => Category::TwoPair,
            Self::ThreeOfAKind(_) => Category::ThreeOfAKind,
            Self::Straight(_) => Category::Straight,
            Self::Flush(_) => Category::Flush,
            Self::FullHouse { .. } => Category::FullHouse,
            Self::FourOfAKind(_) => Category::FourOfAKind,
            Self::StraightFlush { .. } => Category::StraightFlush,
        }
    }
}

/// A hand along with its category and tie-break values. Created by
/// `functional::eval` and never changed afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvaluatedHand {
    hand: Hand,
    witness: Witness,
    high_card: Card,
}

impl EvaluatedHand {
    pub(crate) fn new(hand: Hand, witness: Witness, high_card: Card) -> Self {
        Self {
            hand,
            witness,
            high_card,
        }
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    #[must_use]
    pub fn witness(&self) -> &Witness {
        &self.witness
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.witness.category()
    }

    #[must_use]
    pub fn high_card(&self) -> Card {
        self.high_card
    }
}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.hand, self.category())
    }
}

/// Result of a comparison from the first hand's point of view.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// The same result from the other hand's point of view.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::Win => Self::Loss,
            Self::Loss => Self::Win,
            Self::Tie => Self::Tie,
        }
    }
}

impl From<Ordering> for Outcome {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Greater => Self::Win,
            Ordering::Less => Self::Loss,
            Ordering::Equal => Self::Tie,
        }
    }
}

impl From<Outcome> for u8 {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Win => 1,
            Outcome::Loss => 2,
            Outcome::Tie => 3,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Tie => "tie",
        };
        write!(f, "{repr}")
    }
}
