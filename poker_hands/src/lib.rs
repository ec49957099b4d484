pub mod hand;
pub use hand::{
    constants::{self, HAND_SIZE, MAX_VALUE, MIN_VALUE},
    entities::{self, Card, Category, EvaluatedHand, Hand, Outcome, Suit, Value, Witness},
    functional::{self, compare, compare_with, eval, evaluate, showdown},
    CompareSettings, HandError,
};
