use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod constants;
pub mod entities;
pub mod functional;

use constants::HAND_SIZE;

#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum HandError {
    #[error("invalid card code '{code}'")]
    InvalidCardCode { code: String },
    #[error("expected {} cards, got {size}", HAND_SIZE)]
    InvalidHandSize { size: usize },
}

/// Knobs for how two hands of the same category are compared.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CompareSettings {
    /// Full houses with the same three of a kind are normally a tie.
    /// Setting this ranks them by their pair instead.
    pub strict_full_house: bool,
}

impl CompareSettings {
    #[must_use]
    pub fn new(strict_full_house: bool) -> Self {
        Self { strict_full_house }
    }
}
