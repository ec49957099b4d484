pub const HAND_SIZE: usize = 5;
// Deuce is the lowest card. There's no low ace, so an ace is always
// the highest card.
pub const MIN_VALUE: u8 = 2;
pub const MAX_VALUE: u8 = 14;
