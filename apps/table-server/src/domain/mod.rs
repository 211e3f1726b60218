//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod cards_logic;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod deck;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_dealing;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use cards_logic::{card_beats, hand_has_suit};
pub use cards_types::{Card, Rank, Suit};
pub use deck::{Deck, DeckKind};
pub use rules::{valid_bid_range, RoundSettings};
pub use state::{GameState, Phase, Seat};
