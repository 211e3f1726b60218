// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Diamonds),
        Just(Suit::Clubs),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    (0usize..13).prop_map(|i| Rank::ALL[i])
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// A complete trick of `2..=6` distinct cards, in play order.
pub fn complete_trick() -> impl Strategy<Value = Vec<Card>> {
    (2usize..=6).prop_flat_map(|n| {
        Just(crate::domain::DeckKind::Standard52.cards())
            .prop_shuffle()
            .prop_map(move |cards| cards[..n].to_vec())
    })
}
