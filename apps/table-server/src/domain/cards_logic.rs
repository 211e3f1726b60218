//! Card game logic: checking suits in hands, comparing card strength

use super::cards_types::{Card, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Whether `challenger` beats the card currently winning a trick.
///
/// A card of a different suit only wins if it is trump; the current winner
/// is always either of the led suit or trump, so this covers off-suit
/// discards as well.
pub fn card_beats(challenger: Card, winning: Card, trump: Suit) -> bool {
    if challenger.suit != winning.suit {
        return challenger.suit == trump;
    }
    challenger.rank > winning.rank
}

/// Index of the winning card in a trick given in play order.
pub fn winning_index(trick: &[Card], trump: Suit) -> Option<usize> {
    let (first, rest) = trick.split_first()?;
    let mut best = 0;
    let mut best_card = *first;
    for (i, card) in rest.iter().enumerate() {
        if card_beats(*card, best_card, trump) {
            best = i + 1;
            best_card = *card;
        }
    }
    Some(best)
}
