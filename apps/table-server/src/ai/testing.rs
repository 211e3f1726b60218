//! Hand-built decision points shared by the model tests.

use crate::domain::player_view::CurrentRoundInfo;
use crate::domain::test_state_helpers::{c, trick_state};
use crate::domain::tricks::play_card;
use crate::domain::{Rank, Suit};

/// Four seats, round of two, spades trump. Seats 1, 2 and 0 have played
/// 10♦, 3♦, K♦; seat 3 holds [A♦, 2♦], bet 2 and plays last.
pub fn last_to_play() -> CurrentRoundInfo {
    let hands = vec![
        vec![c(Suit::Diamonds, Rank::King), c(Suit::Clubs, Rank::Six)],
        vec![c(Suit::Diamonds, Rank::Ten), c(Suit::Clubs, Rank::Four)],
        vec![c(Suit::Diamonds, Rank::Three), c(Suit::Clubs, Rank::Five)],
        vec![c(Suit::Diamonds, Rank::Ace), c(Suit::Diamonds, Rank::Two)],
    ];
    let mut state = trick_state(hands, 0, c(Suit::Spades, Rank::Two), &[0, 0, 0, 2]);
    for seat in [1, 2, 0] {
        play_card(&mut state, seat, 0).unwrap();
    }
    CurrentRoundInfo::for_seat(&state, 3)
}
