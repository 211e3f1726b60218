//! Builders for hand-crafted game states in unit tests.

use crate::domain::rules::{RoundCursor, RoundSettings, DEFAULT_ROUND_POINTS, DEFAULT_TRICK_POINTS};
use crate::domain::state::{next_seat, GameState, Phase, Seat};
use crate::domain::{Card, Deck, DeckKind, Rank, Suit};

pub fn settings(min_round: u8, max_round: u8) -> RoundSettings {
    RoundSettings {
        min_round,
        max_round,
        round_points: DEFAULT_ROUND_POINTS,
        trick_points: DEFAULT_TRICK_POINTS,
        iterations: 1,
    }
}

pub fn c(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// A state in the betting phase with the given hands already dealt.
pub fn betting_state(hands: Vec<Vec<Card>>, dealer: Seat, trump: Card) -> GameState {
    let n = hands.len();
    let round = hands.first().map(Vec::len).unwrap_or(0) as u8;
    let mut state = GameState::new(n, settings(1, 12), Deck::new(DeckKind::Standard52, 0), 0);
    state.cursor = RoundCursor {
        round,
        ascending: true,
        iteration: 0,
    };
    for (seat, hand) in hands.into_iter().enumerate() {
        state.seats[seat].reset_for_round(hand);
    }
    state.dealer = dealer;
    state.trump = Some(trump);
    state.phase = Phase::Betting;
    state.turn = Some(next_seat(dealer, n));
    state.leader = next_seat(dealer, n);
    state
}

/// A state in trick play where every seat has bet `bets[seat]`.
pub fn trick_state(hands: Vec<Vec<Card>>, dealer: Seat, trump: Card, bets: &[u8]) -> GameState {
    let mut state = betting_state(hands, dealer, trump);
    for (seat, bet) in bets.iter().enumerate() {
        state.seats[seat].bet = Some(*bet);
    }
    state.phase = Phase::TrickPlay;
    state
}
