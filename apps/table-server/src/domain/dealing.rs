//! Round dealing: advance the schedule, rotate the dealer, deal and expose trump.

use crate::domain::state::{next_seat, round_start_seat, seat_offset, GameState, Phase, Seat};
use crate::domain::Card;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// What the table learns when a new round is dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealtRound {
    pub round: u8,
    pub dealer: Seat,
    pub trump: Card,
}

/// Deal the next round of the schedule.
///
/// Returns `Ok(None)` when the schedule is exhausted; the state is then
/// moved to `GameOver` and nobody is left to act.
pub fn deal_next_round(state: &mut GameState) -> Result<Option<DealtRound>, DomainError> {
    let settings = state.settings;
    if !state.cursor.advance(&settings) {
        state.phase = Phase::GameOver;
        state.turn = None;
        state.trick.clear();
        return Ok(None);
    }

    let n = state.seat_count();
    let round = state.cursor.round as usize;
    state.dealer = next_seat(state.dealer, n);

    state.deck.reset();
    let hands = state.deck.deal(n, round)?;
    let trump = state.deck.draw().ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DeckExhausted,
            format!("no card left to expose as trump after dealing {round} to {n} seats"),
        )
    })?;

    // First hand off the deck goes to the left of the dealer.
    for (i, hand) in hands.into_iter().enumerate() {
        let seat = seat_offset(state.dealer, 1 + i as isize, n);
        state.seats[seat].reset_for_round(hand);
    }

    let first = round_start_seat(state.dealer, n);
    state.trump = Some(trump);
    state.trick.clear();
    state.phase = Phase::Betting;
    state.turn = Some(first);
    state.leader = first;

    Ok(Some(DealtRound {
        round: state.cursor.round,
        dealer: state.dealer,
        trump,
    }))
}
