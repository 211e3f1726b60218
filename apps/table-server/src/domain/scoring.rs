use crate::domain::state::{GameState, Seat};

/// Per-seat outcome of a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundScored {
    pub round: u8,
    pub bets: Vec<u8>,
    pub tricks: Vec<u8>,
    /// Points gained this round.
    pub gained: Vec<u32>,
    /// Cumulative totals after this round.
    pub scores: Vec<u32>,
}

/// Add round points for every seat whose bet matched its tricks.
pub fn apply_round_scoring(state: &mut GameState) -> RoundScored {
    let settings = state.settings;
    let mut out = RoundScored {
        round: state.round(),
        bets: Vec::with_capacity(state.seat_count()),
        tricks: Vec::with_capacity(state.seat_count()),
        gained: Vec::with_capacity(state.seat_count()),
        scores: Vec::with_capacity(state.seat_count()),
    };
    for seat in state.seats.iter_mut() {
        let bet = seat.bet.unwrap_or(0);
        let gained = settings.round_score(bet, seat.tricks);
        seat.score += gained;
        out.bets.push(bet);
        out.tricks.push(seat.tricks);
        out.gained.push(gained);
        out.scores.push(seat.score);
    }
    out
}

/// Seats sharing the highest cumulative score, with that score.
pub fn winners(state: &GameState) -> (Vec<Seat>, u32) {
    let best = state.seats.iter().map(|s| s.score).max().unwrap_or(0);
    let seats = state
        .seats
        .iter()
        .enumerate()
        .filter(|(_, s)| s.score == best)
        .map(|(i, _)| i)
        .collect();
    (seats, best)
}
