use crate::domain::rules::valid_bid_range;
use crate::domain::state::{require_phase, require_turn, GameState, Phase, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BetPlaced {
    pub seat: Seat,
    pub amount: u8,
    /// The dealer just bet; trick play begins.
    pub betting_closed: bool,
}

/// Bets `seat` may place right now (empty when it is not its turn to bet).
pub fn legal_bets(state: &GameState, seat: Seat) -> Vec<u8> {
    if state.phase != Phase::Betting || state.turn != Some(seat) {
        return Vec::new();
    }
    valid_bid_range(state.round()).collect()
}

/// Record a bet for the seat to act and pass the turn clockwise.
pub fn place_bet(state: &mut GameState, seat: Seat, amount: i64) -> Result<BetPlaced, DomainError> {
    require_phase(state, Phase::Betting, "Not currently betting")?;
    require_turn(state, seat)?;

    let round = state.round();
    if amount < 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidBet,
            format!("Must bet at least 0 but bet {amount}"),
        ));
    }
    if amount > round as i64 {
        return Err(DomainError::validation(
            ValidationKind::InvalidBet,
            format!("Cannot bet more than the cards in the round ({round}) but bet {amount}"),
        ));
    }
    let amount = amount as u8;

    state.seats[seat].bet = Some(amount);
    let betting_closed = seat == state.dealer;
    let next = state.next_seat(seat);
    state.turn = Some(next);
    if betting_closed {
        state.phase = Phase::TrickPlay;
        state.leader = next;
    }

    Ok(BetPlaced {
        seat,
        amount,
        betting_closed,
    })
}
