use crate::domain::deck::Deck;
use crate::domain::rules::{RoundCursor, RoundSettings};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Seat index, `0..seat_count`, stable for the whole game.
pub type Seat = usize;

/// Overall game progression phases.
///
/// Dealing and round scoring happen inside the action that completes the
/// previous phase, so they never show up as a resting phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Game created but not yet started.
    Init,
    /// Seats bet in turn order starting left of the dealer.
    Betting,
    /// Tricks are being played.
    TrickPlay,
    /// Final round scored; state is frozen.
    GameOver,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::Betting => "betting",
            Phase::TrickPlay => "trick-play",
            Phase::GameOver => "game-over",
        }
    }
}

/// Everything one seat holds for the current round plus its running score.
#[derive(Debug, Clone, Default)]
pub struct SeatState {
    /// Hand as dealt; cards stay in place and are marked played by index.
    pub hand: Vec<Card>,
    /// Indices into `hand` already played this round, in play order.
    pub played: Vec<usize>,
    pub bet: Option<u8>,
    pub tricks: u8,
    pub score: u32,
}

impl SeatState {
    pub fn is_played(&self, index: usize) -> bool {
        self.played.contains(&index)
    }

    /// Unplayed cards with their hand indices.
    pub fn remaining(&self) -> impl Iterator<Item = (usize, Card)> + '_ {
        self.hand
            .iter()
            .copied()
            .enumerate()
            .filter(|(i, _)| !self.is_played(*i))
    }

    pub fn cards_left(&self) -> usize {
        self.hand.len() - self.played.len()
    }

    pub(crate) fn reset_for_round(&mut self, hand: Vec<Card>) {
        self.hand = hand;
        self.played.clear();
        self.bet = None;
        self.tricks = 0;
    }
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub seats: Vec<SeatState>,
    pub settings: RoundSettings,
    pub cursor: RoundCursor,
    /// Dealer of the current round.
    pub dealer: Seat,
    /// Seat expected to act; `None` before start and after the game ends.
    pub turn: Option<Seat>,
    /// Seat that led (or will lead) the current trick.
    pub leader: Seat,
    /// Card exposed after dealing; its suit is trump for the round.
    pub trump: Option<Card>,
    /// Plays in the current trick, in order.
    pub trick: Vec<(Seat, Card)>,
    pub deck: Deck,
}

impl GameState {
    /// A fresh game; `first_dealer` deals the first round.
    pub fn new(seat_count: usize, settings: RoundSettings, deck: Deck, first_dealer: Seat) -> Self {
        Self {
            phase: Phase::Init,
            seats: vec![SeatState::default(); seat_count],
            cursor: RoundCursor::before_first(&settings),
            settings,
            // The first deal rotates the dealer forward by one.
            dealer: seat_offset(first_dealer, -1, seat_count),
            turn: None,
            leader: first_dealer,
            trump: None,
            trick: Vec::with_capacity(seat_count),
            deck,
        }
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn round(&self) -> u8 {
        self.cursor.round
    }

    pub fn trump_suit(&self) -> Option<crate::domain::Suit> {
        self.trump.map(|c| c.suit)
    }

    pub fn lead_suit(&self) -> Option<crate::domain::Suit> {
        self.trick.first().map(|(_, c)| c.suit)
    }

    pub fn next_seat(&self, seat: Seat) -> Seat {
        next_seat(seat, self.seat_count())
    }
}

/// Seat / turn math helpers for `n` seats.
///
/// Clockwise direction is positive. Uses true modulo so negative offsets
/// wrap instead of underflowing.
#[inline]
pub fn seat_offset(seat: Seat, delta: isize, n: usize) -> Seat {
    if n == 0 {
        return 0;
    }
    (seat as isize + delta).rem_euclid(n as isize) as Seat
}

#[inline]
pub fn next_seat(seat: Seat, n: usize) -> Seat {
    seat_offset(seat, 1, n)
}

/// Round-start seat (player to the left of the dealer).
#[inline]
pub fn round_start_seat(dealer: Seat, n: usize) -> Seat {
    next_seat(dealer, n)
}

pub fn require_phase(state: &GameState, expected: Phase, detail: &str) -> Result<(), DomainError> {
    if state.phase == expected {
        Ok(())
    } else {
        Err(DomainError::validation(ValidationKind::PhaseMismatch, detail))
    }
}

pub fn require_turn(state: &GameState, seat: Seat) -> Result<(), DomainError> {
    match state.turn {
        Some(t) if t == seat => Ok(()),
        Some(t) => Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Not {seat} player's turn but {t} player's turn"),
        )),
        None => Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Not {seat} player's turn; nobody is expected to act"),
        )),
    }
}
