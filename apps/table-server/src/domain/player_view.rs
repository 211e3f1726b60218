//! Player view of game state - what information is visible to one seat.
//!
//! [`CurrentRoundInfo`] is everything a seat can see at its decision point,
//! including its legal options. The AI driver builds one for every decision.

use crate::domain::bidding::legal_bets;
use crate::domain::cards_logic::card_beats;
use crate::domain::state::{GameState, Phase, Seat};
use crate::domain::tricks::{legal_card_indices, resolve_current_trick};
use crate::domain::{Card, DeckKind, Suit};

/// Information visible to a seat at a decision point for the current round.
///
/// This is the interface between the game engine and decision models.
///
/// ## Helper Methods
///
/// Use these instead of re-implementing rules:
///
/// - [`legal_bids()`](Self::legal_bids) - bets the seat may place right now
/// - [`legal_plays()`](Self::legal_plays) - hand indices it may play (follow-suit applied)
/// - [`winning_card()`](Self::winning_card) - card currently taking the trick
#[derive(Debug, Clone)]
pub struct CurrentRoundInfo {
    /// Your seat.
    pub seat: Seat,

    /// Number of seats at the table.
    pub seat_count: usize,

    pub phase: Phase,

    /// Cards dealt to each seat this round.
    pub round: u8,

    pub dealer: Seat,

    /// Seat expected to act.
    pub turn: Option<Seat>,

    /// Exposed trump card; its suit is trump.
    pub trump: Option<Card>,

    /// Your hand as dealt. Played cards stay in place; see
    /// [`played`](Self::played).
    pub hand: Vec<Card>,

    /// Hand indices you already played this round.
    pub played: Vec<usize>,

    /// Bets so far, indexed by seat.
    pub bets: Vec<Option<u8>>,

    /// Tricks won this round, indexed by seat.
    pub tricks: Vec<u8>,

    /// Cumulative scores, indexed by seat.
    pub scores: Vec<u32>,

    /// Plays in the trick in progress, in order.
    pub trick: Vec<(Seat, Card)>,

    /// Seat that led the trick in progress.
    pub leader: Seat,

    /// Deck the round was dealt from.
    pub deck: DeckKind,

    /// Unplayed card count, indexed by seat.
    pub cards_remaining: Vec<usize>,

    legal_bids: Vec<u8>,
    legal_plays: Vec<usize>,
    winning: Option<(Seat, Card)>,
}

impl CurrentRoundInfo {
    pub fn for_seat(state: &GameState, seat: Seat) -> Self {
        let own = state.seats.get(seat);
        Self {
            seat,
            seat_count: state.seat_count(),
            phase: state.phase,
            round: state.round(),
            dealer: state.dealer,
            turn: state.turn,
            trump: state.trump,
            hand: own.map(|s| s.hand.clone()).unwrap_or_default(),
            played: own.map(|s| s.played.clone()).unwrap_or_default(),
            bets: state.seats.iter().map(|s| s.bet).collect(),
            tricks: state.seats.iter().map(|s| s.tricks).collect(),
            scores: state.seats.iter().map(|s| s.score).collect(),
            trick: state.trick.clone(),
            leader: state.leader,
            deck: state.deck.kind(),
            cards_remaining: state.seats.iter().map(|s| s.cards_left()).collect(),
            legal_bids: legal_bets(state, seat),
            legal_plays: legal_card_indices(state, seat),
            winning: resolve_current_trick(state),
        }
    }

    pub fn is_my_turn(&self) -> bool {
        self.turn == Some(self.seat)
    }

    pub fn legal_bids(&self) -> &[u8] {
        &self.legal_bids
    }

    pub fn legal_plays(&self) -> &[usize] {
        &self.legal_plays
    }

    pub fn trump_suit(&self) -> Option<Suit> {
        self.trump.map(|c| c.suit)
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.trick.first().map(|(_, c)| c.suit)
    }

    pub fn winning_card(&self) -> Option<Card> {
        self.winning.map(|(_, c)| c)
    }

    /// Whether `card` would take the trick from the card currently winning it.
    pub fn beats_current(&self, card: Card) -> bool {
        match (self.winning_card(), self.trump_suit()) {
            (None, _) => true,
            (Some(w), Some(trump)) => card_beats(card, w, trump),
            (Some(_), None) => false,
        }
    }

    /// Seats still to play after you in this trick.
    pub fn players_after_me(&self) -> usize {
        self.seat_count.saturating_sub(self.trick.len() + 1)
    }

    pub fn cards_left(&self) -> usize {
        self.hand.len() - self.played.len()
    }

    /// Tricks still needed to make your bet; negative once over.
    pub fn tricks_needed(&self) -> i32 {
        let bet = self.bets.get(self.seat).copied().flatten().unwrap_or(0) as i32;
        let won = self.tricks.get(self.seat).copied().unwrap_or(0) as i32;
        bet - won
    }
}
