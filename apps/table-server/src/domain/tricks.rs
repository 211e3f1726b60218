use crate::domain::cards_logic::winning_index;
use crate::domain::state::{require_phase, require_turn, seat_offset, GameState, Phase, Seat};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// A completed trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickWon {
    pub winner: Seat,
    pub card: Card,
    /// Winner's trick count for the round after this trick.
    pub tricks: u8,
}

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPlayed {
    pub seat: Seat,
    pub index: usize,
    pub card: Card,
    pub lead_suit: Suit,
    /// Set when this card completed the trick.
    pub trick: Option<TrickWon>,
    /// Every seat has played out its hand.
    pub round_complete: bool,
}

/// Hand indices `seat` may legally play, independent of turn enforcement.
pub fn legal_card_indices(state: &GameState, seat: Seat) -> Vec<usize> {
    if state.phase != Phase::TrickPlay {
        return Vec::new();
    }
    let Some(hand) = state.seats.get(seat) else {
        return Vec::new();
    };
    if let Some(lead) = state.lead_suit() {
        let following: Vec<usize> = hand
            .remaining()
            .filter(|(_, c)| c.suit == lead)
            .map(|(i, _)| i)
            .collect();
        if !following.is_empty() {
            return following;
        }
    }
    hand.remaining().map(|(i, _)| i).collect()
}

/// Current winner of the trick in progress.
pub fn resolve_current_trick(state: &GameState) -> Option<(Seat, Card)> {
    let trump = state.trump_suit()?;
    let cards: Vec<Card> = state.trick.iter().map(|(_, c)| *c).collect();
    let idx = winning_index(&cards, trump)?;
    state.trick.get(idx).copied()
}

/// Play the card at `index` of `seat`'s dealt hand.
pub fn play_card(state: &mut GameState, seat: Seat, index: i64) -> Result<CardPlayed, DomainError> {
    let detail = match state.phase {
        Phase::Betting => "Betting not playing cards",
        _ => "No trick is in progress",
    };
    require_phase(state, Phase::TrickPlay, detail)?;
    require_turn(state, seat)?;

    let hand = &state.seats[seat];
    if index >= 0 && hand.is_played(index as usize) {
        return Err(DomainError::validation(
            ValidationKind::CardAlreadyPlayed,
            format!("Card with index {index} already played"),
        ));
    }
    if index < 0 || index as usize >= hand.hand.len() {
        return Err(DomainError::validation(
            ValidationKind::InvalidCardIndex,
            format!(
                "Invalid card index {index} for having {} cards",
                hand.hand.len()
            ),
        ));
    }
    let index = index as usize;
    let card = hand.hand[index];

    let legal = legal_card_indices(state, seat);
    if !legal.contains(&index) {
        let lead = state
            .lead_suit()
            .map(|s| s.name())
            .unwrap_or("(none)");
        return Err(DomainError::validation(
            ValidationKind::MustFollowSuit,
            format!(
                "Must follow suit of lead card {lead} but tried to play {card}; legal indices: {legal:?}"
            ),
        ));
    }

    state.trick.push((seat, card));
    state.seats[seat].played.push(index);
    let lead_suit = state.lead_suit().unwrap_or(card.suit);
    let n = state.seat_count();
    state.turn = Some(seat_offset(seat, 1, n));

    let mut trick = None;
    let mut round_complete = false;
    if state.trick.len() == n {
        let (winner, winning_card) = resolve_current_trick(state).ok_or_else(|| {
            DomainError::validation_other("complete trick without a trump card")
        })?;
        state.seats[winner].tricks += 1;
        state.leader = winner;
        state.turn = Some(winner);
        state.trick.clear();
        trick = Some(TrickWon {
            winner,
            card: winning_card,
            tricks: state.seats[winner].tricks,
        });
        round_complete = state.seats.iter().all(|s| s.cards_left() == 0);
    }

    Ok(CardPlayed {
        seat,
        index,
        card,
        lead_suit,
        trick,
        round_complete,
    })
}
