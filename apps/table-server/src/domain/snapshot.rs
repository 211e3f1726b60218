//! Serializable views of the game state with per-requester hand visibility.

use serde::Serialize;

use crate::domain::state::{GameState, Seat};
use crate::domain::Card;

/// Whose private hands a snapshot may reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only this seat's own hand.
    Seat(Seat),
    /// Every hand (viewers, and everyone once the game is over).
    All,
}

impl Visibility {
    fn reveals(self, seat: Seat) -> bool {
        match self {
            Visibility::Seat(s) => s == seat,
            Visibility::All => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrickPlay {
    pub player_id: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeatSnapshot {
    pub player_id: Seat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
    pub card_count: usize,
    pub cards_played: Vec<usize>,
    pub has_bet: bool,
    pub bet: Option<u8>,
    pub tricks: u8,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameSnapshot {
    pub phase: &'static str,
    pub round: u8,
    pub min_round: u8,
    pub max_round: u8,
    pub rounds_increasing: bool,
    pub dealer: Seat,
    pub turn: Option<Seat>,
    pub trick_leader: Seat,
    pub trump: Option<Card>,
    pub trick: Vec<TrickPlay>,
    pub round_points: u32,
    pub trick_points: u32,
    pub players: Vec<SeatSnapshot>,
}

pub fn snapshot(state: &GameState, visibility: Visibility) -> GameSnapshot {
    GameSnapshot {
        phase: state.phase.as_str(),
        round: state.round(),
        min_round: state.settings.min_round,
        max_round: state.settings.max_round,
        rounds_increasing: state.cursor.ascending,
        dealer: state.dealer,
        turn: state.turn,
        trick_leader: state.leader,
        trump: state.trump,
        trick: state
            .trick
            .iter()
            .map(|(player_id, card)| TrickPlay {
                player_id: *player_id,
                card: *card,
            })
            .collect(),
        round_points: state.settings.round_points,
        trick_points: state.settings.trick_points,
        players: state
            .seats
            .iter()
            .enumerate()
            .map(|(seat, s)| SeatSnapshot {
                player_id: seat,
                cards: visibility.reveals(seat).then(|| s.hand.clone()),
                card_count: s.hand.len(),
                cards_played: s.played.clone(),
                has_bet: s.bet.is_some(),
                bet: s.bet,
                tricks: s.tricks,
                score: s.score,
            })
            .collect(),
    }
}
