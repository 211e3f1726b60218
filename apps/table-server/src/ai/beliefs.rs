//! Beliefs model: tracks where every unseen card can be.
//!
//! Cards in the seat's own hand, the exposed trump and everything played
//! this round are known. Every other card is unseen and sits either in an
//! opponent's hand or in the undealt stock. An opponent holding `k` unplayed
//! cards owns a given unseen card with probability `k / unseen`, or zero once
//! it has shown itself void in that suit by failing to follow.

use std::collections::HashSet;

use serde_json::Value as JsonValue;
use tracing::debug;

use super::config::AiConfig;
use super::trait_def::{tricks_needed_factor, AiError, DecisionModel};
use crate::domain::player_view::CurrentRoundInfo;
use crate::domain::state::seat_offset;
use crate::domain::{card_beats, Card, Seat, Suit};
use crate::game::fiddlesticks::{DEAL_ROUND, PLAY_CARD};
use crate::session::update::UpdateMessage;

#[derive(Debug, Clone)]
pub struct Beliefs {
    trump_factor: f64,
    non_trump_factor: f64,
    played: HashSet<Card>,
    voids: HashSet<(Seat, Suit)>,
}

impl Default for Beliefs {
    fn default() -> Self {
        Self {
            trump_factor: 1.0,
            non_trump_factor: 1.0,
            played: HashSet::new(),
            voids: HashSet::new(),
        }
    }
}

impl Beliefs {
    pub const NAME: &'static str = "beliefs";
    pub const VERSION: &'static str = "1.0.0";

    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        Ok(Self {
            trump_factor: config.f64_or("trump_factor", 1.0)?,
            non_trump_factor: config.f64_or("non_trump_factor", 1.0)?,
            ..Self::default()
        })
    }

    pub fn is_void(&self, seat: Seat, suit: Suit) -> bool {
        self.voids.contains(&(seat, suit))
    }

    fn record_play(&mut self, content: &JsonValue) -> Option<()> {
        let card: Card = serde_json::from_value(content.get("card")?.clone()).ok()?;
        let seat = usize::try_from(content.get("player_id")?.as_u64()?).ok()?;
        self.played.insert(card);
        if let Some(lead) = content
            .get("lead_suit")
            .and_then(|v| serde_json::from_value::<Suit>(v.clone()).ok())
        {
            if card.suit != lead {
                self.voids.insert((seat, lead));
            }
        }
        Some(())
    }

    fn unseen(&self, info: &CurrentRoundInfo) -> Vec<Card> {
        info.deck
            .cards()
            .into_iter()
            .filter(|c| {
                !info.hand.contains(c)
                    && info.trump != Some(*c)
                    && !self.played.contains(c)
                    && !info.trick.iter().any(|(_, t)| t == c)
            })
            .collect()
    }

    /// Chance that none of `opponents` holds a card beating `card`.
    fn win_probability(
        &self,
        info: &CurrentRoundInfo,
        card: Card,
        trump: Suit,
        opponents: &[Seat],
    ) -> f64 {
        let unseen = self.unseen(info);
        if unseen.is_empty() {
            return 1.0;
        }
        let beaters: Vec<Card> = unseen
            .iter()
            .copied()
            .filter(|&b| card_beats(b, card, trump))
            .collect();
        let total = unseen.len() as f64;
        let p: f64 = opponents
            .iter()
            .map(|&o| {
                let held = info.cards_remaining.get(o).copied().unwrap_or(0) as f64;
                let share = (held / total).clamp(0.0, 1.0);
                let live = beaters.iter().filter(|b| !self.is_void(o, b.suit)).count();
                (1.0 - share).powi(live as i32)
            })
            .product();
        let factor = if card.suit == trump {
            self.trump_factor
        } else {
            self.non_trump_factor
        };
        (p * factor).clamp(0.0, 1.0)
    }
}

impl DecisionModel for Beliefs {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn observe(&mut self, update: &UpdateMessage) {
        match update.kind.as_str() {
            DEAL_ROUND => {
                self.played.clear();
                self.voids.clear();
            }
            PLAY_CARD => {
                if self.record_play(&update.content).is_none() {
                    debug!(update_id = update.update_id, "unreadable play-card update");
                }
            }
            _ => {}
        }
    }

    fn estimate_bet(&mut self, info: &CurrentRoundInfo) -> Result<f64, AiError> {
        let trump = info
            .trump_suit()
            .ok_or_else(|| AiError::Internal("no trump exposed".into()))?;
        let others: Vec<Seat> = (1..info.seat_count)
            .map(|d| seat_offset(info.seat, d as isize, info.seat_count))
            .collect();
        Ok(info
            .hand
            .iter()
            .map(|&card| self.win_probability(info, card, trump, &others))
            .sum())
    }

    fn card_weights(&mut self, info: &CurrentRoundInfo, legal: &[usize]) -> Result<Vec<f64>, AiError> {
        let trump = info
            .trump_suit()
            .ok_or_else(|| AiError::Internal("no trump exposed".into()))?;
        if legal.is_empty() {
            return Err(AiError::NoLegalOptions);
        }
        let need = tricks_needed_factor(info);
        let after: Vec<Seat> = (1..=info.players_after_me())
            .map(|d| seat_offset(info.seat, d as isize, info.seat_count))
            .collect();
        legal
            .iter()
            .map(|&i| {
                let card = *info
                    .hand
                    .get(i)
                    .ok_or_else(|| AiError::Internal(format!("hand index {i} out of range")))?;
                let p_win = if !info.beats_current(card) {
                    0.0
                } else if after.is_empty() {
                    1.0
                } else {
                    self.win_probability(info, card, trump, &after)
                };
                Ok(1.0 - (need - p_win).abs())
            })
            .collect()
    }
}
