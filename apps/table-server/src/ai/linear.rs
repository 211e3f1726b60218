//! Linear model: a card's worth is a straight line over its rank.
//!
//! Trumps are worth between `trump_min` and 1; other suits are worthless up
//! to `non_trump_min` and rise to `non_trump_max` at the ace.

use super::config::AiConfig;
use super::trait_def::{tricks_needed_factor, AiError, DecisionModel};
use crate::domain::player_view::CurrentRoundInfo;
use crate::domain::{Card, DeckKind, Rank, Suit};

#[derive(Debug, Clone)]
pub struct Linear {
    trump_min: f64,
    non_trump_min: f64,
    non_trump_max: f64,
}

impl Default for Linear {
    fn default() -> Self {
        Self {
            trump_min: 0.25,
            non_trump_min: 8.0,
            non_trump_max: 0.4,
        }
    }
}

impl Linear {
    pub const NAME: &'static str = "linear";
    pub const VERSION: &'static str = "1.0.0";

    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let d = Self::default();
        let m = Self {
            trump_min: config.f64_or("trump_min", d.trump_min)?,
            non_trump_min: config.f64_or("non_trump_min", d.non_trump_min)?,
            non_trump_max: config.f64_or("non_trump_max", d.non_trump_max)?,
        };
        let ace = f64::from(Rank::Ace.number());
        if m.non_trump_min >= ace {
            return Err(AiError::InvalidConfig(format!(
                "non_trump_min must be below {ace}, got {}",
                m.non_trump_min
            )));
        }
        Ok(m)
    }

    fn card_value(&self, card: Card, trump: Suit, deck: DeckKind) -> f64 {
        let n = f64::from(card.rank.number());
        let ace = f64::from(Rank::Ace.number());
        if card.suit == trump {
            let low = f64::from(deck.lowest_rank().number());
            self.trump_min + (1.0 - self.trump_min) * (n - low) / (ace - low)
        } else if n > self.non_trump_min {
            self.non_trump_max * (n - self.non_trump_min) / (ace - self.non_trump_min)
        } else {
            0.0
        }
    }
}

impl DecisionModel for Linear {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn estimate_bet(&mut self, info: &CurrentRoundInfo) -> Result<f64, AiError> {
        let trump = info
            .trump_suit()
            .ok_or_else(|| AiError::Internal("no trump exposed".into()))?;
        Ok(info
            .hand
            .iter()
            .map(|&card| self.card_value(card, trump, info.deck))
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
        let in_trick = info.trick.len() as f64 / info.seat_count.max(1) as f64;
        legal
            .iter()
            .map(|&i| {
                let card = *info
                    .hand
                    .get(i)
                    .ok_or_else(|| AiError::Internal(format!("hand index {i} out of range")))?;
                let p_win = if !info.beats_current(card) {
                    0.0
                } else if info.players_after_me() == 0 {
                    1.0
                } else {
                    (self.card_value(card, trump, info.deck) + in_trick).min(1.0)
                };
                Ok(1.0 - (need - p_win).abs())
            })
            .collect()
    }
}
