//! Outrank model: scores each card alone by how many unseen cards can beat it.
//!
//! Hands as a whole and future tricks are ignored. The probability that a
//! card survives `k` opponents is `(1 - beaters / unseen)^k`; the weight of
//! a play compares that probability with how badly the seat still wants
//! tricks, bent by an aggression curve.

use super::config::AiConfig;
use super::trait_def::{tricks_needed_factor, AiError, DecisionModel};
use crate::domain::player_view::CurrentRoundInfo;
use crate::domain::{Card, DeckKind, Rank, Suit};

pub const DEFAULT_AGGRESSION: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct Outrank {
    /// 1 is linear, higher is safer, lower is more aggressive. Sensible
    /// values lie roughly in `[0.2, 5]`.
    aggression: f64,
}

impl Outrank {
    pub const NAME: &'static str = "outrank";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(aggression: f64) -> Result<Self, AiError> {
        if !(aggression.is_finite() && aggression > 0.0) {
            return Err(AiError::InvalidConfig(format!(
                "aggression must be positive, got {aggression}"
            )));
        }
        Ok(Self { aggression })
    }

    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        Self::new(config.f64_or("aggression", DEFAULT_AGGRESSION)?)
    }

    /// Maps `[0, 1]` onto `[0, 1]` keeping both ends; the identity when
    /// aggression is 1.
    fn curve(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 {
            return 0.0;
        }
        2.0 / (1.0 + (2.0 / x - 1.0).powf(self.aggression))
    }

    fn weight(&self, need: f64, p_win: f64) -> f64 {
        self.curve(1.0 - (self.curve(need) - p_win).abs())
    }
}

/// Chance `card` is not beaten by any of `opponents` random hands.
pub(crate) fn outrank_probability(card: Card, trump: Suit, opponents: usize, deck: DeckKind) -> f64 {
    let higher_in_suit = usize::from(Rank::Ace.number() - card.rank.number());
    let mut beaters = higher_in_suit;
    if card.suit != trump {
        // every trump except the exposed one
        beaters += deck.ranks_per_suit() - 1;
    }
    // less this card and the exposed trump
    let unseen = deck.size().saturating_sub(2).max(1);
    let survive = 1.0 - beaters as f64 / unseen as f64;
    survive.clamp(0.0, 1.0).powi(opponents as i32)
}

impl DecisionModel for Outrank {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn estimate_bet(&mut self, info: &CurrentRoundInfo) -> Result<f64, AiError> {
        let trump = info
            .trump_suit()
            .ok_or_else(|| AiError::Internal("no trump exposed".into()))?;
        let opponents = info.seat_count.saturating_sub(1);
        Ok(info
            .hand
            .iter()
            .map(|&card| outrank_probability(card, trump, opponents, info.deck))
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
        let after = info.players_after_me();
        legal
            .iter()
            .map(|&i| {
                let card = *info
                    .hand
                    .get(i)
                    .ok_or_else(|| AiError::Internal(format!("hand index {i} out of range")))?;
                let p_win = if !info.beats_current(card) {
                    0.0
                } else if after == 0 {
                    1.0
                } else {
                    outrank_probability(card, trump, after, info.deck)
                };
                Ok(self.weight(need, p_win))
            })
            .collect()
    }
}
