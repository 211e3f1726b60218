//! Uniform model: every legal option is equally likely.
//!
//! Baseline for harness comparisons and the fallback when a configured
//! model name is unknown.

use super::config::AiConfig;
use super::trait_def::{AiError, DecisionModel};
use crate::domain::player_view::CurrentRoundInfo;

#[derive(Debug, Default, Clone)]
pub struct Uniform;

impl Uniform {
    pub const NAME: &'static str = "uniform";
    pub const VERSION: &'static str = "1.0.0";

    pub fn from_config(_config: &AiConfig) -> Result<Self, AiError> {
        Ok(Self)
    }
}

impl DecisionModel for Uniform {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn estimate_bet(&mut self, info: &CurrentRoundInfo) -> Result<f64, AiError> {
        Ok(f64::from(info.round) / 2.0)
    }

    fn bet_weights(&mut self, info: &CurrentRoundInfo) -> Result<Vec<f64>, AiError> {
        if info.legal_bids().is_empty() {
            return Err(AiError::NoLegalOptions);
        }
        Ok(vec![1.0; info.legal_bids().len()])
    }

    fn card_weights(&mut self, _info: &CurrentRoundInfo, legal: &[usize]) -> Result<Vec<f64>, AiError> {
        if legal.is_empty() {
            return Err(AiError::NoLegalOptions);
        }
        Ok(vec![1.0; legal.len()])
    }
}
