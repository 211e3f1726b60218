//! Decision model trait definition.

use std::fmt;

use crate::domain::player_view::CurrentRoundInfo;
use crate::error::AppError;
use crate::session::update::UpdateMessage;

/// Errors that can occur during AI decision-making.
#[derive(Debug, Clone, PartialEq)]
pub enum AiError {
    /// The model has nothing to choose from
    NoLegalOptions,
    /// The model's internal bookkeeping is inconsistent
    Internal(String),
    /// The model was configured with an unusable value
    InvalidConfig(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::NoLegalOptions => write!(f, "AI has no legal options"),
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidConfig(msg) => write!(f, "AI invalid config: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::internal(format!("AI error: {err}"))
    }
}

/// A pluggable policy that turns a seat's view into weights over its legal
/// options. The driver does the random selection and the submission.
///
/// Weights are non-negative and need not sum to one. A model that returns
/// all zeros gets a uniform choice.
pub trait DecisionModel: Send {
    fn name(&self) -> &'static str;

    /// Called for every update delivered to the seat, in id order.
    fn observe(&mut self, _update: &UpdateMessage) {}

    /// Expected number of tricks this hand takes.
    fn estimate_bet(&mut self, info: &CurrentRoundInfo) -> Result<f64, AiError>;

    /// One weight per entry of `info.legal_bids()`.
    ///
    /// The default splits the fractional estimate between the two nearest
    /// bets, so an estimate of 2.3 yields 2 with weight 0.7 and 3 with 0.3.
    fn bet_weights(&mut self, info: &CurrentRoundInfo) -> Result<Vec<f64>, AiError> {
        let estimate = self.estimate_bet(info)?;
        Ok(split_estimate(estimate, info.legal_bids()))
    }

    /// One weight per entry of `legal` (hand indices).
    fn card_weights(&mut self, info: &CurrentRoundInfo, legal: &[usize]) -> Result<Vec<f64>, AiError>;
}

pub(crate) fn split_estimate(estimate: f64, bids: &[u8]) -> Vec<f64> {
    let Some(&top) = bids.iter().max() else {
        return Vec::new();
    };
    let estimate = if estimate.is_finite() {
        estimate.clamp(0.0, f64::from(top))
    } else {
        0.0
    };
    let low = estimate.floor();
    let frac = estimate - low;
    bids.iter()
        .map(|&b| {
            let b = f64::from(b);
            if b == low {
                1.0 - frac
            } else if b == low + 1.0 {
                frac
            } else {
                0.0
            }
        })
        .collect()
}

/// Share of remaining tricks the seat still wants, clamped to `[0, 1]`.
pub(crate) fn tricks_needed_factor(info: &CurrentRoundInfo) -> f64 {
    let left = info.cards_left();
    if left == 0 {
        return 0.0;
    }
    (f64::from(info.tricks_needed()) / left as f64).clamp(0.0, 1.0)
}
