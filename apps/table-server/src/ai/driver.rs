//! Per-seat AI task.
//!
//! Each AI seat runs on its own tokio task. It wakes on a delivered update,
//! a failure notice or a turn change, checks whether its seat is due to act
//! and, if so, asks its model for weights and submits a weighted-random pick
//! through the same [`SessionHandle::submit`] path humans use. The task ends
//! when the session's termination signal fires.

use rand_chacha::ChaCha8Rng;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::select::pick_weighted;
use super::trait_def::{AiError, DecisionModel};
use super::uniform::Uniform;
use crate::domain::player_view::CurrentRoundInfo;
use crate::domain::{Phase, Seat};
use crate::game::fiddlesticks::{BET, PLAY_CARD};
use crate::session::action::{ActionOutcome, ParticipantId, PlayerAction};
use crate::session::update::{FailureNotice, SharedUpdate};
use crate::session::SessionHandle;

pub struct AiDriver {
    seat: Seat,
    actor: ParticipantId,
    model: Box<dyn DecisionModel>,
    rng: ChaCha8Rng,
    updates: mpsc::Receiver<SharedUpdate>,
    failures: mpsc::Receiver<FailureNotice>,
}

impl AiDriver {
    pub fn new(
        seat: Seat,
        actor: ParticipantId,
        model: Box<dyn DecisionModel>,
        rng: ChaCha8Rng,
        updates: mpsc::Receiver<SharedUpdate>,
        failures: mpsc::Receiver<FailureNotice>,
    ) -> Self {
        Self {
            seat,
            actor,
            model,
            rng,
            updates,
            failures,
        }
    }

    pub fn spawn(self, handle: SessionHandle) -> JoinHandle<()> {
        tokio::spawn(self.run(handle))
    }

    async fn run(mut self, handle: SessionHandle) {
        let token = handle.termination().token();
        let mut turns = handle.turns();
        info!(session_id = handle.id(), seat = self.seat, model = self.model.name(), "AI driver started");

        // The game may have started before this task was first polled.
        self.maybe_act(&handle).await;

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                update = self.updates.recv() => match update {
                    Some(update) => {
                        self.model.observe(&update);
                        self.maybe_act(&handle).await;
                    }
                    None => break,
                },
                notice = self.failures.recv() => match notice {
                    Some(notice) => {
                        warn!(session_id = handle.id(), seat = self.seat, kind = %notice.kind, message = %notice.message, "AI action rejected");
                        self.maybe_act(&handle).await;
                    }
                    None => break,
                },
                changed = turns.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.maybe_act(&handle).await;
                }
            }
        }
        info!(session_id = handle.id(), seat = self.seat, "AI driver stopped");
    }

    async fn maybe_act(&mut self, handle: &SessionHandle) {
        // Catch up on anything queued so the model sees every play first.
        while let Ok(update) = self.updates.try_recv() {
            self.model.observe(&update);
        }
        let Some(info) = handle.round_info(self.seat).await else {
            return;
        };
        if !info.is_my_turn() {
            return;
        }

        let action = match self.decide(&info) {
            Ok(action) => action,
            Err(e) => {
                warn!(seat = self.seat, model = self.model.name(), error = %e, "model failed; choosing uniformly");
                match decide_with(&mut Uniform, &info, self.actor, &mut self.rng) {
                    Ok(action) => action,
                    Err(e) => {
                        warn!(seat = self.seat, error = %e, "no action available");
                        return;
                    }
                }
            }
        };
        debug!(seat = self.seat, kind = %action.kind, payload = %action.payload, "AI submitting");
        if let ActionOutcome::Rejected { reason, .. } = handle.submit(action).await {
            debug!(seat = self.seat, %reason, "AI submission rejected");
        }
    }

    fn decide(&mut self, info: &CurrentRoundInfo) -> Result<PlayerAction, AiError> {
        decide_with(self.model.as_mut(), info, self.actor, &mut self.rng)
    }
}

fn decide_with(
    model: &mut dyn DecisionModel,
    info: &CurrentRoundInfo,
    actor: ParticipantId,
    rng: &mut ChaCha8Rng,
) -> Result<PlayerAction, AiError> {
    match info.phase {
        Phase::Betting => {
            let bids = info.legal_bids();
            let weights = model.bet_weights(info)?;
            let i = pick(rng, &weights, bids.len())?;
            Ok(PlayerAction::new(actor, BET, json!({ "amount": bids[i] })))
        }
        Phase::TrickPlay => {
            let legal = info.legal_plays();
            let weights = model.card_weights(info, legal)?;
            let i = pick(rng, &weights, legal.len())?;
            Ok(PlayerAction::new(actor, PLAY_CARD, json!({ "index": legal[i] })))
        }
        _ => Err(AiError::NoLegalOptions),
    }
}

fn pick(rng: &mut ChaCha8Rng, weights: &[f64], options: usize) -> Result<usize, AiError> {
    if weights.len() != options {
        return Err(AiError::Internal(format!(
            "{} weights for {options} options",
            weights.len()
        )));
    }
    pick_weighted(rng, weights).ok_or(AiError::NoLegalOptions)
}
