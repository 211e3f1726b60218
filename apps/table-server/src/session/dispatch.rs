//! Single-writer action pipeline.
//!
//! Every mutation of a session goes through one [`SessionHandle`] method that
//! holds the session lock for its whole duration, so actions from any number
//! of concurrent submitters are applied one at a time, in lock order.

use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Value as JsonValue;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::domain::player_view::CurrentRoundInfo;
use crate::domain::Seat;
use crate::errors::domain::DomainError;
use crate::game::fiddlesticks::GameResults;
use crate::game::TableGame;
use crate::session::action::{ActionOutcome, ParticipantId, PlayerAction};
use crate::session::lifecycle::TerminationSignal;
use crate::session::participant::Member;
use crate::session::session::{Session, TurnMarker};

pub const ALL_DISCONNECTED: &str = "All participants disconnected";

#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: u64,
    inner: Arc<Mutex<Session>>,
    termination: TerminationSignal,
    turns: watch::Receiver<TurnMarker>,
}

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        let id = session.id();
        let termination = session.termination();
        let turns = session.subscribe_turns();
        Self {
            id,
            inner: Arc::new(Mutex::new(session)),
            termination,
            turns,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn termination(&self) -> TerminationSignal {
        self.termination.clone()
    }

    /// A fresh receiver for turn changes.
    pub fn turns(&self) -> watch::Receiver<TurnMarker> {
        self.turns.clone()
    }

    /// Run `f` against the locked session.
    pub async fn inspect<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        let session = self.inner.lock().await;
        f(&session)
    }

    /// Submit an action. Rejections reach the acting player as a failure
    /// notice; the returned outcome mirrors what happened.
    pub async fn submit(&self, action: PlayerAction) -> ActionOutcome {
        let mut session = self.inner.lock().await;
        dispatch(&mut session, action).await
    }

    /// Connect `id`; starts the game once every human seat is connected.
    pub async fn connect(&self, id: ParticipantId) -> Result<bool, DomainError> {
        let mut session = self.inner.lock().await;
        let ready = session.connect(id)?;
        if ready {
            session.start().await?;
        }
        Ok(ready)
    }

    /// Disconnect `id`; ends a live game once nobody is left connected.
    pub async fn disconnect(&self, id: ParticipantId) -> Result<bool, DomainError> {
        let mut session = self.inner.lock().await;
        let empty = session.disconnect(id)?;
        if empty && session.is_started() && !session.is_ended() {
            session.end(ALL_DISCONNECTED.to_string())?;
        }
        Ok(empty)
    }

    pub async fn start(&self) -> Result<(), DomainError> {
        self.inner.lock().await.start().await
    }

    pub async fn end(&self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.inner.lock().await.end(reason.into())
    }

    pub async fn resend(&self, id: ParticipantId, update_id: u64) -> Result<bool, DomainError> {
        self.inner.lock().await.resend(id, update_id).await
    }

    pub async fn resend_last(&self, id: ParticipantId) -> Result<bool, DomainError> {
        self.inner.lock().await.resend_last(id).await
    }

    pub async fn render_state_for(&self, id: ParticipantId) -> Result<JsonValue, DomainError> {
        self.inner.lock().await.render_state_for(id)
    }

    pub async fn round_info(&self, seat: Seat) -> Option<CurrentRoundInfo> {
        self.inner.lock().await.round_info(seat)
    }

    pub async fn results(&self) -> Option<GameResults> {
        let session = self.inner.lock().await;
        session.game().as_fiddlesticks().map(|g| g.results())
    }

    /// Play a uniformly random legal action for `seat`, provided the turn
    /// marker still reads `expected`. Returns `None` when the turn moved on.
    pub async fn auto_play<R: Rng + ?Sized>(
        &self,
        seat: Seat,
        expected: TurnMarker,
        rng: &mut R,
    ) -> Option<ActionOutcome> {
        let mut session = self.inner.lock().await;
        if session.is_ended() || session.turn_marker() != expected || expected.seat != Some(seat) {
            return None;
        }
        let actor = session.registry().player(seat)?.id;
        let choice = *session.game().legal_actions(seat).choose(rng)?;
        info!(session_id = session.id(), seat, action = choice.kind(), "turn timed out; auto-playing");
        let action = PlayerAction::new(actor, choice.kind(), choice.payload());
        Some(dispatch(&mut session, action).await)
    }
}

async fn dispatch(session: &mut Session, action: PlayerAction) -> ActionOutcome {
    let action_id = session.log_action(&action);
    let seat = match session.registry().lookup(action.actor) {
        Some(Member::Player(seat)) => seat,
        Some(Member::Viewer(_)) => {
            warn!(session_id = session.id(), actor = %action.actor, kind = %action.kind, "viewer attempted an action");
            return ActionOutcome::Rejected {
                action_id,
                reason: "Viewers cannot act".to_string(),
            };
        }
        None => {
            warn!(session_id = session.id(), actor = %action.actor, kind = %action.kind, "action from unknown participant");
            return ActionOutcome::Rejected {
                action_id,
                reason: format!("Unknown participant {}", action.actor),
            };
        }
    };

    match session.process(seat, &action).await {
        Ok(()) => {
            debug!(session_id = session.id(), action_id, seat, kind = %action.kind, "action applied");
            session.publish_turn();
            ActionOutcome::Applied { action_id }
        }
        Err(e) => {
            if matches!(e, DomainError::Infra(..)) {
                session.publish_turn();
            }
            let reason = e.detail().to_string();
            session
                .deliver_failure(seat, &action.failure_kind(), &reason)
                .await;
            ActionOutcome::Rejected { action_id, reason }
        }
    }
}
