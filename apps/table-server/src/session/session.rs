//! The session: registry, update logs, lifecycle and the hosted game.
//!
//! A `Session` is only ever touched through [`SessionHandle`](super::SessionHandle),
//! which serializes every operation behind one async mutex.

use serde_json::{json, Value as JsonValue};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::domain::player_view::CurrentRoundInfo;
use crate::domain::snapshot::Visibility;
use crate::domain::Seat;
use crate::errors::domain::{DomainError, InfraErrorKind, LifecycleKind, ValidationKind};
use crate::game::{GameAction, GameKind, Outbound, TableGame};
use crate::session::action::{ActionRecord, ParticipantId, PlayerAction};
use crate::session::lifecycle::TerminationSignal;
use crate::session::participant::{Member, Registry};
use crate::session::update::{FailureNotice, UpdateLog, UpdateMessage};

/// Who is expected to act, bumped on every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnMarker {
    pub seq: u64,
    pub seat: Option<Seat>,
}

#[derive(Debug)]
pub struct Session {
    id: u64,
    registry: Registry,
    viewer_log: UpdateLog,
    actions: Vec<ActionRecord>,
    game: GameKind,
    started: bool,
    ended: bool,
    termination: TerminationSignal,
    turns: watch::Sender<TurnMarker>,
}

impl Session {
    pub fn new(id: u64, registry: Registry, game: GameKind) -> Self {
        let (turns, _) = watch::channel(TurnMarker::default());
        Self {
            id,
            registry,
            viewer_log: UpdateLog::default(),
            actions: Vec::new(),
            game,
            started: false,
            ended: false,
            termination: TerminationSignal::new(),
            turns,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn game(&self) -> &GameKind {
        &self.game
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn viewer_log(&self) -> &UpdateLog {
        &self.viewer_log
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn termination(&self) -> TerminationSignal {
        self.termination.clone()
    }

    pub fn subscribe_turns(&self) -> watch::Receiver<TurnMarker> {
        self.turns.subscribe()
    }

    pub fn turn_marker(&self) -> TurnMarker {
        *self.turns.borrow()
    }

    fn require_live(&self) -> Result<(), DomainError> {
        if !self.started {
            return Err(DomainError::lifecycle(
                LifecycleKind::NotStarted,
                "Game not started",
            ));
        }
        if self.ended {
            return Err(DomainError::lifecycle(
                LifecycleKind::AlreadyEnded,
                "Game already ended",
            ));
        }
        Ok(())
    }

    /// Append to `seat`'s log and push it if the player is connected.
    pub async fn deliver_to_seat(
        &mut self,
        seat: Seat,
        kind: &str,
        content: JsonValue,
    ) -> Result<u64, DomainError> {
        if let Err(e) = self.require_live() {
            warn!(session_id = self.id, seat, kind, error = %e, "update rejected outside live game");
            return Err(e);
        }
        let slot = self.registry.player_mut(seat).ok_or_else(|| {
            DomainError::validation(ValidationKind::UnknownParticipant, format!("No seat {seat}"))
        })?;
        let update = slot.log.append(kind, content);
        if slot.connected {
            slot.updates.push(update.clone()).await;
        }
        debug!(session_id = self.id, seat, update_id = update.update_id, kind, "update delivered");
        Ok(update.update_id)
    }

    /// Append to the shared viewer log and push to every connected viewer.
    pub async fn deliver_to_viewers(
        &mut self,
        kind: &str,
        content: JsonValue,
    ) -> Result<u64, DomainError> {
        if let Err(e) = self.require_live() {
            warn!(session_id = self.id, kind, error = %e, "viewer update rejected outside live game");
            return Err(e);
        }
        let update = self.viewer_log.append(kind, content);
        for viewer in self.registry.viewers().iter().filter(|v| v.connected) {
            viewer.updates.push(update.clone()).await;
        }
        Ok(update.update_id)
    }

    pub async fn broadcast(&mut self, kind: &str, content: JsonValue) -> Result<(), DomainError> {
        for seat in 0..self.registry.players().len() {
            self.deliver_to_seat(seat, kind, content.clone()).await?;
        }
        self.deliver_to_viewers(kind, content).await?;
        Ok(())
    }

    /// Tell one player its action was rejected.
    pub async fn deliver_failure(&self, seat: Seat, kind: &str, message: &str) {
        let Some(slot) = self.registry.player(seat) else {
            return;
        };
        debug!(session_id = self.id, seat, kind, message, "action rejected");
        let notice = FailureNotice {
            kind: kind.to_string(),
            message: message.to_string(),
            player_id: seat,
        };
        if slot.connected {
            slot.failures.push(notice).await;
        }
    }

    /// Re-push logged update `update_id`. Returns `false` when out of range.
    pub async fn resend(&self, id: ParticipantId, update_id: u64) -> Result<bool, DomainError> {
        match self.member(id)? {
            Member::Player(seat) => {
                let Some(slot) = self.registry.player(seat) else {
                    return Ok(false);
                };
                match slot.log.get(update_id) {
                    Some(update) => {
                        slot.updates.push(update.clone()).await;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            Member::Viewer(index) => {
                let (Some(viewer), Some(update)) =
                    (self.registry.viewer(index), self.viewer_log.get(update_id))
                else {
                    return Ok(false);
                };
                viewer.updates.push(update.clone()).await;
                Ok(true)
            }
        }
    }

    /// Re-push the newest update for `id`. A player with an empty log gets
    /// the newest viewer update instead.
    pub async fn resend_last(&self, id: ParticipantId) -> Result<bool, DomainError> {
        match self.member(id)? {
            Member::Player(seat) => {
                let Some(slot) = self.registry.player(seat) else {
                    return Ok(false);
                };
                match slot.log.last().or_else(|| self.viewer_log.last()) {
                    Some(update) => {
                        slot.updates.push(update.clone()).await;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            Member::Viewer(index) => {
                let (Some(viewer), Some(update)) =
                    (self.registry.viewer(index), self.viewer_log.last())
                else {
                    return Ok(false);
                };
                viewer.updates.push(update.clone()).await;
                Ok(true)
            }
        }
    }

    fn member(&self, id: ParticipantId) -> Result<Member, DomainError> {
        self.registry.lookup(id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::UnknownParticipant,
                format!("Unknown participant {id}"),
            )
        })
    }

    /// Mark `id` connected. Returns `true` when every human seat is now
    /// connected and the game has not started yet.
    pub fn connect(&mut self, id: ParticipantId) -> Result<bool, DomainError> {
        self.member(id)?;
        self.registry.set_connected(id, true);
        info!(session_id = self.id, participant = %id, "participant connected");
        Ok(!self.started && self.registry.all_humans_connected())
    }

    /// Mark `id` disconnected. Returns `true` when no live connection remains.
    pub fn disconnect(&mut self, id: ParticipantId) -> Result<bool, DomainError> {
        self.member(id)?;
        self.registry.set_connected(id, false);
        info!(session_id = self.id, participant = %id, "participant disconnected");
        Ok(self.registry.live_connections() == 0)
    }

    pub async fn start(&mut self) -> Result<(), DomainError> {
        if self.started {
            warn!(session_id = self.id, "start requested but game already started");
            return Err(DomainError::lifecycle(
                LifecycleKind::AlreadyStarted,
                "Game already started",
            ));
        }
        self.started = true;
        info!(session_id = self.id, game = self.game.name(), seats = self.registry.players().len(), "game started");
        let out = self.game.start()?;
        self.apply_outbound(out).await?;
        self.publish_turn();
        Ok(())
    }

    pub fn end(&mut self, reason: String) -> Result<(), DomainError> {
        if self.ended {
            warn!(session_id = self.id, %reason, "end requested but game already ended");
            return Err(DomainError::lifecycle(
                LifecycleKind::AlreadyEnded,
                "Game already ended",
            ));
        }
        if !self.started {
            warn!(session_id = self.id, %reason, "end requested before game started");
            return Err(DomainError::lifecycle(
                LifecycleKind::NotStarted,
                "Game not started",
            ));
        }
        self.ended = true;
        info!(session_id = self.id, %reason, "game ended");
        self.termination.fire(reason);
        self.publish_turn();
        Ok(())
    }

    async fn apply_outbound(&mut self, out: Vec<Outbound>) -> Result<(), DomainError> {
        for item in out {
            match item {
                Outbound::Broadcast { kind, content } => self.broadcast(kind, content).await?,
                Outbound::ToSeat {
                    seat,
                    kind,
                    content,
                } => {
                    self.deliver_to_seat(seat, kind, content).await?;
                }
                Outbound::ToViewers { kind, content } => {
                    self.deliver_to_viewers(kind, content).await?;
                }
                Outbound::Finished { reason } => self.end(reason)?,
            }
        }
        Ok(())
    }

    pub(crate) fn publish_turn(&self) {
        let seat = if self.ended { None } else { self.game.turn() };
        self.turns.send_modify(|m| {
            m.seq += 1;
            m.seat = seat;
        });
    }

    pub(crate) fn log_action(&mut self, action: &PlayerAction) -> u64 {
        let action_id = self.actions.len() as u64 + 1;
        self.actions.push(ActionRecord {
            action_id,
            action: action.clone(),
        });
        action_id
    }

    /// Validate and apply an action for `seat`.
    ///
    /// Validation and lifecycle errors leave the game untouched. An
    /// `UndeliveredUpdates` error means the action was applied but some of
    /// its updates never reached a log.
    pub(crate) async fn process(&mut self, seat: Seat, action: &PlayerAction) -> Result<(), DomainError> {
        if self.require_live().is_err() {
            return Err(DomainError::lifecycle(
                if self.started {
                    LifecycleKind::AlreadyEnded
                } else {
                    LifecycleKind::NotStarted
                },
                "Game not in progress",
            ));
        }
        let parsed = GameAction::parse(&action.kind, &action.payload)?;
        match self.game.turn() {
            Some(t) if t == seat => {}
            Some(t) => {
                return Err(DomainError::validation(
                    ValidationKind::OutOfTurn,
                    format!("Not {seat} player's turn but {t} player's turn"),
                ))
            }
            None => {
                return Err(DomainError::validation(
                    ValidationKind::OutOfTurn,
                    format!("Not {seat} player's turn"),
                ))
            }
        }
        let out = self.game.apply_action(seat, parsed)?;
        self.apply_outbound(out).await.map_err(|e| {
            error!(session_id = self.id, seat, error = %e, "failed to deliver updates for applied action");
            DomainError::infra(
                InfraErrorKind::UndeliveredUpdates,
                format!("Action applied but updates were not delivered: {}", e.detail()),
            )
        })
    }

    pub fn render_state_for(&self, id: ParticipantId) -> Result<JsonValue, DomainError> {
        let member = self.member(id)?;
        let visibility = match member {
            _ if self.ended => Visibility::All,
            Member::Player(seat) => Visibility::Seat(seat),
            Member::Viewer(_) => Visibility::All,
        };
        let (players, viewers) = self.registry.roster();
        let mut view = json!({
            "session_id": self.id,
            "game_kind": self.game.name(),
            "started": self.started,
            "ended": self.ended,
            "players": players,
            "viewers": viewers,
            "game": self.game.render_state_for(visibility),
        });
        match member {
            Member::Player(seat) => {
                let received = self.registry.player(seat).map(|p| p.log.len()).unwrap_or(0);
                view["player_id"] = json!(seat);
                view["updates_received"] = json!(received);
            }
            Member::Viewer(_) => {
                view["updates_received"] = json!(self.viewer_log.len());
                view["action_log"] = json!(self.actions);
                let updates: Vec<&UpdateMessage> =
                    self.viewer_log.entries().iter().map(|u| u.as_ref()).collect();
                view["viewer_updates"] = json!(updates);
            }
        }
        Ok(view)
    }

    /// Decision-point view for an AI or auto-play; `None` outside a live game.
    pub fn round_info(&self, seat: Seat) -> Option<CurrentRoundInfo> {
        if !self.started || self.ended {
            return None;
        }
        self.game.as_fiddlesticks().map(|g| g.round_info(seat))
    }
}
