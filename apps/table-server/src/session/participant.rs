//! Participant arena: players indexed by seat, viewers by join order, and
//! an identity lookup table owned by the session.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::Seat;
use crate::session::action::ParticipantId;
use crate::session::delivery::Outbox;
use crate::session::update::{FailureNotice, SharedUpdate, UpdateLog};

#[derive(Debug)]
pub struct PlayerSlot {
    pub id: ParticipantId,
    pub seat: Seat,
    pub nickname: String,
    pub connected: bool,
    /// This player's own numbering space.
    pub log: UpdateLog,
    pub updates: Outbox<SharedUpdate>,
    pub failures: Outbox<FailureNotice>,
}

#[derive(Debug)]
pub struct ViewerSlot {
    pub id: ParticipantId,
    pub nickname: String,
    pub connected: bool,
    pub updates: Outbox<SharedUpdate>,
}

/// Where an identity sits at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    Player(Seat),
    Viewer(usize),
}

/// Public roster entry used in snapshots.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RosterEntry {
    pub participant: ParticipantId,
    pub nickname: String,
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<Seat>,
}

#[derive(Debug, Default)]
pub struct Registry {
    players: Vec<PlayerSlot>,
    viewers: Vec<ViewerSlot>,
    index: HashMap<ParticipantId, Member>,
}

impl Registry {
    /// Seat the next player; returns its seat. Duplicate identities are refused.
    pub fn add_player(
        &mut self,
        id: ParticipantId,
        nickname: String,
        updates: Outbox<SharedUpdate>,
        failures: Outbox<FailureNotice>,
    ) -> Option<Seat> {
        if self.index.contains_key(&id) {
            return None;
        }
        let seat = self.players.len();
        self.players.push(PlayerSlot {
            id,
            seat,
            nickname,
            // AI seats are always connected.
            connected: id.is_ai(),
            log: UpdateLog::default(),
            updates,
            failures,
        });
        self.index.insert(id, Member::Player(seat));
        Some(seat)
    }

    pub fn add_viewer(
        &mut self,
        id: ParticipantId,
        nickname: String,
        updates: Outbox<SharedUpdate>,
    ) -> Option<usize> {
        if self.index.contains_key(&id) {
            return None;
        }
        let slot = self.viewers.len();
        self.viewers.push(ViewerSlot {
            id,
            nickname,
            connected: false,
            updates,
        });
        self.index.insert(id, Member::Viewer(slot));
        Some(slot)
    }

    pub fn lookup(&self, id: ParticipantId) -> Option<Member> {
        self.index.get(&id).copied()
    }

    pub fn player(&self, seat: Seat) -> Option<&PlayerSlot> {
        self.players.get(seat)
    }

    pub fn player_mut(&mut self, seat: Seat) -> Option<&mut PlayerSlot> {
        self.players.get_mut(seat)
    }

    pub fn players(&self) -> &[PlayerSlot] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [PlayerSlot] {
        &mut self.players
    }

    pub fn viewer(&self, slot: usize) -> Option<&ViewerSlot> {
        self.viewers.get(slot)
    }

    pub fn viewers(&self) -> &[ViewerSlot] {
        &self.viewers
    }

    pub fn nicknames(&self) -> Vec<String> {
        self.players.iter().map(|p| p.nickname.clone()).collect()
    }

    /// Flip the connection flag; returns the member it applied to.
    pub fn set_connected(&mut self, id: ParticipantId, connected: bool) -> Option<Member> {
        let member = self.lookup(id)?;
        match member {
            Member::Player(seat) => {
                if let Some(p) = self.players.get_mut(seat) {
                    // AI seats cannot disconnect.
                    p.connected = connected || p.id.is_ai();
                }
            }
            Member::Viewer(slot) => {
                if let Some(v) = self.viewers.get_mut(slot) {
                    v.connected = connected;
                }
            }
        }
        Some(member)
    }

    /// Every human seat has a live connection.
    pub fn all_humans_connected(&self) -> bool {
        self.players.iter().filter(|p| !p.id.is_ai()).all(|p| p.connected)
    }

    pub fn human_seat_count(&self) -> usize {
        self.players.iter().filter(|p| !p.id.is_ai()).count()
    }

    /// Live human player and viewer connections.
    pub fn live_connections(&self) -> usize {
        self.players
            .iter()
            .filter(|p| !p.id.is_ai() && p.connected)
            .count()
            + self.viewers.iter().filter(|v| v.connected).count()
    }

    pub fn roster(&self) -> (Vec<RosterEntry>, Vec<RosterEntry>) {
        let players = self
            .players
            .iter()
            .map(|p| RosterEntry {
                participant: p.id,
                nickname: p.nickname.clone(),
                connected: p.connected,
                player_id: Some(p.seat),
            })
            .collect();
        let viewers = self
            .viewers
            .iter()
            .map(|v| RosterEntry {
                participant: v.id,
                nickname: v.nickname.clone(),
                connected: v.connected,
                player_id: None,
            })
            .collect();
        (players, viewers)
    }
}
