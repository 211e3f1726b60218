use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Identity of a participant at a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ParticipantId {
    /// A transport-connected client.
    Client(u64),
    /// An AI seat owned by the table.
    Ai(u32),
}

impl ParticipantId {
    pub fn is_ai(self) -> bool {
        matches!(self, ParticipantId::Ai(_))
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantId::Client(id) => write!(f, "client:{id}"),
            ParticipantId::Ai(id) => write!(f, "ai:{id}"),
        }
    }
}

/// An action as submitted, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAction {
    pub actor: ParticipantId,
    pub kind: String,
    #[serde(default)]
    pub payload: JsonValue,
}

impl PlayerAction {
    pub fn new(actor: ParticipantId, kind: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            actor,
            kind: kind.into(),
            payload,
        }
    }

    /// Failure kind reported when this action is rejected.
    pub fn failure_kind(&self) -> String {
        format!("{}-failed", self.kind)
    }
}

/// A submitted action after it has been given an action id.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActionRecord {
    pub action_id: u64,
    #[serde(flatten)]
    pub action: PlayerAction,
}

/// What happened to a submitted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied { action_id: u64 },
    Rejected { action_id: u64, reason: String },
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied { .. })
    }
}
