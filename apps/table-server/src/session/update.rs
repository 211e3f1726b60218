use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::domain::Seat;

/// One entry of a recipient's ordered update log. Never mutated after creation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateMessage {
    /// 1-based, gapless within its numbering space.
    pub update_id: u64,
    pub kind: String,
    pub content: JsonValue,
}

pub type SharedUpdate = Arc<UpdateMessage>;

/// Recipient-scoped rejection of an action. Not logged; never broadcast.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailureNotice {
    /// `"<action kind>-failed"`.
    pub kind: String,
    pub message: String,
    pub player_id: Seat,
}

/// Append-only update log for one numbering space.
#[derive(Debug, Default)]
pub struct UpdateLog {
    entries: Vec<SharedUpdate>,
}

impl UpdateLog {
    /// Create the next entry; its id is the new length of the log.
    pub fn append(&mut self, kind: &str, content: JsonValue) -> SharedUpdate {
        let update = Arc::new(UpdateMessage {
            update_id: self.entries.len() as u64 + 1,
            kind: kind.to_string(),
            content,
        });
        self.entries.push(update.clone());
        update
    }

    pub fn get(&self, update_id: u64) -> Option<&SharedUpdate> {
        if update_id == 0 {
            return None;
        }
        self.entries.get(update_id as usize - 1)
    }

    pub fn last(&self) -> Option<&SharedUpdate> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SharedUpdate] {
        &self.entries
    }
}
