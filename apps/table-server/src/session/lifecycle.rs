//! One-shot termination signal shared by the session and its workers.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// Fires once with the reason the game ended. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct TerminationSignal {
    token: CancellationToken,
    reason: Arc<Mutex<Option<String>>>,
}

impl TerminationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `reason` and wake every waiter. Returns `false` if already fired.
    pub(crate) fn fire(&self, reason: String) -> bool {
        {
            let mut slot = self.reason.lock();
            if slot.is_some() {
                return false;
            }
            *slot = Some(reason);
        }
        self.token.cancel();
        true
    }

    pub fn is_fired(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn reason(&self) -> Option<String> {
        self.reason.lock().clone()
    }

    /// Resolve with the end reason once the game has ended.
    pub async fn wait(&self) -> String {
        self.token.cancelled().await;
        self.reason().unwrap_or_default()
    }

    /// Token for `select!` loops in worker tasks.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
