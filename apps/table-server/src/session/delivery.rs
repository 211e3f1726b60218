//! Channel push with an explicit backpressure policy.
//!
//! Every update is logged before it is pushed, so a dropped push is
//! recoverable with a resend; pushes here never block the caller forever.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{SendTimeoutError, TrySendError};
use tracing::{debug, warn};

use crate::config::BackpressurePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Sent,
    /// Channel full; the message is only in the log.
    Dropped,
    /// Receiver gone.
    Closed,
}

/// Sending half of one recipient channel.
#[derive(Debug)]
pub struct Outbox<T> {
    tx: mpsc::Sender<T>,
    policy: BackpressurePolicy,
    label: String,
}

impl<T> Outbox<T> {
    pub fn new(tx: mpsc::Sender<T>, policy: BackpressurePolicy, label: impl Into<String>) -> Self {
        Self {
            tx,
            policy,
            label: label.into(),
        }
    }

    pub async fn push(&self, msg: T) -> PushOutcome {
        match self.tx.try_send(msg) {
            Ok(()) => PushOutcome::Sent,
            Err(TrySendError::Full(msg)) => match self.policy {
                BackpressurePolicy::DropNewest => {
                    warn!(recipient = %self.label, "dropping push due to backpressure (channel full)");
                    PushOutcome::Dropped
                }
                BackpressurePolicy::Block { timeout } => {
                    match self.tx.send_timeout(msg, timeout).await {
                        Ok(()) => PushOutcome::Sent,
                        Err(SendTimeoutError::Timeout(_)) => {
                            warn!(
                                recipient = %self.label,
                                timeout_ms = timeout.as_millis() as u64,
                                "dropping push after backpressure timeout"
                            );
                            PushOutcome::Dropped
                        }
                        Err(SendTimeoutError::Closed(_)) => {
                            debug!(recipient = %self.label, "recipient channel closed");
                            PushOutcome::Closed
                        }
                    }
                }
            },
            Err(TrySendError::Closed(_)) => {
                debug!(recipient = %self.label, "recipient channel closed");
                PushOutcome::Closed
            }
        }
    }
}

/// Bounded channel for one recipient.
pub fn channel<T>(capacity: usize) -> (mpsc::Sender<T>, mpsc::Receiver<T>) {
    mpsc::channel(capacity.max(1))
}
