//! Helpers for reading bounded update/failure channels in async tests.

use std::time::Duration;

use tokio::sync::mpsc::Receiver;

/// Default wait used by [`recv_within`] callers that have no better bound.
pub const SHORT_WAIT: Duration = Duration::from_millis(500);

/// Receive one message, giving up after `wait`.
pub async fn recv_within<T>(rx: &mut Receiver<T>, wait: Duration) -> Option<T> {
    tokio::time::timeout(wait, rx.recv()).await.ok().flatten()
}

/// Take everything currently buffered without waiting.
pub fn drain<T>(rx: &mut Receiver<T>) -> Vec<T> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}
