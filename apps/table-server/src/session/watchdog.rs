use std::collections::HashSet;
use std::time::Duration;

use rand_chacha::ChaCha8Rng;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::Seat;
use crate::session::SessionHandle;

/// Plays for human seats that leave their turn outstanding for `after`.
///
/// Only spawned under `TurnPolicy::AutoPlay`; the default policy waits.
pub fn spawn_turn_watchdog(
    handle: SessionHandle,
    human_seats: HashSet<Seat>,
    after: Duration,
    mut rng: ChaCha8Rng,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let token = handle.termination().token();
        let mut turns = handle.turns();
        loop {
            let marker = *turns.borrow_and_update();
            let due = marker.seat.filter(|s| human_seats.contains(s));
            match due {
                Some(seat) => {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => break,
                        changed = turns.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
                        _ = tokio::time::sleep(after) => {
                            handle.auto_play(seat, marker, &mut rng).await;
                        }
                    }
                }
                None => {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => break,
                        changed = turns.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        }
        debug!(session_id = handle.id(), "turn watchdog stopped");
    })
}
