//! Session substrate: participants, update delivery, lifecycle and the
//! single-writer dispatch pipeline.

pub mod action;
pub mod delivery;
pub mod dispatch;
pub mod lifecycle;
pub mod participant;
#[allow(clippy::module_inception)]
pub mod session;
pub mod update;
pub mod watchdog;

pub use action::{ActionOutcome, ParticipantId, PlayerAction};
pub use dispatch::SessionHandle;
pub use lifecycle::TerminationSignal;
pub use session::{Session, TurnMarker};
pub use update::{FailureNotice, SharedUpdate, UpdateMessage};
