#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod game;
pub mod session;
pub mod table;

// Re-exports for public API
pub use config::{BackpressurePolicy, TableConfig, TurnPolicy};
pub use error::AppError;
pub use errors::domain::DomainError;
pub use game::{GameKind, TableGame};
pub use session::{ActionOutcome, ParticipantId, PlayerAction, SessionHandle, UpdateMessage};
pub use table::{build_table, PlayerEndpoint, Table, TableBuilder, ViewerEndpoint};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    table_test_support::logging::init();
}
