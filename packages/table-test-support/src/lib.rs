//! Shared helpers for table-server unit and integration tests.

pub mod channels;
pub mod logging;
pub mod payloads;
