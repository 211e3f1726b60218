//! Unified test logging initialization
//!
//! Used by both the unit tests inside `table-server` and its integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The level is taken from, in order:
///
/// 1. `TEST_LOG`
/// 2. `RUST_LOG`
/// 3. `"warn"`
pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(test_filter())
            .with_test_writer()
            .with_target(false)
            .without_time()
            .try_init()
            .ok();
    });
}

fn test_filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|key| std::env::var(key).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
