#![allow(dead_code)]

// tests/common/mod.rs
use std::time::Duration;

use serde_json::{json, Value};
use table_server::{build_table, BackpressurePolicy, Table, TableConfig, TurnPolicy};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    table_test_support::logging::init();
}

/// Generous upper bound for a whole game between AI seats.
pub const GAME_TIMEOUT: Duration = Duration::from_secs(60);

/// Deep channels so nothing is dropped while a test is not reading.
pub fn roomy_config(seed: u64) -> TableConfig {
    TableConfig {
        channel_capacity: 4096,
        backpressure: BackpressurePolicy::DropNewest,
        turn_policy: TurnPolicy::Wait,
        seed: Some(seed),
    }
}

/// One-round game of a single card each, seat 0 dealing.
pub fn single_card_settings() -> Value {
    json!({"max_round": 1, "first_dealer": 0})
}

/// Two humans (client ids 10 and 11) and one viewer (client id 50).
pub async fn two_player_table(seed: u64) -> Table {
    build_table("fiddlesticks")
        .with_config(roomy_config(seed))
        .with_settings(single_card_settings())
        .with_player(10, "ann")
        .with_player(11, "bob")
        .with_viewer(50, "vic")
        .build()
        .await
        .expect("table builds")
}
