//! Runtime configuration for tables, read from `TABLE_*` environment variables.

pub mod runner;

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub use runner::RunnerConfig;

/// Default per-recipient channel depth.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// What delivery does when a recipient's channel is full.
///
/// Either way the update stays in the recipient's log and can be resent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackpressurePolicy {
    /// Drop the push and log a warning.
    #[default]
    DropNewest,
    /// Wait up to `timeout` for room, then drop and warn.
    Block { timeout: Duration },
}

impl BackpressurePolicy {
    /// `"drop"` or `"block:<millis>"`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim() {
            "drop" => Ok(BackpressurePolicy::DropNewest),
            other => {
                let millis = other
                    .strip_prefix("block:")
                    .and_then(|ms| ms.parse::<u64>().ok())
                    .ok_or_else(|| {
                        AppError::config(format!(
                            "TABLE_BACKPRESSURE must be `drop` or `block:<millis>`, got `{other}`"
                        ))
                    })?;
                Ok(BackpressurePolicy::Block {
                    timeout: Duration::from_millis(millis),
                })
            }
        }
    }
}

/// How the table treats a human seat that does not act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPolicy {
    /// Wait indefinitely.
    #[default]
    Wait,
    /// Play a random legal action once the turn has been outstanding for `after`.
    AutoPlay { after: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub channel_capacity: usize,
    pub backpressure: BackpressurePolicy,
    pub turn_policy: TurnPolicy,
    /// Seed for shuffling and AI choices; random when absent.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            backpressure: BackpressurePolicy::default(),
            turn_policy: TurnPolicy::default(),
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let channel_capacity = match opt_var("TABLE_CHANNEL_CAPACITY") {
            Some(raw) => parse_num::<usize>("TABLE_CHANNEL_CAPACITY", &raw)?,
            None => DEFAULT_CHANNEL_CAPACITY,
        };
        if channel_capacity == 0 {
            return Err(AppError::config(
                "TABLE_CHANNEL_CAPACITY must be at least 1".to_string(),
            ));
        }
        let backpressure = match opt_var("TABLE_BACKPRESSURE") {
            Some(raw) => BackpressurePolicy::parse(&raw)?,
            None => BackpressurePolicy::default(),
        };
        let turn_policy = match opt_var("TABLE_TURN_TIMEOUT_MS") {
            Some(raw) => TurnPolicy::AutoPlay {
                after: Duration::from_millis(parse_num("TABLE_TURN_TIMEOUT_MS", &raw)?),
            },
            None => TurnPolicy::Wait,
        };
        let seed = opt_var("TABLE_SEED")
            .map(|raw| parse_num::<u64>("TABLE_SEED", &raw))
            .transpose()?;

        Ok(Self {
            channel_capacity,
            backpressure,
            turn_policy,
            seed,
        })
    }
}

/// Non-empty environment variable, if set.
pub(crate) fn opt_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn parse_num<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::config(format!("{key} must be a number, got `{raw}`")))
}
