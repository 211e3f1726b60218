//! Settings for the standalone runner binary.

use serde_json::Value as JsonValue;

use super::{opt_var, TableConfig};
use crate::error::AppError;
use crate::game::GameKind;

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub table: TableConfig,
    pub game: String,
    /// One decision model name per AI seat.
    pub ai_models: Vec<String>,
    /// Game-specific settings object.
    pub settings: Option<JsonValue>,
}

impl RunnerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let table = TableConfig::from_env()?;
        let game = opt_var("TABLE_GAME").unwrap_or_else(|| GameKind::FIDDLESTICKS.to_string());
        let ai_models = opt_var("TABLE_AI_MODELS")
            .unwrap_or_else(|| "outrank,linear,beliefs,uniform".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let settings = opt_var("TABLE_SETTINGS")
            .map(|raw| {
                serde_json::from_str(&raw)
                    .map_err(|e| AppError::config(format!("TABLE_SETTINGS is not valid JSON: {e}")))
            })
            .transpose()?;

        Ok(Self {
            table,
            game,
            ai_models,
            settings,
        })
    }
}
