//! AI configuration handling.
//!
//! Extracts the standard fields from a seat's JSON config while preserving
//! model-specific knobs in `custom`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::trait_def::AiError;

/// Standard configuration for an AI seat.
///
/// # Example JSON Config
///
/// ```json
/// {"seed": 12345, "aggression": 0.6}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiConfig {
    /// Seeds the driver's selection RNG for reproducible play.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Model-specific fields.
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl AiConfig {
    /// Build from optional JSON. Anything that is not an object yields an
    /// empty config.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }

    /// Numeric knob `key`, or `default` when absent.
    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64, AiError> {
        match self.get_custom(key) {
            None => Ok(default),
            Some(v) => v
                .as_f64()
                .filter(|x| x.is_finite())
                .ok_or_else(|| AiError::InvalidConfig(format!("{key} must be a number, got {v}"))),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            seed: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }
}
