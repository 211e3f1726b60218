//! AI seats: decision models and the task that drives them.
//!
//! This module provides:
//! - the [`DecisionModel`] trait and its weighted-choice contract
//! - four models: uniform, outrank, linear and beliefs
//! - [`AiDriver`], one tokio task per AI seat

mod beliefs;
pub mod config;
mod driver;
mod linear;
mod outrank;
pub mod registry;
pub mod select;
#[cfg(test)]
mod testing;
mod trait_def;
mod uniform;

pub use beliefs::Beliefs;
pub use config::AiConfig;
pub use driver::AiDriver;
pub use linear::Linear;
pub use outrank::Outrank;
pub use trait_def::{AiError, DecisionModel};
pub use uniform::Uniform;

/// Build the model registered under `name`.
pub fn create_model(name: &str, config: &AiConfig) -> Result<Box<dyn DecisionModel>, AiError> {
    let factory = registry::by_name(name)
        .ok_or_else(|| AiError::InvalidConfig(format!("unknown AI model {name:?}")))?;
    (factory.make)(config)
}
