//! How to register a decision model
//!
//! 1) Implement `DecisionModel` for your type in its module.
//! 2) Add an `AiFactory` entry below with a stable `name` and `version`.
//! 3) Keep ordering stable; constructors must not have side effects.

use super::beliefs::Beliefs;
use super::config::AiConfig;
use super::linear::Linear;
use super::outrank::Outrank;
use super::trait_def::{AiError, DecisionModel};
use super::uniform::Uniform;

/// Factory definition for constructing decision models.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(config: &AiConfig) -> Result<Box<dyn DecisionModel>, AiError>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: Uniform::NAME,
        version: Uniform::VERSION,
        make: make_uniform,
    },
    AiFactory {
        name: Outrank::NAME,
        version: Outrank::VERSION,
        make: make_outrank,
    },
    AiFactory {
        name: Linear::NAME,
        version: Linear::VERSION,
        make: make_linear,
    },
    AiFactory {
        name: Beliefs::NAME,
        version: Beliefs::VERSION,
        make: make_beliefs,
    },
];

/// Returns the statically registered factories.
pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Finds a registered factory by its name.
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|factory| factory.name == name)
}

fn make_uniform(config: &AiConfig) -> Result<Box<dyn DecisionModel>, AiError> {
    Ok(Box::new(Uniform::from_config(config)?))
}

fn make_outrank(config: &AiConfig) -> Result<Box<dyn DecisionModel>, AiError> {
    Ok(Box::new(Outrank::from_config(config)?))
}

fn make_linear(config: &AiConfig) -> Result<Box<dyn DecisionModel>, AiError> {
    Ok(Box::new(Linear::from_config(config)?))
}

fn make_beliefs(config: &AiConfig) -> Result<Box<dyn DecisionModel>, AiError> {
    Ok(Box::new(Beliefs::from_config(config)?))
}
