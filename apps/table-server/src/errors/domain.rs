//! Domain-level error type used by the game engine and the session layer.
//!
//! This error type is transport-agnostic. Rejected actions turn a
//! `DomainError` into a recipient-scoped failure notice; constructors and
//! binaries convert it into `crate::error::AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule and protocol violations. Each one is reported back to the actor only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    PhaseMismatch,
    InvalidBet,
    MustFollowSuit,
    CardAlreadyPlayed,
    InvalidCardIndex,
    MalformedPayload,
    UnknownAction,
    UnknownParticipant,
    InvalidSettings,
    InvalidPlayerCount,
    Other(String),
}

/// Session lifecycle violations (double start/end, delivery outside the live window).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LifecycleKind {
    AlreadyStarted,
    AlreadyEnded,
    NotStarted,
}

/// Operational failures that indicate a broken internal invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    DeckExhausted,
    /// An applied action's updates could not all be delivered.
    UndeliveredUpdates,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Operation not allowed in the current session lifecycle state
    Lifecycle(LifecycleKind, String),
    /// Internal/operational failure
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Lifecycle(kind, d) => write!(f, "lifecycle {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn lifecycle(kind: LifecycleKind, detail: impl Into<String>) -> Self {
        Self::Lifecycle(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Human-readable reason without the category prefix; this is what a
    /// failure notice carries back to the actor.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d) | DomainError::Lifecycle(_, d) | DomainError::Infra(_, d) => d,
        }
    }

    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_strips_category() {
        let err = DomainError::validation(ValidationKind::InvalidBet, "Must bet at least 0 but bet -1");
        assert_eq!(err.detail(), "Must bet at least 0 but bet -1");
        assert_eq!(
            err.to_string(),
            "validation error InvalidBet: Must bet at least 0 but bet -1"
        );
        assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidBet));
    }

    #[test]
    fn lifecycle_has_no_validation_kind() {
        let err = DomainError::lifecycle(LifecycleKind::AlreadyStarted, "game already started");
        assert!(err.validation_kind().is_none());
        assert_eq!(err.to_string(), "lifecycle AlreadyStarted: game already started");
    }
}
