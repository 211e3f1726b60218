use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind, LifecycleKind, ValidationKind};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. } => code,
            AppError::Conflict { code, .. } => code,
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    pub fn invalid(code: &'static str, detail: String) -> Self {
        Self::Validation { code, detail }
    }

    pub fn conflict(code: &'static str, detail: String) -> Self {
        Self::Conflict { code, detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::OutOfTurn => "OUT_OF_TURN",
                    ValidationKind::PhaseMismatch => "PHASE_MISMATCH",
                    ValidationKind::InvalidBet => "INVALID_BET",
                    ValidationKind::MustFollowSuit => "MUST_FOLLOW_SUIT",
                    ValidationKind::CardAlreadyPlayed => "CARD_ALREADY_PLAYED",
                    ValidationKind::InvalidCardIndex => "INVALID_CARD_INDEX",
                    ValidationKind::MalformedPayload => "MALFORMED_PAYLOAD",
                    ValidationKind::UnknownAction => "UNKNOWN_ACTION",
                    ValidationKind::UnknownParticipant => "UNKNOWN_PARTICIPANT",
                    ValidationKind::InvalidSettings => "INVALID_SETTINGS",
                    ValidationKind::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
                    ValidationKind::Other(_) => "VALIDATION_ERROR",
                };
                AppError::invalid(code, detail)
            }
            DomainError::Lifecycle(kind, detail) => {
                let code = match kind {
                    LifecycleKind::AlreadyStarted => "ALREADY_STARTED",
                    LifecycleKind::AlreadyEnded => "ALREADY_ENDED",
                    LifecycleKind::NotStarted => "NOT_STARTED",
                };
                AppError::conflict(code, detail)
            }
            DomainError::Infra(InfraErrorKind::DeckExhausted, detail) => {
                AppError::internal(format!("deck exhausted: {detail}"))
            }
            DomainError::Infra(InfraErrorKind::UndeliveredUpdates, detail) => {
                AppError::internal(format!("undelivered updates: {detail}"))
            }
            DomainError::Infra(InfraErrorKind::Other(_), detail) => AppError::internal(detail),
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
