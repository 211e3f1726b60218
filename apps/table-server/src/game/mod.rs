//! Game kinds a table can host, behind one capability interface.
//!
//! The set of games is closed: [`GameKind`] is chosen when the table is
//! built and every session operation goes through [`TableGame`].

pub mod fiddlesticks;
pub mod settings;

use serde_json::Value as JsonValue;

use crate::domain::snapshot::Visibility;
use crate::domain::Seat;
use crate::errors::domain::{DomainError, ValidationKind};

pub use fiddlesticks::{Fiddlesticks, GameResults};
pub use settings::FiddlesticksSettings;

/// A state change the session must deliver, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Every player log and the viewer stream.
    Broadcast { kind: &'static str, content: JsonValue },
    /// One player's log only.
    ToSeat {
        seat: Seat,
        kind: &'static str,
        content: JsonValue,
    },
    /// The viewer stream only.
    ToViewers { kind: &'static str, content: JsonValue },
    /// The game reached its end; the session ends with this reason.
    Finished { reason: String },
}

/// Parsed player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Bet { amount: i64 },
    PlayCard { index: i64 },
}

impl GameAction {
    pub const BET: &'static str = "bet";
    pub const PLAY_CARD: &'static str = "play-card";

    /// Parse a raw `{kind, payload}` pair.
    pub fn parse(kind: &str, payload: &JsonValue) -> Result<Self, DomainError> {
        match kind {
            Self::BET => {
                let amount = payload.get("amount").and_then(JsonValue::as_i64).ok_or_else(|| {
                    DomainError::validation(
                        ValidationKind::MalformedPayload,
                        format!("Bet value invalid: {}", payload.get("amount").unwrap_or(&JsonValue::Null)),
                    )
                })?;
                Ok(GameAction::Bet { amount })
            }
            Self::PLAY_CARD => {
                let index = payload.get("index").and_then(JsonValue::as_i64).ok_or_else(|| {
                    DomainError::validation(
                        ValidationKind::MalformedPayload,
                        format!("Card index invalid: {}", payload.get("index").unwrap_or(&JsonValue::Null)),
                    )
                })?;
                Ok(GameAction::PlayCard { index })
            }
            other => Err(DomainError::validation(
                ValidationKind::UnknownAction,
                format!("Unknown action kind `{other}`"),
            )),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GameAction::Bet { .. } => Self::BET,
            GameAction::PlayCard { .. } => Self::PLAY_CARD,
        }
    }

    pub fn payload(&self) -> JsonValue {
        match self {
            GameAction::Bet { amount } => serde_json::json!({ "amount": amount }),
            GameAction::PlayCard { index } => serde_json::json!({ "index": index }),
        }
    }
}

/// Capabilities every hosted game provides to the session.
pub trait TableGame: Send {
    /// Begin play (first deal). Called exactly once.
    fn start(&mut self) -> Result<Vec<Outbound>, DomainError>;

    /// Validate and apply one action. On `Err` the state is unchanged.
    fn apply_action(&mut self, seat: Seat, action: GameAction) -> Result<Vec<Outbound>, DomainError>;

    fn render_state_for(&self, visibility: Visibility) -> JsonValue;

    fn is_terminal(&self) -> bool;

    /// Seat expected to act next.
    fn turn(&self) -> Option<Seat>;

    /// Every action `seat` could legally take right now.
    fn legal_actions(&self, seat: Seat) -> Vec<GameAction>;
}

#[derive(Debug)]
pub enum GameKind {
    Fiddlesticks(Fiddlesticks),
}

impl GameKind {
    pub const FIDDLESTICKS: &'static str = "fiddlesticks";

    /// Construct the named game for the given seats.
    pub fn create(
        name: &str,
        nicknames: Vec<String>,
        settings: Option<&JsonValue>,
        seed: u64,
    ) -> Result<Self, DomainError> {
        match name {
            Self::FIDDLESTICKS => {
                let settings = FiddlesticksSettings::from_json(settings)?;
                Ok(GameKind::Fiddlesticks(Fiddlesticks::new(nicknames, &settings, seed)?))
            }
            other => Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                format!("unknown game `{other}`"),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameKind::Fiddlesticks(_) => Self::FIDDLESTICKS,
        }
    }

    pub fn as_fiddlesticks(&self) -> Option<&Fiddlesticks> {
        match self {
            GameKind::Fiddlesticks(g) => Some(g),
        }
    }
}

impl TableGame for GameKind {
    fn start(&mut self) -> Result<Vec<Outbound>, DomainError> {
        match self {
            GameKind::Fiddlesticks(g) => g.start(),
        }
    }

    fn apply_action(&mut self, seat: Seat, action: GameAction) -> Result<Vec<Outbound>, DomainError> {
        match self {
            GameKind::Fiddlesticks(g) => g.apply_action(seat, action),
        }
    }

    fn render_state_for(&self, visibility: Visibility) -> JsonValue {
        match self {
            GameKind::Fiddlesticks(g) => g.render_state_for(visibility),
        }
    }

    fn is_terminal(&self) -> bool {
        match self {
            GameKind::Fiddlesticks(g) => g.is_terminal(),
        }
    }

    fn turn(&self) -> Option<Seat> {
        match self {
            GameKind::Fiddlesticks(g) => g.turn(),
        }
    }

    fn legal_actions(&self, seat: Seat) -> Vec<GameAction> {
        match self {
            GameKind::Fiddlesticks(g) => g.legal_actions(seat),
        }
    }
}
