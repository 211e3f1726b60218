//! Game-specific settings for Fiddlesticks, read from the table's JSON
//! settings object and clamped into a playable [`RoundSettings`].

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::rules::{
    max_round_for, RoundSettings, DEFAULT_ROUND_POINTS, DEFAULT_TRICK_POINTS, MAX_ITERATIONS,
    MIN_PLAYERS, POINTS_LIMIT,
};
use crate::domain::{DeckKind, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// Raw settings as supplied by the table creator. Every field is optional;
/// out-of-range values fall back to defaults instead of failing.
///
/// ```json
/// {"max_round": 5, "min_round": 2, "round_points": 10, "trick_points": 1, "iterations": 1}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FiddlesticksSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_round: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_round: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trick_points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<i64>,
    /// `"standard52"` (default) or `"short24"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    /// Seat that deals the first round; random when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_dealer: Option<Seat>,
}

impl FiddlesticksSettings {
    /// Parse from an optional JSON object. Unknown keys are ignored.
    pub fn from_json(value: Option<&JsonValue>) -> Result<Self, DomainError> {
        match value {
            None | Some(JsonValue::Null) => Ok(Self::default()),
            Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
                DomainError::validation(
                    ValidationKind::InvalidSettings,
                    format!("invalid fiddlesticks settings: {e}"),
                )
            }),
        }
    }

    pub fn deck_kind(&self) -> Result<DeckKind, DomainError> {
        match self.deck.as_deref() {
            None => Ok(DeckKind::default()),
            Some(s) => DeckKind::parse(s).ok_or_else(|| {
                DomainError::validation(ValidationKind::InvalidSettings, format!("unknown deck `{s}`"))
            }),
        }
    }

    /// Clamp into concrete settings for `players` seats.
    pub fn resolve(&self, players: usize) -> Result<RoundSettings, DomainError> {
        if players < MIN_PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                "Need at least two players to play fiddlesticks",
            ));
        }
        let deck = self.deck_kind()?;
        let computed_max = max_round_for(deck.size(), players);
        if computed_max == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("{players} players cannot share a {}-card deck", deck.size()),
            ));
        }
        if let Some(first) = self.first_dealer {
            if first >= players {
                return Err(DomainError::validation(
                    ValidationKind::InvalidSettings,
                    format!("first dealer {first} is not a seat at a {players}-seat table"),
                ));
            }
        }

        let max_round = match self.max_round {
            Some(m) if m > 0 && m < computed_max as i64 => m as u8,
            _ => computed_max,
        };
        let min_round = match self.min_round {
            Some(m) if m > 0 && m <= max_round as i64 => m as u8,
            _ => 1,
        };
        let points = |v: Option<i64>, default: u32| match v {
            Some(p) if (0..POINTS_LIMIT as i64).contains(&p) => p as u32,
            Some(_) => default,
            None => default,
        };
        let trick_points = points(self.trick_points, DEFAULT_TRICK_POINTS);
        let mut round_points = points(self.round_points, DEFAULT_ROUND_POINTS);
        if round_points == 0 && trick_points == 0 {
            round_points = 1;
        }
        let iterations = match self.iterations {
            Some(i) if i > 0 => i.min(MAX_ITERATIONS as i64) as u32,
            _ => 1,
        };

        Ok(RoundSettings {
            min_round,
            max_round,
            round_points,
            trick_points,
            iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::rules::RoundCursor;

    fn resolve(v: JsonValue, players: usize) -> RoundSettings {
        FiddlesticksSettings::from_json(Some(&v))
            .unwrap()
            .resolve(players)
            .unwrap()
    }

    #[test]
    fn defaults_for_four_players() {
        let s = resolve(json!({}), 4);
        assert_eq!(s.max_round, 12);
        assert_eq!(s.min_round, 1);
        assert_eq!(s.round_points, 10);
        assert_eq!(s.trick_points, 1);
        assert_eq!(s.iterations, 1);
    }

    #[test]
    fn max_round_only_clamps_downward() {
        assert_eq!(resolve(json!({"max_round": 5}), 4).max_round, 5);
        assert_eq!(resolve(json!({"max_round": 40}), 4).max_round, 12);
        assert_eq!(resolve(json!({"max_round": 0}), 4).max_round, 12);
    }

    #[test]
    fn min_round_must_fit_under_max() {
        assert_eq!(resolve(json!({"max_round": 5, "min_round": 3}), 4).min_round, 3);
        assert_eq!(resolve(json!({"max_round": 5, "min_round": 6}), 4).min_round, 1);
        assert_eq!(resolve(json!({"min_round": -2}), 4).min_round, 1);
    }

    #[test]
    fn points_are_clamped_and_never_both_zero() {
        let s = resolve(json!({"round_points": 150, "trick_points": -1}), 3);
        assert_eq!((s.round_points, s.trick_points), (10, 1));
        let s = resolve(json!({"round_points": 0, "trick_points": 0}), 3);
        assert_eq!((s.round_points, s.trick_points), (1, 0));
        let s = resolve(json!({"round_points": 0, "trick_points": 5}), 3);
        assert_eq!((s.round_points, s.trick_points), (0, 5));
    }

    #[test]
    fn huge_iteration_counts_are_capped() {
        let s = resolve(json!({"iterations": 4_294_967_295u64, "max_round": 2}), 4);
        assert_eq!(s.iterations, MAX_ITERATIONS);
        assert_eq!(s.max_score(), 100 * (10 * 3 + 4));

        let mut cursor = RoundCursor::before_first(&s);
        assert!(cursor.advance(&s));
        assert_eq!(cursor.round, 1);
        assert_eq!(resolve(json!({"iterations": -3}), 4).iterations, 1);
    }

    #[test]
    fn short_deck_and_player_count_errors() {
        assert_eq!(resolve(json!({"deck": "short24"}), 4).max_round, 5);
        let err = FiddlesticksSettings::default().resolve(1).unwrap_err();
        assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidPlayerCount));
        let short = FiddlesticksSettings {
            deck: Some("short24".into()),
            ..Default::default()
        };
        assert!(short.resolve(24).is_err());
        let bad = FiddlesticksSettings {
            first_dealer: Some(4),
            ..Default::default()
        };
        assert!(bad.resolve(4).is_err());
    }

    #[test]
    fn malformed_settings_are_rejected() {
        let err = FiddlesticksSettings::from_json(Some(&json!({"max_round": "many"}))).unwrap_err();
        assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidSettings));
    }
}
