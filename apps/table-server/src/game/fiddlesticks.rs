//! Fiddlesticks: bet on the exact number of tricks you will take.
//!
//! Round sizes climb by one card from `min_round` to the largest round the
//! deck allows, then fall back. The card exposed after dealing sets trump.
//! Making your bet exactly scores `round_points + trick_points * bet`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info};

use crate::domain::bidding::{legal_bets, place_bet};
use crate::domain::dealing::{deal_next_round, DealtRound};
use crate::domain::player_view::CurrentRoundInfo;
use crate::domain::scoring::{apply_round_scoring, winners};
use crate::domain::snapshot::{snapshot, Visibility};
use crate::domain::state::{GameState, Phase};
use crate::domain::tricks::{legal_card_indices, play_card};
use crate::domain::{Deck, Seat};
use crate::errors::domain::DomainError;
use crate::game::settings::FiddlesticksSettings;
use crate::game::{GameAction, Outbound, TableGame};

pub const DEAL_ROUND: &str = "deal-round";
pub const BET: &str = "bet";
pub const PLAY_CARD: &str = "play-card";
pub const TRICK_WON: &str = "trick-won";
pub const ROUND_SCORED: &str = "round-scored";

/// Best possible score and final per-seat scores, for harnesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResults {
    pub max_score: u32,
    pub scores: Vec<u32>,
}

#[derive(Debug)]
pub struct Fiddlesticks {
    state: GameState,
    nicknames: Vec<String>,
}

impl Fiddlesticks {
    pub fn new(
        nicknames: Vec<String>,
        settings: &FiddlesticksSettings,
        seed: u64,
    ) -> Result<Self, DomainError> {
        let players = nicknames.len();
        let rounds = settings.resolve(players)?;
        let deck = Deck::new(settings.deck_kind()?, seed);
        let first_dealer = match settings.first_dealer {
            Some(seat) => seat,
            None => ChaCha8Rng::seed_from_u64(seed.rotate_left(17)).random_range(0..players),
        };
        Ok(Self {
            state: GameState::new(players, rounds, deck, first_dealer),
            nicknames,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Decision-point view for one seat.
    pub fn round_info(&self, seat: Seat) -> CurrentRoundInfo {
        CurrentRoundInfo::for_seat(&self.state, seat)
    }

    pub fn results(&self) -> GameResults {
        GameResults {
            max_score: self.state.settings.max_score(),
            scores: self.state.seats.iter().map(|s| s.score).collect(),
        }
    }

    fn deal(&mut self, out: &mut Vec<Outbound>) -> Result<(), DomainError> {
        match deal_next_round(&mut self.state)? {
            Some(dealt) => {
                debug!(round = dealt.round, dealer = dealt.dealer, trump = %dealt.trump, "dealt round");
                self.push_deal(dealt, out);
            }
            None => {
                let reason = self.winner_message();
                info!(%reason, "fiddlesticks finished");
                out.push(Outbound::Finished { reason });
            }
        }
        Ok(())
    }

    fn push_deal(&self, dealt: DealtRound, out: &mut Vec<Outbound>) {
        for (seat, s) in self.state.seats.iter().enumerate() {
            out.push(Outbound::ToSeat {
                seat,
                kind: DEAL_ROUND,
                content: json!({
                    "dealer": dealt.dealer,
                    "round": dealt.round,
                    "trump": dealt.trump,
                    "cards": s.hand,
                }),
            });
        }
        out.push(Outbound::ToViewers {
            kind: DEAL_ROUND,
            content: json!({
                "dealer": dealt.dealer,
                "round": dealt.round,
                "trump": dealt.trump,
            }),
        });
    }

    fn winner_message(&self) -> String {
        let (seats, best) = winners(&self.state);
        let names: Vec<&str> = seats
            .iter()
            .filter_map(|s| self.nicknames.get(*s).map(String::as_str))
            .collect();
        if names.len() == 1 {
            format!("The winner is: {} with {best} points", names[0])
        } else {
            format!("The winners are: {} with {best} points", names.join(", "))
        }
    }

    fn bet(&mut self, seat: Seat, amount: i64) -> Result<Vec<Outbound>, DomainError> {
        let placed = place_bet(&mut self.state, seat, amount)?;
        debug!(seat, amount = placed.amount, closed = placed.betting_closed, "bet placed");
        Ok(vec![Outbound::Broadcast {
            kind: BET,
            content: json!({ "amount": placed.amount, "player_id": seat }),
        }])
    }

    fn play(&mut self, seat: Seat, index: i64) -> Result<Vec<Outbound>, DomainError> {
        let played = play_card(&mut self.state, seat, index)?;
        let mut out = vec![Outbound::Broadcast {
            kind: PLAY_CARD,
            content: json!({
                "index": played.index,
                "card": played.card,
                "player_id": seat,
                "lead_suit": played.lead_suit,
            }),
        }];

        if let Some(trick) = played.trick {
            debug!(winner = trick.winner, card = %trick.card, "trick won");
            out.push(Outbound::Broadcast {
                kind: TRICK_WON,
                content: json!({
                    "player_id": trick.winner,
                    "card": trick.card,
                    "tricks": trick.tricks,
                }),
            });
        }

        if played.round_complete {
            let scored = apply_round_scoring(&mut self.state);
            info!(round = scored.round, scores = ?scored.scores, "round scored");
            out.push(Outbound::Broadcast {
                kind: ROUND_SCORED,
                content: json!({
                    "round": scored.round,
                    "bets": scored.bets,
                    "tricks": scored.tricks,
                    "gained": scored.gained,
                    "scores": scored.scores,
                }),
            });
            self.deal(&mut out)?;
        }
        Ok(out)
    }
}

impl TableGame for Fiddlesticks {
    fn start(&mut self) -> Result<Vec<Outbound>, DomainError> {
        let mut out = Vec::new();
        self.deal(&mut out)?;
        Ok(out)
    }

    fn apply_action(&mut self, seat: Seat, action: GameAction) -> Result<Vec<Outbound>, DomainError> {
        match action {
            GameAction::Bet { amount } => self.bet(seat, amount),
            GameAction::PlayCard { index } => self.play(seat, index),
        }
    }

    fn render_state_for(&self, visibility: Visibility) -> JsonValue {
        let mut view = serde_json::to_value(snapshot(&self.state, visibility)).unwrap_or_default();
        if let Some(players) = view.get_mut("players").and_then(JsonValue::as_array_mut) {
            for (seat, p) in players.iter_mut().enumerate() {
                if let (Some(obj), Some(name)) = (p.as_object_mut(), self.nicknames.get(seat)) {
                    obj.insert("nickname".into(), JsonValue::String(name.clone()));
                }
            }
        }
        view
    }

    fn is_terminal(&self) -> bool {
        self.state.phase == Phase::GameOver
    }

    fn turn(&self) -> Option<Seat> {
        self.state.turn
    }

    fn legal_actions(&self, seat: Seat) -> Vec<GameAction> {
        match self.state.phase {
            Phase::Betting => legal_bets(&self.state, seat)
                .into_iter()
                .map(|amount| GameAction::Bet {
                    amount: amount as i64,
                })
                .collect(),
            Phase::TrickPlay if self.state.turn == Some(seat) => {
                legal_card_indices(&self.state, seat)
                    .into_iter()
                    .map(|index| GameAction::PlayCard {
                        index: index as i64,
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn game(players: usize, settings: JsonValue) -> Fiddlesticks {
        let names = (0..players).map(|i| format!("p{i}")).collect();
        let settings = FiddlesticksSettings::from_json(Some(&settings)).unwrap();
        Fiddlesticks::new(names, &settings, 42).unwrap()
    }

    fn kinds(out: &[Outbound]) -> Vec<&'static str> {
        out.iter()
            .map(|o| match o {
                Outbound::Broadcast { kind, .. }
                | Outbound::ToSeat { kind, .. }
                | Outbound::ToViewers { kind, .. } => *kind,
                Outbound::Finished { .. } => "finished",
            })
            .collect()
    }

    #[test]
    fn start_deals_private_hands_and_a_public_view() {
        let mut g = game(3, json!({"first_dealer": 0}));
        let out = g.start().unwrap();
        assert_eq!(kinds(&out), vec![DEAL_ROUND; 4]);
        match &out[0] {
            Outbound::ToSeat { seat, content, .. } => {
                assert_eq!(*seat, 0);
                assert_eq!(content["cards"].as_array().unwrap().len(), 1);
                assert_eq!(content["dealer"], json!(0));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &out[3] {
            Outbound::ToViewers { content, .. } => assert!(content.get("cards").is_none()),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(g.turn(), Some(1));
    }

    #[test]
    fn last_card_of_round_scores_and_redeals() {
        let mut g = game(2, json!({"first_dealer": 1, "max_round": 2}));
        g.start().unwrap();
        g.apply_action(0, GameAction::Bet { amount: 1 }).unwrap();
        g.apply_action(1, GameAction::Bet { amount: 0 }).unwrap();

        let leader = g.turn().unwrap();
        g.apply_action(leader, g.legal_actions(leader)[0]).unwrap();
        let follower = g.turn().unwrap();
        let out = g
            .apply_action(follower, g.legal_actions(follower)[0])
            .unwrap();
        assert_eq!(
            kinds(&out),
            vec![PLAY_CARD, TRICK_WON, ROUND_SCORED, DEAL_ROUND, DEAL_ROUND, DEAL_ROUND]
        );
        assert_eq!(g.state().round(), 2);
    }

    #[test]
    fn final_round_finishes_with_winner_message() {
        let mut g = game(2, json!({"first_dealer": 1, "max_round": 1}));
        g.start().unwrap();
        g.apply_action(0, GameAction::Bet { amount: 0 }).unwrap();
        g.apply_action(1, GameAction::Bet { amount: 0 }).unwrap();
        let first = g.turn().unwrap();
        g.apply_action(first, g.legal_actions(first)[0]).unwrap();
        let second = g.turn().unwrap();
        let out = g.apply_action(second, g.legal_actions(second)[0]).unwrap();

        assert!(g.is_terminal());
        assert_eq!(g.turn(), None);
        match out.last() {
            Some(Outbound::Finished { reason }) => {
                assert!(reason.contains("with 10 points"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(g.results().max_score, 11);
    }

    #[test]
    fn rejected_action_changes_nothing() {
        let mut g = game(3, json!({"first_dealer": 0}));
        g.start().unwrap();
        let before = g.render_state_for(Visibility::All);
        assert!(g.apply_action(0, GameAction::Bet { amount: 0 }).is_err());
        assert!(g.apply_action(1, GameAction::PlayCard { index: 0 }).is_err());
        assert_eq!(before, g.render_state_for(Visibility::All));
    }

    #[test]
    fn render_hides_other_hands() {
        let mut g = game(3, json!({"first_dealer": 0}));
        g.start().unwrap();
        let view = g.render_state_for(Visibility::Seat(1));
        let players = view["players"].as_array().unwrap();
        assert!(players[0].get("cards").is_none());
        assert!(players[1].get("cards").is_some());
        assert_eq!(players[2]["nickname"], json!("p2"));
    }
}
