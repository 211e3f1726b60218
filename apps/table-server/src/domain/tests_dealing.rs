use std::collections::HashSet;

use crate::domain::bidding::place_bet;
use crate::domain::dealing::deal_next_round;
use crate::domain::rules::max_round_for;
use crate::domain::scoring::apply_round_scoring;
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::settings;
use crate::domain::tricks::{legal_card_indices, play_card};
use crate::domain::{Deck, DeckKind};

fn fresh(seats: usize, seed: u64) -> GameState {
    let max = max_round_for(52, seats);
    GameState::new(seats, settings(1, max), Deck::new(DeckKind::Standard52, seed), 2)
}

#[test]
fn first_deal_uses_configured_dealer_and_deals_left_of_it() {
    let mut state = fresh(4, 11);
    let dealt = deal_next_round(&mut state).unwrap().unwrap();
    assert_eq!(dealt.dealer, 2);
    assert_eq!(dealt.round, 1);
    assert_eq!(state.phase, Phase::Betting);
    assert_eq!(state.turn, Some(3));
    assert_eq!(state.leader, 3);
    assert!(state.seats.iter().all(|s| s.hand.len() == 1 && s.bet.is_none()));

    let mut seen: HashSet<_> = state.seats.iter().flat_map(|s| s.hand.clone()).collect();
    assert!(seen.insert(dealt.trump), "trump must not also be in a hand");
    assert_eq!(state.deck.in_play(), 5);
    assert_eq!(state.deck.draw_len(), 47);
}

#[test]
fn dealer_rotates_each_round() {
    let mut state = fresh(3, 5);
    let dealers: Vec<_> = (0..4)
        .map(|_| deal_next_round(&mut state).unwrap().unwrap().dealer)
        .collect();
    assert_eq!(dealers, vec![2, 0, 1, 2]);
}

/// Plays the first legal option for every decision until the game ends.
fn play_out(state: &mut GameState) -> Vec<u8> {
    let mut rounds = Vec::new();
    let mut dealt = deal_next_round(state).unwrap();
    while let Some(round) = dealt {
        rounds.push(round.round);
        loop {
            let seat = state.turn.unwrap();
            match state.phase {
                Phase::Betting => {
                    place_bet(state, seat, 0).unwrap();
                }
                Phase::TrickPlay => {
                    let index = legal_card_indices(state, seat)[0];
                    if play_card(state, seat, index as i64).unwrap().round_complete {
                        break;
                    }
                }
                other => panic!("unexpected phase {other:?}"),
            }
        }
        apply_round_scoring(state);
        dealt = deal_next_round(state).unwrap();
    }
    rounds
}

#[test]
fn four_player_game_climbs_to_twelve_and_back() {
    let mut state = fresh(4, 99);
    let rounds = play_out(&mut state);
    let expected: Vec<u8> = (1..=12).chain((1..=11).rev()).collect();
    assert_eq!(rounds, expected);
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.turn, None);
}

#[test]
fn game_over_state_is_frozen() {
    let mut state = fresh(5, 3);
    play_out(&mut state);
    let scores: Vec<u32> = state.seats.iter().map(|s| s.score).collect();
    assert!(deal_next_round(&mut state).unwrap().is_none());
    assert!(place_bet(&mut state, 0, 0).is_err());
    assert!(play_card(&mut state, 0, 0).is_err());
    assert_eq!(scores, state.seats.iter().map(|s| s.score).collect::<Vec<_>>());
}
