use crate::domain::bidding::{legal_bets, place_bet};
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{betting_state, c};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::ValidationKind;

fn five_card_hands() -> Vec<Vec<Card>> {
    let ranks = [Rank::Two, Rank::Five, Rank::Eight, Rank::Jack, Rank::Ace];
    Suit::ALL
        .iter()
        .map(|suit| ranks.iter().map(|r| c(*suit, *r)).collect())
        .collect()
}

#[test]
fn betting_runs_clockwise_from_left_of_dealer() {
    let mut state = betting_state(five_card_hands(), 0, c(Suit::Spades, Rank::Nine));
    assert_eq!(state.turn, Some(1));

    for (seat, amount) in [(1, 2), (2, 0), (3, 5)] {
        let placed = place_bet(&mut state, seat, amount).unwrap();
        assert!(!placed.betting_closed);
        assert_eq!(state.phase, Phase::Betting);
    }
    let placed = place_bet(&mut state, 0, 1).unwrap();
    assert!(placed.betting_closed);
    assert_eq!(state.phase, Phase::TrickPlay);
    assert_eq!(state.turn, Some(1));
    assert_eq!(state.leader, 1);
    assert_eq!(
        state.seats.iter().map(|s| s.bet).collect::<Vec<_>>(),
        vec![Some(1), Some(2), Some(0), Some(5)]
    );
}

#[test]
fn out_of_turn_bet_is_rejected_without_state_change() {
    let mut state = betting_state(five_card_hands(), 0, c(Suit::Spades, Rank::Nine));
    let err = place_bet(&mut state, 2, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
    assert_eq!(err.detail(), "Not 2 player's turn but 1 player's turn");
    assert_eq!(state.turn, Some(1));
    assert!(state.seats.iter().all(|s| s.bet.is_none()));
}

#[test]
fn bet_must_be_within_round_size() {
    let mut state = betting_state(five_card_hands(), 0, c(Suit::Spades, Rank::Nine));
    let err = place_bet(&mut state, 1, 6).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidBet));
    assert_eq!(
        err.detail(),
        "Cannot bet more than the cards in the round (5) but bet 6"
    );
    let err = place_bet(&mut state, 1, -1).unwrap_err();
    assert_eq!(err.detail(), "Must bet at least 0 but bet -1");
    assert_eq!(state.turn, Some(1));

    assert!(place_bet(&mut state, 1, 5).is_ok());
}

#[test]
fn legal_bets_only_for_seat_to_act() {
    let state = betting_state(five_card_hands(), 3, c(Suit::Spades, Rank::Nine));
    assert_eq!(legal_bets(&state, 0), vec![0, 1, 2, 3, 4, 5]);
    assert!(legal_bets(&state, 1).is_empty());
}

#[test]
fn betting_phase_rejects_bets_after_close() {
    let mut state = betting_state(five_card_hands(), 1, c(Suit::Spades, Rank::Nine));
    for seat in [2, 3, 0, 1] {
        place_bet(&mut state, seat, 1).unwrap();
    }
    let err = place_bet(&mut state, 2, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
    assert_eq!(err.detail(), "Not currently betting");
}
