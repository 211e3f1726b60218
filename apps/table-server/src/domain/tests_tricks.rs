use crate::domain::scoring::{apply_round_scoring, winners};
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{c, trick_state};
use crate::domain::tricks::{legal_card_indices, play_card};
use crate::domain::{Rank, Suit};
use crate::errors::domain::ValidationKind;

#[test]
fn must_follow_led_suit_when_holding_it() {
    let hands = vec![
        vec![c(Suit::Hearts, Rank::Nine), c(Suit::Clubs, Rank::Two)],
        vec![c(Suit::Spades, Rank::Ace), c(Suit::Hearts, Rank::Three)],
    ];
    let mut state = trick_state(hands, 1, c(Suit::Diamonds, Rank::Four), &[1, 1]);
    assert_eq!(state.turn, Some(0));

    play_card(&mut state, 0, 0).unwrap();
    assert_eq!(legal_card_indices(&state, 1), vec![1]);

    let err = play_card(&mut state, 1, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::MustFollowSuit));
    assert!(err.detail().contains("Hearts"), "{}", err.detail());
    assert!(err.detail().contains("[1]"), "{}", err.detail());
    assert_eq!(state.turn, Some(1));
    assert_eq!(state.trick.len(), 1);

    let played = play_card(&mut state, 1, 1).unwrap();
    let won = played.trick.unwrap();
    assert_eq!(won.winner, 0);
    assert_eq!(won.card, c(Suit::Hearts, Rank::Nine));
}

#[test]
fn void_in_led_suit_may_play_anything() {
    let hands = vec![
        vec![c(Suit::Hearts, Rank::Nine), c(Suit::Hearts, Rank::Ten)],
        vec![c(Suit::Spades, Rank::Ace), c(Suit::Clubs, Rank::Three)],
    ];
    let mut state = trick_state(hands, 1, c(Suit::Diamonds, Rank::Four), &[0, 0]);
    play_card(&mut state, 0, 1).unwrap();
    assert_eq!(legal_card_indices(&state, 1), vec![0, 1]);
}

#[test]
fn trump_two_takes_the_trick() {
    let hands = vec![
        vec![c(Suit::Diamonds, Rank::Ten)],
        vec![c(Suit::Diamonds, Rank::King)],
        vec![c(Suit::Spades, Rank::Two)],
        vec![c(Suit::Diamonds, Rank::Three)],
    ];
    let mut state = trick_state(hands, 3, c(Suit::Spades, Rank::Nine), &[0, 1, 1, 0]);
    for seat in 0..3 {
        let played = play_card(&mut state, seat, 0).unwrap();
        assert!(played.trick.is_none());
        assert_eq!(played.lead_suit, Suit::Diamonds);
    }
    let played = play_card(&mut state, 3, 0).unwrap();
    let won = played.trick.unwrap();
    assert_eq!(won.winner, 2);
    assert_eq!(won.tricks, 1);
    assert!(played.round_complete);
    assert_eq!(state.turn, Some(2));
    assert_eq!(state.leader, 2);
    assert!(state.trick.is_empty());
}

#[test]
fn replaying_or_out_of_range_index_is_rejected() {
    let hands = vec![
        vec![c(Suit::Hearts, Rank::Nine), c(Suit::Hearts, Rank::Two)],
        vec![c(Suit::Spades, Rank::Ace), c(Suit::Clubs, Rank::Three)],
    ];
    let mut state = trick_state(hands, 1, c(Suit::Diamonds, Rank::Four), &[1, 1]);
    play_card(&mut state, 0, 0).unwrap();
    play_card(&mut state, 1, 1).unwrap();
    assert_eq!(state.turn, Some(0));

    let err = play_card(&mut state, 0, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::CardAlreadyPlayed));
    assert_eq!(err.detail(), "Card with index 0 already played");

    let err = play_card(&mut state, 0, 2).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidCardIndex));
    assert_eq!(err.detail(), "Invalid card index 2 for having 2 cards");

    let err = play_card(&mut state, 0, -1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidCardIndex));
}

#[test]
fn exact_bet_scores_and_missed_bet_scores_nothing() {
    // Seat 0 bets 2 and takes both tricks; seat 1 bets 1 and takes none.
    let hands = vec![
        vec![c(Suit::Hearts, Rank::Ace), c(Suit::Hearts, Rank::King)],
        vec![c(Suit::Hearts, Rank::Two), c(Suit::Hearts, Rank::Three)],
    ];
    let mut state = trick_state(hands, 1, c(Suit::Clubs, Rank::Four), &[2, 1]);
    play_card(&mut state, 0, 0).unwrap();
    play_card(&mut state, 1, 0).unwrap();
    play_card(&mut state, 0, 1).unwrap();
    let last = play_card(&mut state, 1, 1).unwrap();
    assert!(last.round_complete);

    let scored = apply_round_scoring(&mut state);
    assert_eq!(scored.tricks, vec![2, 0]);
    assert_eq!(scored.gained, vec![12, 0]);
    assert_eq!(scored.scores, vec![12, 0]);
    assert_eq!(winners(&state), (vec![0], 12));
}

#[test]
fn tied_scores_are_co_winners() {
    let hands = vec![vec![c(Suit::Hearts, Rank::Ace)], vec![c(Suit::Hearts, Rank::Two)]];
    let mut state = trick_state(hands, 0, c(Suit::Clubs, Rank::Four), &[0, 0]);
    state.seats[0].score = 30;
    state.seats[1].score = 30;
    assert_eq!(winners(&state), (vec![0, 1], 30));
}

#[test]
fn playing_during_betting_is_a_phase_error() {
    let hands = vec![vec![c(Suit::Hearts, Rank::Ace)], vec![c(Suit::Hearts, Rank::Two)]];
    let mut state = trick_state(hands, 0, c(Suit::Clubs, Rank::Four), &[0, 0]);
    state.phase = Phase::Betting;
    let err = play_card(&mut state, 1, 0).unwrap_err();
    assert_eq!(err.detail(), "Betting not playing cards");
}

#[test]
fn playing_after_the_game_is_a_phase_error() {
    let hands = vec![vec![c(Suit::Hearts, Rank::Ace)], vec![c(Suit::Hearts, Rank::Two)]];
    let mut state = trick_state(hands, 0, c(Suit::Clubs, Rank::Four), &[0, 0]);
    state.phase = Phase::GameOver;
    let err = play_card(&mut state, 1, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
    assert_eq!(err.detail(), "No trick is in progress");
    assert!(!state.seats[1].is_played(0));
}
