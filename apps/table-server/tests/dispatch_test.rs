mod common;

use serde_json::json;
use table_server::errors::LifecycleKind;
use table_server::session::dispatch::ALL_DISCONNECTED;
use table_server::{ActionOutcome, DomainError, ParticipantId, PlayerAction};
use table_test_support::channels::{drain, recv_within, SHORT_WAIT};
use table_test_support::payloads::{array_len, u64_field};

use common::two_player_table;

const ANN: ParticipantId = ParticipantId::Client(10);
const BOB: ParticipantId = ParticipantId::Client(11);
const VIC: ParticipantId = ParticipantId::Client(50);

fn bet(actor: ParticipantId, amount: serde_json::Value) -> PlayerAction {
    PlayerAction::new(actor, "bet", json!({ "amount": amount }))
}

fn play(actor: ParticipantId, index: i64) -> PlayerAction {
    PlayerAction::new(actor, "play-card", json!({ "index": index }))
}

fn reason(outcome: ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Rejected { reason, .. } => reason,
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn game_starts_once_every_human_connects() {
    let table = two_player_table(1).await;
    let handle = table.handle();

    assert_eq!(handle.connect(VIC).await, Ok(false));
    assert_eq!(handle.connect(ANN).await, Ok(false));
    assert!(!handle.inspect(|s| s.is_started()).await);
    assert_eq!(handle.connect(BOB).await, Ok(true));
    assert!(handle.inspect(|s| s.is_started()).await);

    assert!(matches!(
        handle.start().await,
        Err(DomainError::Lifecycle(LifecycleKind::AlreadyStarted, _))
    ));
    assert!(handle.connect(ParticipantId::Client(999)).await.is_err());
}

#[tokio::test]
async fn rejected_actions_reach_only_the_actor() {
    let mut table = two_player_table(2).await;
    let handle = table.handle();
    let mut ann = table.take_player_endpoint(10).unwrap();
    let mut bob = table.take_player_endpoint(11).unwrap();
    handle.connect(ANN).await.unwrap();
    handle.connect(BOB).await.unwrap();
    drain(&mut ann.updates);
    drain(&mut bob.updates);

    // seat 0 deals, so seat 1 bets first
    let r = reason(handle.submit(bet(ANN, json!(0))).await);
    assert_eq!(r, "Not 0 player's turn but 1 player's turn");
    let notice = ann.failures.try_recv().expect("ann is told");
    assert_eq!(notice.kind, "bet-failed");
    assert_eq!(notice.message, r);
    assert_eq!(notice.player_id, 0);
    assert!(bob.failures.try_recv().is_err());

    let r = reason(handle.submit(bet(BOB, json!(5))).await);
    assert_eq!(r, "Cannot bet more than the cards in the round (1) but bet 5");
    let r = reason(handle.submit(bet(BOB, json!(-1))).await);
    assert_eq!(r, "Must bet at least 0 but bet -1");
    let r = reason(handle.submit(bet(BOB, json!("two"))).await);
    assert!(r.starts_with("Bet value invalid"), "{r}");
    let r = reason(handle.submit(PlayerAction::new(BOB, "fold", json!({}))).await);
    assert!(!r.is_empty());
    let kinds: Vec<String> = drain(&mut bob.failures).into_iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec!["bet-failed", "bet-failed", "bet-failed", "fold-failed"]);

    // nothing was broadcast for any of it
    assert!(drain(&mut ann.updates).is_empty());
    assert!(drain(&mut bob.updates).is_empty());

    // viewers cannot act and get no failure stream
    let r = reason(handle.submit(bet(VIC, json!(0))).await);
    assert_eq!(r, "Viewers cannot act");
}

#[tokio::test]
async fn single_round_game_plays_out_and_ends() {
    let mut table = two_player_table(3).await;
    let handle = table.handle();
    let mut ann = table.take_player_endpoint(10).unwrap();
    let mut bob = table.take_player_endpoint(11).unwrap();
    let mut vic = table.take_viewer_endpoint(50).unwrap();
    handle.connect(VIC).await.unwrap();
    handle.connect(ANN).await.unwrap();
    handle.connect(BOB).await.unwrap();

    let deal = recv_within(&mut ann.updates, SHORT_WAIT).await.unwrap();
    assert_eq!((deal.update_id, deal.kind.as_str()), (1, "deal-round"));
    assert_eq!(array_len(&deal.content, "cards"), 1);
    assert_eq!(u64_field(&deal.content, "dealer"), 0);
    let viewer_deal = vic.updates.try_recv().unwrap();
    assert!(viewer_deal.content.get("cards").is_none());

    assert!(handle.submit(bet(BOB, json!(0))).await.is_applied());
    assert!(handle.submit(bet(ANN, json!(1))).await.is_applied());
    let r = reason(handle.submit(play(BOB, 3)).await);
    assert_eq!(r, "Invalid card index 3 for having 1 cards");
    assert!(handle.submit(play(BOB, 0)).await.is_applied());
    let r = reason(handle.submit(play(BOB, 0)).await);
    assert_eq!(r, "Not 1 player's turn but 0 player's turn");
    assert!(handle.submit(play(ANN, 0)).await.is_applied());

    let reason = handle.termination().wait().await;
    assert!(reason.starts_with("The winner"), "{reason}");

    let kinds: Vec<String> = drain(&mut ann.updates).into_iter().map(|u| u.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec!["bet", "bet", "play-card", "play-card", "trick-won", "round-scored"]
    );
    let ids: Vec<u64> = drain(&mut vic.updates).iter().map(|u| u.update_id).collect();
    assert_eq!(ids, vec![2, 3, 4, 5, 6, 7]);

    // actions after the end are rejected and reported
    let r = reason_after_end(&handle).await;
    assert_eq!(r, "Game not in progress");
    assert_eq!(ann.failures.try_recv().unwrap().kind, "bet-failed");

    // resend still works once the game is over
    assert_eq!(handle.resend(ANN, 1).await, Ok(true));
    assert_eq!(ann.updates.try_recv().unwrap(), deal);
    assert_eq!(handle.resend(VIC, 1).await, Ok(true));
    assert_eq!(vic.updates.try_recv().unwrap(), viewer_deal);

    assert!(matches!(
        handle.end("again").await,
        Err(DomainError::Lifecycle(LifecycleKind::AlreadyEnded, _))
    ));
}

async fn reason_after_end(handle: &table_server::SessionHandle) -> String {
    reason(handle.submit(bet(ANN, json!(0))).await)
}

#[tokio::test]
async fn snapshots_hide_other_hands_until_the_end() {
    let table = two_player_table(4).await;
    let handle = table.handle();
    handle.connect(ANN).await.unwrap();
    handle.connect(BOB).await.unwrap();

    let ann_view = handle.render_state_for(ANN).await.unwrap();
    let players = ann_view["game"]["players"].as_array().unwrap();
    assert!(players[0].get("cards").is_some());
    assert!(players[1].get("cards").is_none());
    assert_eq!(players[1]["nickname"], "bob");
    assert!(ann_view.get("action_log").is_none());

    handle.submit(bet(BOB, json!(0))).await;
    let vic_view = handle.render_state_for(VIC).await.unwrap();
    let players = vic_view["game"]["players"].as_array().unwrap();
    assert!(players.iter().all(|p| p.get("cards").is_some()));
    assert_eq!(vic_view["action_log"].as_array().map(Vec::len), Some(1));
    assert_eq!(vic_view["action_log"][0]["action_id"], 1);
    assert_eq!(vic_view["action_log"][0]["kind"], "bet");

    handle.end("stopped").await.unwrap();
    let bob_view = handle.render_state_for(BOB).await.unwrap();
    let players = bob_view["game"]["players"].as_array().unwrap();
    assert!(players.iter().all(|p| p.get("cards").is_some()));
    assert_eq!(bob_view["ended"], true);
}

#[tokio::test]
async fn last_disconnect_ends_a_running_game() {
    let table = two_player_table(5).await;
    let handle = table.handle();
    handle.connect(ANN).await.unwrap();
    handle.connect(BOB).await.unwrap();

    assert_eq!(handle.disconnect(ANN).await, Ok(false));
    assert!(!handle.termination().is_fired());
    assert_eq!(handle.disconnect(BOB).await, Ok(true));
    assert_eq!(table.wait_for_end().await, ALL_DISCONNECTED);
}
