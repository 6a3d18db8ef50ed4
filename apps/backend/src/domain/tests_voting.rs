use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::player::Player;
use crate::domain::room::{GameConfig, Room};
use crate::domain::voting::{
    active_players, binary_approved, binary_progress, impostors_win, next_guess_order,
    resolve_accusation, AccuseOutcome,
};

fn room() -> Room {
    Room::new(
        "AB12".to_string(),
        GameConfig::GuessWho {
            selected_pack: "FUTBOL".to_string(),
        },
    )
}

fn make_players(n: usize) -> Vec<Player> {
    let room_id = Uuid::new_v4();
    (0..n)
        .map(|i| Player::new(room_id, format!("player-{i}"), i == 0, i as u32))
        .collect()
}

#[test]
fn a_revote_overwrites_and_never_double_counts() {
    let mut room = room();
    let voter = Uuid::new_v4();

    room.record_ballot(voter, true);
    room.record_ballot(voter, false);

    assert_eq!(room.ballots_cast(), 1);
    assert!(room.no_votes.contains(&voter));
    assert!(!room.yes_votes.contains(&voter));

    room.record_ballot(voter, true);
    assert_eq!(room.ballots_cast(), 1);
    assert!(room.yes_votes.contains(&voter));
}

#[test]
fn binary_vote_needs_all_players_but_the_target() {
    let mut room = room();
    room.record_ballot(Uuid::new_v4(), true);

    let progress = binary_progress(&room, 4);
    assert_eq!(progress.cast, 1);
    assert_eq!(progress.needed, 3);
    assert!(!progress.complete());

    room.record_ballot(Uuid::new_v4(), false);
    room.record_ballot(Uuid::new_v4(), true);
    let progress = binary_progress(&room, 4);
    assert!(progress.complete());
}

#[test]
fn a_tied_binary_vote_is_not_approved() {
    let mut room = room();
    room.record_ballot(Uuid::new_v4(), true);
    room.record_ballot(Uuid::new_v4(), false);
    assert!(!binary_approved(&room));

    room.record_ballot(Uuid::new_v4(), true);
    assert!(binary_approved(&room));
}

#[test]
fn accusation_tally_returns_the_strict_plurality_target() {
    let mut ledger = HashMap::new();
    let target_a = Uuid::new_v4();
    let target_b = Uuid::new_v4();
    ledger.insert(Uuid::new_v4(), target_a);
    ledger.insert(Uuid::new_v4(), target_a);
    ledger.insert(Uuid::new_v4(), target_b);

    assert_eq!(resolve_accusation(&ledger), AccuseOutcome::Plurality(target_a));
}

#[test]
fn accusation_tally_detects_a_two_two_tie() {
    let mut ledger = HashMap::new();
    let target_a = Uuid::new_v4();
    let target_b = Uuid::new_v4();
    for target in [target_a, target_a, target_b, target_b] {
        ledger.insert(Uuid::new_v4(), target);
    }

    assert_eq!(resolve_accusation(&ledger), AccuseOutcome::Tie);
}

#[test]
fn accusation_tally_is_insertion_order_independent() {
    let voters: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
    let target_a = Uuid::new_v4();
    let target_b = Uuid::new_v4();

    let mut forward = HashMap::new();
    forward.insert(voters[0], target_a);
    forward.insert(voters[1], target_a);
    forward.insert(voters[2], target_b);
    forward.insert(voters[3], target_b);

    let mut reversed = HashMap::new();
    reversed.insert(voters[3], target_b);
    reversed.insert(voters[2], target_b);
    reversed.insert(voters[1], target_a);
    reversed.insert(voters[0], target_a);

    assert_eq!(resolve_accusation(&forward), resolve_accusation(&reversed));
    assert_eq!(resolve_accusation(&forward), AccuseOutcome::Tie);
}

#[test]
fn impostors_win_at_parity_among_active_players() {
    let mut players = make_players(4);
    players[0].is_impostor = true;

    // 1 impostor vs 3 innocents
    assert!(!impostors_win(&players));

    // 1 vs 2
    players[1].eliminated = true;
    assert!(!impostors_win(&players));

    // 1 vs 1: parity reached
    players[2].eliminated = true;
    assert!(impostors_win(&players));
}

#[test]
fn eliminated_players_do_not_count_as_active() {
    let mut players = make_players(5);
    assert_eq!(active_players(&players), 5);
    players[1].eliminated = true;
    players[4].eliminated = true;
    assert_eq!(active_players(&players), 3);
}

#[test]
fn guess_order_continues_one_past_the_current_maximum() {
    let mut players = make_players(4);
    assert_eq!(next_guess_order(&players), 1);

    players[0].guess_order = Some(1);
    players[2].guess_order = Some(2);
    assert_eq!(next_guess_order(&players), 3);
}
