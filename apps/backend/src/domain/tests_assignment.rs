use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::domain::assignment::{assign_guess_who, assign_impostor, reroll_item};
use crate::domain::catalog::{CategoryItem, ImpostorWord};
use crate::domain::player::Player;
use crate::domain::room::{GameConfig, Room, RoomStatus};
use crate::errors::domain::{ContentKind, DomainError, NotFoundKind};

fn guess_who_room() -> Room {
    Room::new(
        "AB12".to_string(),
        GameConfig::GuessWho {
            selected_pack: "FUTBOL".to_string(),
        },
    )
}

fn impostor_room(count: u32, hints: bool) -> Room {
    Room::new(
        "CD34".to_string(),
        GameConfig::Impostor {
            impostor_count: count,
            hints_enabled: hints,
            category_preference: None,
        },
    )
}

fn make_players(room_id: Uuid, n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| Player::new(room_id, format!("player-{i}"), i == 0, i as u32))
        .collect()
}

fn make_pool(pack: &str, n: usize) -> Vec<CategoryItem> {
    (0..n)
        .map(|i| CategoryItem::new(format!("item-{i}"), pack))
        .collect()
}

fn make_words(entries: &[(&str, &str, &str)]) -> Vec<ImpostorWord> {
    entries
        .iter()
        .map(|(c, w, h)| ImpostorWord::new(*c, *w, *h))
        .collect()
}

#[test]
fn guess_who_assigns_distinct_items_and_a_full_visual_permutation() {
    let mut room = guess_who_room();
    let mut players = make_players(room.id, 4);
    let pool = make_pool("FUTBOL", 6);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    assign_guess_who(&mut room, &mut players, &pool, &mut rng).unwrap();

    let assigned: HashSet<Uuid> = players
        .iter()
        .map(|p| p.assigned_item.as_ref().unwrap().id)
        .collect();
    assert_eq!(assigned.len(), 4, "every player gets a distinct item");

    let visual: HashSet<u32> = players.iter().map(|p| p.visual_order.unwrap()).collect();
    assert_eq!(visual, (0..4).collect::<HashSet<u32>>());

    assert_eq!(room.status, RoomStatus::InGame);
}

#[test]
fn guess_who_fails_when_pack_is_smaller_than_the_room() {
    let mut room = guess_who_room();
    let mut players = make_players(room.id, 3);
    let pool = make_pool("FUTBOL", 2);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let err = assign_guess_who(&mut room, &mut players, &pool, &mut rng).unwrap_err();
    match err {
        DomainError::InsufficientContent(ContentKind::PackTooSmall, msg) => {
            assert!(msg.contains("found 2"), "unexpected message: {msg}");
        }
        other => panic!("expected PackTooSmall, got: {other:?}"),
    }
    assert_eq!(room.status, RoomStatus::Waiting, "failed start must not advance the room");
}

#[test]
fn guess_who_reassignment_resets_transient_fields_and_ledgers() {
    let mut room = guess_who_room();
    let mut players = make_players(room.id, 3);
    let pool = make_pool("FUTBOL", 5);
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    // Dirty every transient field as if a round had been played.
    players[0].guessed = true;
    players[0].guess_order = Some(1);
    players[1].pending_guess = Some("old guess".to_string());
    players[2].eliminated = true;
    players[2].is_impostor = true;
    room.record_ballot(players[1].id, true);
    room.accuse_votes.insert(players[0].id, players[2].id);

    assign_guess_who(&mut room, &mut players, &pool, &mut rng).unwrap();

    for p in &players {
        assert!(!p.guessed);
        assert!(!p.eliminated);
        assert!(!p.is_impostor);
        assert_eq!(p.pending_guess, None);
        assert_eq!(p.guess_order, None);
        assert_eq!(p.hint, None);
    }
    assert_eq!(room.ballots_cast(), 0);
    assert!(room.accuse_votes.is_empty());
    assert_eq!(room.voting_target, None);
    assert_eq!(room.voting_kind, None);
}

#[test]
fn impostor_count_is_clamped_between_one_and_players_minus_one() {
    for (players_n, configured, expected) in
        [(4usize, 3u32, 3usize), (4, 10, 3), (4, 0, 1), (3, 1, 1), (2, 5, 1)]
    {
        let mut room = impostor_room(configured, false);
        let mut players = make_players(room.id, players_n);
        let words = make_words(&[("Animals", "Lion", "roars"), ("Food", "Pizza", "round")]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assign_impostor(&mut room, &mut players, &words, &mut rng).unwrap();

        let impostors = players.iter().filter(|p| p.is_impostor).count();
        assert_eq!(
            impostors, expected,
            "{players_n} players with configured count {configured}"
        );
    }
}

#[test]
fn impostor_hints_reach_impostors_only_and_only_when_enabled() {
    let words = make_words(&[("Animals", "Lion", "roars")]);

    let mut room = impostor_room(1, true);
    let mut players = make_players(room.id, 4);
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    assign_impostor(&mut room, &mut players, &words, &mut rng).unwrap();
    for p in &players {
        if p.is_impostor {
            assert_eq!(p.hint.as_deref(), Some("roars"));
        } else {
            assert_eq!(p.hint, None, "non-impostors never carry a hint");
        }
    }

    let mut room = impostor_room(1, false);
    let mut players = make_players(room.id, 4);
    assign_impostor(&mut room, &mut players, &words, &mut rng).unwrap();
    assert!(players.iter().all(|p| p.hint.is_none()));
}

#[test]
fn impostor_round_sets_the_room_secret_and_visual_orders() {
    let words = make_words(&[("Animals", "Lion", "roars"), ("Food", "Pizza", "round")]);
    let mut room = impostor_room(1, false);
    let mut players = make_players(room.id, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    assign_impostor(&mut room, &mut players, &words, &mut rng).unwrap();

    let word = room.current_word.as_deref().unwrap();
    let category = room.current_category.as_deref().unwrap();
    assert!(words.iter().any(|w| w.word == word && w.category == category));

    let visual: HashSet<u32> = players.iter().map(|p| p.visual_order.unwrap()).collect();
    assert_eq!(visual, (0..3).collect::<HashSet<u32>>());
    assert_eq!(room.status, RoomStatus::InGame);
}

#[test]
fn impostor_round_avoids_repeating_the_previous_word() {
    let words = make_words(&[("Animals", "Lion", "roars"), ("Food", "Pizza", "round")]);
    for seed in 0..20 {
        let mut room = impostor_room(1, false);
        room.current_word = Some("Lion".to_string());
        let mut players = make_players(room.id, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        assign_impostor(&mut room, &mut players, &words, &mut rng).unwrap();
        assert_eq!(room.current_word.as_deref(), Some("Pizza"));
    }
}

#[test]
fn impostor_round_repeats_the_word_when_it_is_the_only_candidate() {
    let words = make_words(&[("Animals", "Lion", "roars")]);
    let mut room = impostor_room(1, false);
    room.current_word = Some("Lion".to_string());
    let mut players = make_players(room.id, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(6);

    assign_impostor(&mut room, &mut players, &words, &mut rng).unwrap();
    assert_eq!(room.current_word.as_deref(), Some("Lion"));
}

#[test]
fn impostor_round_requires_words() {
    let mut room = impostor_room(1, false);
    let mut players = make_players(room.id, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let err = assign_impostor(&mut room, &mut players, &[], &mut rng).unwrap_err();
    assert!(matches!(
        err,
        DomainError::InsufficientContent(ContentKind::NoWordsConfigured, _)
    ));
}

#[test]
fn reroll_excludes_items_already_assigned_in_the_room() {
    let mut room = guess_who_room();
    let mut players = make_players(room.id, 3);
    let pool = make_pool("FUTBOL", 5);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    assign_guess_who(&mut room, &mut players, &pool, &mut rng).unwrap();

    let taken: HashSet<Uuid> = players
        .iter()
        .map(|p| p.assigned_item.as_ref().unwrap().id)
        .collect();
    let target_id = players[1].id;

    let item = reroll_item(target_id, &mut players, &pool, &mut rng).unwrap();
    assert!(
        !taken.contains(&item.id),
        "re-roll must avoid items held by any player"
    );
    let target = players.iter().find(|p| p.id == target_id).unwrap();
    assert_eq!(target.assigned_item.as_ref().unwrap().id, item.id);
}

#[test]
fn reroll_falls_back_to_the_full_pool_when_everything_is_taken() {
    let mut room = guess_who_room();
    let mut players = make_players(room.id, 3);
    let pool = make_pool("FUTBOL", 3);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    assign_guess_who(&mut room, &mut players, &pool, &mut rng).unwrap();

    let item = reroll_item(players[0].id, &mut players, &pool, &mut rng).unwrap();
    assert!(pool.iter().any(|p| p.id == item.id));
}

#[test]
fn reroll_rejects_an_unknown_target() {
    let room = guess_who_room();
    let mut players = make_players(room.id, 2);
    let pool = make_pool("FUTBOL", 3);
    let mut rng = ChaCha8Rng::seed_from_u64(10);

    let err = reroll_item(Uuid::new_v4(), &mut players, &pool, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Target, _)
    ));
}
