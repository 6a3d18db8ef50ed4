//! Property tests for voting resolution (pure domain, no services).
//!
//! Resolution contract:
//! - A binary vote closes exactly when `cast == players - 1`, never earlier
//! - Approval requires strictly more yes than no; ties fail
//! - Accusation rounds resolve to the strict plurality target, or to a tie
//!   whenever the maximum is shared, independent of ballot order

use proptest::prelude::*;
use uuid::Uuid;

use crate::domain::room::{GameConfig, Room};
use crate::domain::voting::{
    binary_approved, binary_progress, resolve_accusation, AccuseOutcome,
};

fn empty_room() -> Room {
    Room::new(
        "AB12".to_string(),
        GameConfig::GuessWho {
            selected_pack: "FUTBOL".to_string(),
        },
    )
}

proptest! {
    /// Property: the vote closes exactly at threshold
    /// With distinct voters, the vote is open through `players - 2` ballots
    /// and complete at `players - 1`.
    #[test]
    fn prop_binary_vote_closes_exactly_at_threshold(
        players in 2usize..=10,
        ballots in proptest::collection::vec(any::<bool>(), 1..=9),
    ) {
        let mut room = empty_room();
        let needed = players - 1;

        for (i, yes) in ballots.iter().enumerate().take(needed) {
            room.record_ballot(Uuid::new_v4(), *yes);
            let progress = binary_progress(&room, players);
            let cast_so_far = i + 1;
            prop_assert_eq!(progress.cast, cast_so_far);
            prop_assert_eq!(
                progress.complete(),
                cast_so_far >= needed,
                "vote must close exactly at {} ballots, saw completion at {}",
                needed,
                cast_so_far
            );
        }
    }

    /// Property: approval is a strict majority
    #[test]
    fn prop_approved_iff_strictly_more_yes_than_no(
        yes_count in 0usize..=6,
        no_count in 0usize..=6,
    ) {
        let mut room = empty_room();
        for _ in 0..yes_count {
            room.record_ballot(Uuid::new_v4(), true);
        }
        for _ in 0..no_count {
            room.record_ballot(Uuid::new_v4(), false);
        }

        prop_assert_eq!(binary_approved(&room), yes_count > no_count);
    }

    /// Property: any number of re-votes from one voter counts once
    #[test]
    fn prop_revotes_count_once(flips in proptest::collection::vec(any::<bool>(), 1..=12)) {
        let mut room = empty_room();
        let voter = Uuid::new_v4();
        for yes in &flips {
            room.record_ballot(voter, *yes);
        }

        prop_assert_eq!(room.ballots_cast(), 1);
        let last = *flips.last().unwrap();
        prop_assert_eq!(room.yes_votes.contains(&voter), last);
        prop_assert_eq!(room.no_votes.contains(&voter), !last);
    }

    /// Property: accusation outcome matches the strict maximum
    /// Build a ledger from per-target vote counts, then check the tally:
    /// a shared maximum is a tie, a strict maximum names that target.
    #[test]
    fn prop_accusation_resolves_to_the_strict_maximum(
        counts in proptest::collection::vec(1usize..=5, 1..=5),
    ) {
        let targets: Vec<Uuid> = counts.iter().map(|_| Uuid::new_v4()).collect();
        let mut ledger = std::collections::HashMap::new();
        for (target, count) in targets.iter().zip(counts.iter()) {
            for _ in 0..*count {
                ledger.insert(Uuid::new_v4(), *target);
            }
        }

        let max = *counts.iter().max().unwrap();
        let at_max = counts.iter().filter(|c| **c == max).count();

        match resolve_accusation(&ledger) {
            AccuseOutcome::Tie => prop_assert!(at_max > 1, "tie reported with a strict maximum"),
            AccuseOutcome::Plurality(winner) => {
                prop_assert_eq!(at_max, 1, "plurality reported despite a shared maximum");
                let winner_count = targets
                    .iter()
                    .zip(counts.iter())
                    .find(|(t, _)| **t == winner)
                    .map(|(_, c)| *c)
                    .unwrap();
                prop_assert_eq!(winner_count, max);
            }
        }
    }
}
