//! Round assignment for both game modes, plus the single-player re-roll.
//!
//! All functions are pure over an injected RNG so assignment is deterministic
//! under a seeded generator. "Start" and "reset" are the same operation: reset
//! re-runs the assignment in place, which is how "play again" works.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use uuid::Uuid;

use crate::domain::catalog::{CategoryItem, ImpostorWord};
use crate::domain::player::Player;
use crate::domain::room::{GameConfig, Room, RoomStatus};
use crate::errors::domain::{ContentKind, DomainError, NotFoundKind};

/// Assign a fresh Guess-Who round.
///
/// Shuffles the pack and hands item `i` to player `i` in join order (1:1, no
/// repeats), derives a display permutation independent of the item shuffle,
/// resets every per-round player field and clears both voting ledgers.
pub fn assign_guess_who<R: Rng + ?Sized>(
    room: &mut Room,
    players: &mut [Player],
    pool: &[CategoryItem],
    rng: &mut R,
) -> Result<(), DomainError> {
    let pack = room.selected_pack().unwrap_or_default().to_string();
    if pool.len() < players.len() {
        return Err(DomainError::insufficient_content(
            ContentKind::PackTooSmall,
            format!(
                "not enough items in pack '{}': found {}, needed {}",
                pack,
                pool.len(),
                players.len()
            ),
        ));
    }

    let mut items = pool.to_vec();
    items.shuffle(rng);

    for player in players.iter_mut() {
        player.reset_for_round();
    }
    for (player, item) in players.iter_mut().zip(items.into_iter()) {
        player.assigned_item = Some(item);
    }
    assign_visual_orders(players, rng);

    room.current_category = None;
    room.current_word = None;
    room.clear_all_ledgers();
    room.status = RoomStatus::InGame;
    Ok(())
}

/// Assign a fresh Impostor round.
///
/// `words` is the candidate pool, already narrowed by any category
/// preference. Picks the round secret (avoiding an immediate repeat of the
/// previous word where possible), selects impostors via an independent
/// shuffle, hands the hint only to impostors in rooms with hints enabled,
/// and clears both voting ledgers.
pub fn assign_impostor<R: Rng + ?Sized>(
    room: &mut Room,
    players: &mut [Player],
    words: &[ImpostorWord],
    rng: &mut R,
) -> Result<(), DomainError> {
    if words.is_empty() {
        return Err(DomainError::insufficient_content(
            ContentKind::NoWordsConfigured,
            "no words configured for the impostor game",
        ));
    }

    let (configured_count, hints_enabled) = match &room.config {
        GameConfig::Impostor {
            impostor_count,
            hints_enabled,
            ..
        } => (*impostor_count as usize, *hints_enabled),
        GameConfig::GuessWho { .. } => {
            return Err(DomainError::validation(
                "room is not configured for the impostor game",
            ))
        }
    };

    let word = pick_word(words, room.current_word.as_deref(), rng);

    // Impostor selection is its own shuffle, independent of display order.
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.shuffle(rng);
    let impostor_count = configured_count
        .min(players.len().saturating_sub(1))
        .max(1);
    let impostors: Vec<usize> = order.into_iter().take(impostor_count).collect();

    for (idx, player) in players.iter_mut().enumerate() {
        player.reset_for_round();
        if impostors.contains(&idx) {
            player.is_impostor = true;
            if hints_enabled {
                player.hint = Some(word.hint.clone());
            }
        }
    }
    assign_visual_orders(players, rng);

    room.current_category = Some(word.category.clone());
    room.current_word = Some(word.word.clone());
    room.clear_all_ledgers();
    room.status = RoomStatus::InGame;
    Ok(())
}

/// Re-roll the target's assigned item from the room's pack.
///
/// Items currently assigned to any player are excluded; if exclusion empties
/// the pool the full pack is used again (duplicates become possible only in
/// this degenerate case).
pub fn reroll_item<R: Rng + ?Sized>(
    target_id: Uuid,
    players: &mut [Player],
    pool: &[CategoryItem],
    rng: &mut R,
) -> Result<CategoryItem, DomainError> {
    if pool.is_empty() {
        return Err(DomainError::insufficient_content(
            ContentKind::PackTooSmall,
            "pack has no items to re-roll from",
        ));
    }

    let assigned: Vec<Uuid> = players
        .iter()
        .filter_map(|p| p.assigned_item.as_ref().map(|item| item.id))
        .collect();

    let mut available: Vec<CategoryItem> = pool
        .iter()
        .filter(|item| !assigned.contains(&item.id))
        .cloned()
        .collect();
    if available.is_empty() {
        available = pool.to_vec();
    }
    available.shuffle(rng);
    let item = available.into_iter().next().expect("pool checked non-empty");

    let target = players
        .iter_mut()
        .find(|p| p.id == target_id)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Target, format!("target player {target_id}"))
        })?;
    target.assigned_item = Some(item.clone());
    Ok(item)
}

/// Pick the round secret. The previous word is avoided only while at least
/// one alternative remains.
fn pick_word<'a, R: Rng + ?Sized>(
    words: &'a [ImpostorWord],
    current_word: Option<&str>,
    rng: &mut R,
) -> &'a ImpostorWord {
    let mut candidates: Vec<&ImpostorWord> = words.iter().collect();

    if candidates.len() > 1 {
        if let Some(current) = current_word {
            let fresh: Vec<&ImpostorWord> = candidates
                .iter()
                .copied()
                .filter(|w| w.word != current)
                .collect();
            if !fresh.is_empty() {
                candidates = fresh;
            }
        }
    }

    candidates
        .choose(rng)
        .copied()
        .expect("word list checked non-empty")
}

/// Derive the per-round display permutation: shuffle a copy of the player
/// list and give each player its index within that shuffle, so display order
/// carries no information about role assignment.
fn assign_visual_orders<R: Rng + ?Sized>(players: &mut [Player], rng: &mut R) {
    let mut ids: Vec<Uuid> = players.iter().map(|p| p.id).collect();
    ids.shuffle(rng);
    for player in players.iter_mut() {
        let pos = ids
            .iter()
            .position(|id| *id == player.id)
            .expect("player present in its own shuffle");
        player.visual_order = Some(pos as u32);
    }
}
