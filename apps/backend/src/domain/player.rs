//! Player model. A player belongs to exactly one room and never outlives it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::CategoryItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    /// Owning room (back-reference; the room does not embed players).
    pub room_id: Uuid,
    /// Display name, unique case-insensitively within the room at join time.
    pub name: String,
    /// Exactly one player per room has this set; assigned at creation and
    /// never reassigned.
    pub host: bool,
    /// 0-based join sequence; the host is always 0. Round assignment walks
    /// players in this order.
    pub join_order: u32,
    /// Guess-Who: the item this player must guess.
    pub assigned_item: Option<CategoryItem>,
    /// Impostor mode only.
    pub is_impostor: bool,
    /// Impostor mode only: ejected by an accusation round.
    pub eliminated: bool,
    /// Guess-Who: validated as having guessed correctly.
    pub guessed: bool,
    /// Guess-Who: a submitted guess awaiting the validation vote.
    pub pending_guess: Option<String>,
    /// Impostor mode: the secret word's hint, present only for impostors in
    /// rooms with hints enabled.
    pub hint: Option<String>,
    /// Finishing position, assigned at correct-guess time; strictly
    /// increasing and gapless from 1 within a round.
    pub guess_order: Option<u32>,
    /// Per-round randomized display position, decorrelated from role
    /// assignment.
    pub visual_order: Option<u32>,
    /// Free-form elimination notes kept by the player.
    pub notes: Option<String>,
    pub invalid_notes: Option<String>,
}

impl Player {
    pub fn new(room_id: Uuid, name: String, host: bool, join_order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id,
            name,
            host,
            join_order,
            assigned_item: None,
            is_impostor: false,
            eliminated: false,
            guessed: false,
            pending_guess: None,
            hint: None,
            guess_order: None,
            visual_order: None,
            notes: None,
            invalid_notes: None,
        }
    }

    /// Reset every per-round field. Name, host flag and join order survive
    /// across rounds; everything else starts fresh.
    pub fn reset_for_round(&mut self) {
        self.assigned_item = None;
        self.is_impostor = false;
        self.eliminated = false;
        self.guessed = false;
        self.pending_guess = None;
        self.hint = None;
        self.guess_order = None;
        self.visual_order = None;
    }
}
