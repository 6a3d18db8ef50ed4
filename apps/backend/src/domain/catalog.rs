//! Static catalog content: guessable items grouped into packs, and the
//! category/word/hint triples the Impostor mode draws its secrets from.
//!
//! Immutable from the core's perspective; mutation happens through the admin
//! surface only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback pack used whenever a pack name is absent or blank.
pub const DEFAULT_PACK: &str = "FUTBOL";

/// Category preference value meaning "no restriction".
pub const RANDOM_CATEGORY: &str = "RANDOM";

/// One guessable item belonging to a named pack (Guess-Who mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub id: Uuid,
    pub name: String,
    pub pack: String,
}

impl CategoryItem {
    pub fn new(name: impl Into<String>, pack: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            pack: pack.into(),
        }
    }
}

/// A round secret for the Impostor mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpostorWord {
    pub id: Uuid,
    pub category: String,
    pub word: String,
    pub hint: String,
}

impl ImpostorWord {
    pub fn new(
        category: impl Into<String>,
        word: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            word: word.into(),
            hint: hint.into(),
        }
    }
}

/// Normalize a pack name the way the admin surface stores them: trimmed,
/// uppercased, defaulting when absent or blank.
pub fn normalize_pack(pack: Option<&str>) -> String {
    match pack.map(str::trim) {
        Some(p) if !p.is_empty() => p.to_uppercase(),
        _ => DEFAULT_PACK.to_string(),
    }
}
