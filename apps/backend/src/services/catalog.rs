//! Catalog administration and default-content seeding.
//!
//! Content is pure data to the game core; this service is the only writer.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::catalog::{normalize_pack, CategoryItem, ImpostorWord};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::CatalogRepo;

#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogRepo>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogRepo>) -> Self {
        Self { catalog }
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryItem>, DomainError> {
        self.catalog.list_items().await
    }

    pub async fn add_category(
        &self,
        name: &str,
        pack: Option<&str>,
    ) -> Result<CategoryItem, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("category name must not be empty"));
        }
        let item = CategoryItem::new(name, normalize_pack(pack));
        self.catalog.save_item(&item).await?;
        Ok(item)
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        name: &str,
        pack: Option<&str>,
    ) -> Result<CategoryItem, DomainError> {
        let mut item = self.catalog.find_item(id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::CatalogItem, format!("catalog item {id}"))
        })?;
        item.name = name.trim().to_string();
        item.pack = normalize_pack(pack);
        self.catalog.save_item(&item).await?;
        Ok(item)
    }

    /// Deleting an unknown item is a no-op.
    pub async fn delete_category(&self, id: Uuid) -> Result<(), DomainError> {
        self.catalog.delete_item(id).await
    }

    /// Distinct pack names, sorted.
    pub async fn packs(&self) -> Result<Vec<String>, DomainError> {
        let items = self.catalog.list_items().await?;
        let packs: BTreeSet<String> = items.into_iter().map(|i| i.pack).collect();
        Ok(packs.into_iter().collect())
    }

    pub async fn impostor_words(&self) -> Result<Vec<ImpostorWord>, DomainError> {
        self.catalog.all_impostor_words().await
    }

    pub async fn impostor_words_in_category(
        &self,
        category: &str,
    ) -> Result<Vec<ImpostorWord>, DomainError> {
        self.catalog.impostor_words_by_category(category).await
    }

    pub async fn add_impostor_word(
        &self,
        category: &str,
        word: &str,
        hint: &str,
    ) -> Result<ImpostorWord, DomainError> {
        let category = category.trim();
        let word = word.trim();
        if category.is_empty() || word.is_empty() {
            return Err(DomainError::validation(
                "impostor word and category must not be empty",
            ));
        }
        let entry = ImpostorWord::new(category, word, hint.trim());
        self.catalog.save_impostor_word(&entry).await?;
        Ok(entry)
    }

    /// Deleting an unknown word is a no-op.
    pub async fn delete_impostor_word(&self, id: Uuid) -> Result<(), DomainError> {
        self.catalog.delete_impostor_word(id).await
    }

    /// Distinct impostor categories, sorted.
    pub async fn impostor_categories(&self) -> Result<Vec<String>, DomainError> {
        let words = self.catalog.all_impostor_words().await?;
        let categories: BTreeSet<String> = words.into_iter().map(|w| w.category).collect();
        Ok(categories.into_iter().collect())
    }

    /// Seed default content on an empty catalog. Idempotent: a non-empty
    /// item or word store is left untouched.
    pub async fn seed_defaults(&self) -> Result<(), DomainError> {
        if self.catalog.list_items().await?.is_empty() {
            for item in default_items() {
                self.catalog.save_item(&item).await?;
            }
            info!("seeded default category items");
        }
        if self.catalog.all_impostor_words().await?.is_empty() {
            for word in default_words() {
                self.catalog.save_impostor_word(&word).await?;
            }
            info!("seeded default impostor words");
        }
        Ok(())
    }
}

fn default_items() -> Vec<CategoryItem> {
    [
        // FUTBOL pack
        ("World Cup and continental double winners", "FUTBOL"),
        ("Champions League winners with three different clubs", "FUTBOL"),
        ("Top scorers in four major European leagues", "FUTBOL"),
        ("Goalkeepers with an official open-play goal", "FUTBOL"),
        ("Players who wore both Real Madrid and Barcelona shirts", "FUTBOL"),
        ("African Ballon d'Or winners", "FUTBOL"),
        ("Players with 100+ international goals", "FUTBOL"),
        ("Champions as both player and manager", "FUTBOL"),
        ("Winners of both Libertadores and Champions League", "FUTBOL"),
        ("Number 10s for the national side of Brazil", "FUTBOL"),
        ("Transfers above one hundred million euros", "FUTBOL"),
        ("Players never shown a red card", "FUTBOL"),
        // MOVIES pack
        ("Best Director Oscar winners", "MOVIES"),
        ("Superhero films past one billion at the box office", "MOVIES"),
        ("Actors who have played the Joker", "MOVIES"),
        ("Classic slasher horror films", "MOVIES"),
        ("Best Animated Feature Oscar winners", "MOVIES"),
        ("Famous science-fiction trilogies", "MOVIES"),
        ("Iconic animated villains", "MOVIES"),
        ("Mexican directors with an Oscar", "MOVIES"),
        ("Films led by Tom Hanks", "MOVIES"),
    ]
    .into_iter()
    .map(|(name, pack)| CategoryItem::new(name, pack))
    .collect()
}

fn default_words() -> Vec<ImpostorWord> {
    [
        ("Animals", "Lion", "King of the savanna"),
        ("Animals", "Elephant", "Never forgets, has a trunk"),
        ("Food", "Pizza", "Italian, round, sliced"),
        ("Countries", "Mexico", "Tacos, mariachis and spice"),
        ("Sports", "Football", "Eleven versus eleven, goals"),
        ("Professions", "Doctor", "Heals the sick"),
        ("Transport", "Airplane", "Flies through the air"),
    ]
    .into_iter()
    .map(|(category, word, hint)| ImpostorWord::new(category, word, hint))
    .collect()
}
