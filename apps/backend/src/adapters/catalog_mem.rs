//! In-memory catalog store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::catalog::{CategoryItem, ImpostorWord};
use crate::errors::domain::DomainError;
use crate::repos::catalog::CatalogRepo;

#[derive(Default)]
pub struct MemCatalogRepo {
    items: RwLock<HashMap<Uuid, CategoryItem>>,
    words: RwLock<HashMap<Uuid, ImpostorWord>>,
}

impl MemCatalogRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepo for MemCatalogRepo {
    async fn find_by_pack(&self, pack: &str) -> Result<Vec<CategoryItem>, DomainError> {
        let mut items: Vec<CategoryItem> = self
            .items
            .read()
            .values()
            .filter(|item| item.pack == pack)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn list_items(&self) -> Result<Vec<CategoryItem>, DomainError> {
        let mut items: Vec<CategoryItem> = self.items.read().values().cloned().collect();
        items.sort_by(|a, b| a.pack.cmp(&b.pack).then_with(|| a.name.cmp(&b.name)));
        Ok(items)
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<CategoryItem>, DomainError> {
        Ok(self.items.read().get(&id).cloned())
    }

    async fn save_item(&self, item: &CategoryItem) -> Result<(), DomainError> {
        self.items.write().insert(item.id, item.clone());
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), DomainError> {
        self.items.write().remove(&id);
        Ok(())
    }

    async fn all_impostor_words(&self) -> Result<Vec<ImpostorWord>, DomainError> {
        let mut words: Vec<ImpostorWord> = self.words.read().values().cloned().collect();
        words.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.word.cmp(&b.word)));
        Ok(words)
    }

    async fn impostor_words_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ImpostorWord>, DomainError> {
        let mut words: Vec<ImpostorWord> = self
            .words
            .read()
            .values()
            .filter(|w| w.category == category)
            .cloned()
            .collect();
        words.sort_by(|a, b| a.word.cmp(&b.word));
        Ok(words)
    }

    async fn save_impostor_word(&self, word: &ImpostorWord) -> Result<(), DomainError> {
        self.words.write().insert(word.id, word.clone());
        Ok(())
    }

    async fn delete_impostor_word(&self, id: Uuid) -> Result<(), DomainError> {
        self.words.write().remove(&id);
        Ok(())
    }
}
