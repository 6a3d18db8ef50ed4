//! Catalog persistence port: guessable items by pack, impostor words by
//! category. Read-mostly; writes come from the admin surface and seeding.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::{CategoryItem, ImpostorWord};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait CatalogRepo: Send + Sync {
    async fn find_by_pack(&self, pack: &str) -> Result<Vec<CategoryItem>, DomainError>;

    async fn list_items(&self) -> Result<Vec<CategoryItem>, DomainError>;

    async fn find_item(&self, id: Uuid) -> Result<Option<CategoryItem>, DomainError>;

    async fn save_item(&self, item: &CategoryItem) -> Result<(), DomainError>;

    /// Deleting an unknown item is a no-op.
    async fn delete_item(&self, id: Uuid) -> Result<(), DomainError>;

    async fn all_impostor_words(&self) -> Result<Vec<ImpostorWord>, DomainError>;

    async fn impostor_words_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ImpostorWord>, DomainError>;

    async fn save_impostor_word(&self, word: &ImpostorWord) -> Result<(), DomainError>;

    /// Deleting an unknown word is a no-op.
    async fn delete_impostor_word(&self, id: Uuid) -> Result<(), DomainError>;
}
