use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ProductQuery: Send + Sync {
    /// All products ordered by name.
    async fn list_products(&self) -> Result<Vec<Product>, ProductQueryError>;

    async fn find_by_id(&self, product_id: Uuid) -> Result<Option<Product>, ProductQueryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductQueryError>;

    /// The subset of `ids` that still exist.
    async fn find_existing_ids(&self, ids: &[Uuid]) -> Result<HashSet<Uuid>, ProductQueryError>;

    /// Whether any product still points at `filename`.
    async fn image_in_use(&self, filename: &str) -> Result<bool, ProductQueryError>;
}
