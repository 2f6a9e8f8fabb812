use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetSingleProductError {
    #[error("Product not found")]
    NotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait GetSingleProductUseCase: Send + Sync {
    async fn execute(&self, product_id: Uuid) -> Result<Product, GetSingleProductError>;
}
