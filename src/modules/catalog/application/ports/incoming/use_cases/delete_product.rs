use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeleteProductError {
    #[error("Product not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait DeleteProductUseCase: Send + Sync {
    async fn execute(&self, product_id: Uuid) -> Result<Product, DeleteProductError>;
}
