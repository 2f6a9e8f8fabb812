use async_trait::async_trait;

use crate::catalog::application::domain::entities::Product;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetProductsError {
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait GetProductsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<Product>, GetProductsError>;
}
