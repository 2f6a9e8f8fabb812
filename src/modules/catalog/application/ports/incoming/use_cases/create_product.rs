use async_trait::async_trait;

use crate::catalog::application::domain::entities::{Price, Product, ProductName, Stock};
use crate::catalog::application::ports::outgoing::ImageUpload;

#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: ProductName,
    pub price: Price,
    pub stock: Stock,
    pub image: ImageUpload,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateProductError {
    #[error("A product with this name already exists")]
    NameAlreadyExists,

    #[error("Identical image already stored as {existing}")]
    DuplicateImage { existing: String },

    #[error("Image storage error: {0}")]
    ImageStorageError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateProductUseCase: Send + Sync {
    async fn execute(&self, command: CreateProductCommand) -> Result<Product, CreateProductError>;
}
