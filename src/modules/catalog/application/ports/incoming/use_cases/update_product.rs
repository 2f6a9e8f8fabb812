use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::application::domain::entities::{Price, Product, ProductName, Stock};
use crate::catalog::application::ports::outgoing::ImageUpload;

/// Every field is optional; absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductCommand {
    pub name: Option<ProductName>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdateProductError {
    #[error("Product not found")]
    NotFound,

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
pub trait UpdateProductUseCase: Send + Sync {
    async fn execute(
        &self,
        product_id: Uuid,
        command: UpdateProductCommand,
    ) -> Result<Product, UpdateProductError>;
}
