use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductData {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub image: Option<String>,
}

/// `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchProductData {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub image: Option<String>,
}

impl PatchProductData {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none() && self.image.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductRepositoryError {
    #[error("Product name already exists")]
    NameAlreadyExists,

    #[error("Product not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create_product(&self, data: CreateProductData)
        -> Result<Product, ProductRepositoryError>;

    async fn patch_product(
        &self,
        product_id: Uuid,
        data: PatchProductData,
    ) -> Result<Product, ProductRepositoryError>;

    /// Removes the row and returns it as it was.
    async fn delete_product(&self, product_id: Uuid) -> Result<Product, ProductRepositoryError>;
}
