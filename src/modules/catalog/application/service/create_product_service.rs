use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::image_claims::ImageClaims;
use crate::catalog::application::ports::incoming::use_cases::{
    CreateProductCommand, CreateProductError, CreateProductUseCase,
};
use crate::catalog::application::ports::outgoing::{
    CreateProductData, ImageStorage, ImageStorageError, ProductQuery, ProductRepository,
    ProductRepositoryError,
};
use super::image_release::release_image;

pub struct CreateProductService<R, Q>
where
    R: ProductRepository,
    Q: ProductQuery,
{
    repository: R,
    query: Q,
    images: Arc<dyn ImageStorage>,
    claims: Arc<ImageClaims>,
}

impl<R, Q> CreateProductService<R, Q>
where
    R: ProductRepository,
    Q: ProductQuery,
{
    pub fn new(
        repository: R,
        query: Q,
        images: Arc<dyn ImageStorage>,
        claims: Arc<ImageClaims>,
    ) -> Self {
        Self {
            repository,
            query,
            images,
            claims,
        }
    }
}

#[async_trait]
impl<R, Q> CreateProductUseCase for CreateProductService<R, Q>
where
    R: ProductRepository,
    Q: ProductQuery,
{
    async fn execute(&self, command: CreateProductCommand) -> Result<Product, CreateProductError> {
        let existing = self
            .query
            .find_by_name(command.name.as_str())
            .await
            .map_err(|e| CreateProductError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(CreateProductError::NameAlreadyExists);
        }

        let claim = self.claims.upload().await;
        let stored = self
            .images
            .store(&command.image)
            .await
            .map_err(|e| match e {
                ImageStorageError::Duplicate { existing } => {
                    CreateProductError::DuplicateImage { existing }
                }
                ImageStorageError::Io(msg) => CreateProductError::ImageStorageError(msg),
            })?;

        let data = CreateProductData {
            name: command.name.into_inner(),
            price: command.price.value(),
            stock: command.stock.value(),
            image: Some(stored.filename().to_string()),
        };

        match self.repository.create_product(data).await {
            Ok(product) => {
                info!(product_id = %product.id, name = %product.name, "Product created");
                Ok(product)
            }
            Err(e) => {
                drop(claim);
                if stored.is_written() {
                    let file = stored.filename();
                    release_image(&self.claims, &self.query, self.images.as_ref(), file).await;
                }
                Err(match e {
                    ProductRepositoryError::NameAlreadyExists => {
                        CreateProductError::NameAlreadyExists
                    }
                    other => CreateProductError::RepositoryError(other.to_string()),
                })
            }
        }
    }
}
